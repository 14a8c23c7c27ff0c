//! numkit: storage-agnostic numeric objects with kind-dispatched kernels
//!
//! Scalars, vectors and matrices backed by dense, sparse or compound storage,
//! a dispatch engine that picks the right kernel for each pair of operands,
//! probability distributions with a normalisation invariant, and feature
//! vectors built on top of both.

pub mod config;
pub mod context;
pub mod core;
pub mod error;
pub mod features;
pub mod kernel;
pub mod matrix;
pub mod prob;
pub mod utils;
pub mod vector;

// Re-exports for convenience
pub use crate::config::*;
pub use crate::context::*;
pub use crate::core::*;
pub use crate::error::*;
pub use crate::features::*;
pub use crate::kernel::KernelTable;
pub use crate::matrix::*;
pub use crate::prob::*;
pub use crate::vector::*;
