//! Utilities shared across numkit.

pub mod display;
