//! Context module: the dispatch engine and the object factory.
//!
//! - [`numerics`]: the `Numerics` engine, which picks a kernel for every
//!   operation from the runtime kinds of its operands, and the free functions
//!   (`norm`, `scale`, `add`, `subtract`, `dot`, `display`) over the standard engine.
//! - [`factory`]: `NumericFactory`, which builds dense, sparse and compound
//!   objects under a shared set of options.
//!
//! # Example
//! ```rust
//! use numkit::{NumericFactory, norm};
//! let f = NumericFactory::default();
//! let v = f.sparse_vector(4, &[0, 3], &[3.0, 4.0]).unwrap();
//! assert_eq!(norm(&v).unwrap(), 5.0);
//! ```

pub mod factory;
pub mod numerics;

pub use factory::NumericFactory;
pub use numerics::{Numerics, add, display, dot, norm, scale, subtract};
