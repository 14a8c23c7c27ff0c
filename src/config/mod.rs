//! Configuration for the numeric engine and factory.

pub mod options;

pub use options::{DEFAULT_PARALLEL_THRESHOLD, DuplicatePolicy, NumericOptions};
