//! Vector module: dense, sparse and compound vectors, plus the mutable builder.

mod builder;
mod compound;
mod dense;
mod sparse;

pub use builder::VectorBuilder;
pub use compound::{CompoundVector, SharedVector};
pub use dense::DenseVector;
pub use sparse::SparseVector;
