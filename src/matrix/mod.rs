//! Matrix module: dense, sparse (CSR) and compound matrices, plus the mutable builder.

mod builder;
mod compound;
mod dense;
mod sparse;

pub use builder::MatrixBuilder;
pub use compound::{SharedMatrix, TransposedMatrix};
pub use dense::DenseMatrix;
pub use sparse::SparseMatrix;
