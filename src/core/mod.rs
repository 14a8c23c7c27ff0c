//! Core numeric model: classifiers, contracts, the scalar type and owned results.

pub mod kind;
pub mod ops;
pub mod scalar;
pub mod traits;
pub mod value;

pub use kind::{Capabilities, Dims, Kind, Shape};
pub use ops::{MatrixOps, VectorOps};
pub use scalar::Scalar;
pub use traits::{
    CsrParts, DataMatrix, DataObject, DataScalar, DataVector, FlatArray, FlatArrayMatrix,
    SettableMatrix, SettableVector, SparseParts,
};
pub use value::{MatrixValue, Numeric, VectorValue, matrices_equal, vectors_equal};
