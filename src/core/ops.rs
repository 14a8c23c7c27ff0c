//! Derived arithmetic on the vector and matrix contracts.
//!
//! These are extension traits so that both concrete types and `dyn` objects get
//! `dot`/`scale`/`add`/`subtract`. Every call goes through the process-wide
//! [`Numerics`] engine, so storage-specific kernels are picked automatically.

use crate::context::Numerics;
use crate::core::traits::{DataMatrix, DataVector};
use crate::core::value::{MatrixValue, VectorValue};
use crate::error::Result;

pub trait VectorOps {
    fn dot(&self, other: &dyn DataVector) -> Result<f64>;
    fn scale(&self, k: f64) -> VectorValue;
    fn add(&self, other: &dyn DataVector) -> Result<VectorValue>;
    fn subtract(&self, other: &dyn DataVector) -> Result<VectorValue>;
}

pub trait MatrixOps {
    fn dot(&self, other: &dyn DataMatrix) -> Result<f64>;
    fn scale(&self, k: f64) -> MatrixValue;
    fn add(&self, other: &dyn DataMatrix) -> Result<MatrixValue>;
    fn subtract(&self, other: &dyn DataMatrix) -> Result<MatrixValue>;
}

fn vector_dot(a: &dyn DataVector, b: &dyn DataVector) -> Result<f64> {
    Numerics::standard().dot_vectors(a, b)
}

fn vector_scale(a: &dyn DataVector, k: f64) -> VectorValue {
    Numerics::standard().scale_vector(a, k)
}

fn vector_add(a: &dyn DataVector, b: &dyn DataVector) -> Result<VectorValue> {
    Numerics::standard().add_vectors(a, b)
}

fn vector_subtract(a: &dyn DataVector, b: &dyn DataVector) -> Result<VectorValue> {
    Numerics::standard().subtract_vectors(a, b)
}

fn matrix_dot(a: &dyn DataMatrix, b: &dyn DataMatrix) -> Result<f64> {
    Numerics::standard().dot_matrices(a, b)
}

fn matrix_scale(a: &dyn DataMatrix, k: f64) -> MatrixValue {
    Numerics::standard().scale_matrix(a, k)
}

fn matrix_add(a: &dyn DataMatrix, b: &dyn DataMatrix) -> Result<MatrixValue> {
    Numerics::standard().add_matrices(a, b)
}

fn matrix_subtract(a: &dyn DataMatrix, b: &dyn DataMatrix) -> Result<MatrixValue> {
    Numerics::standard().subtract_matrices(a, b)
}

impl<V: DataVector> VectorOps for V {
    fn dot(&self, other: &dyn DataVector) -> Result<f64> {
        vector_dot(self, other)
    }
    fn scale(&self, k: f64) -> VectorValue {
        vector_scale(self, k)
    }
    fn add(&self, other: &dyn DataVector) -> Result<VectorValue> {
        vector_add(self, other)
    }
    fn subtract(&self, other: &dyn DataVector) -> Result<VectorValue> {
        vector_subtract(self, other)
    }
}

impl<M: DataMatrix> MatrixOps for M {
    fn dot(&self, other: &dyn DataMatrix) -> Result<f64> {
        matrix_dot(self, other)
    }
    fn scale(&self, k: f64) -> MatrixValue {
        matrix_scale(self, k)
    }
    fn add(&self, other: &dyn DataMatrix) -> Result<MatrixValue> {
        matrix_add(self, other)
    }
    fn subtract(&self, other: &dyn DataMatrix) -> Result<MatrixValue> {
        matrix_subtract(self, other)
    }
}

// Trait objects are unsized, so the blanket impls above do not cover them.
macro_rules! dyn_ops {
    ($ops:ident for $obj:ty, $arg:ty => $out:ty: $dot:ident, $scale:ident, $add:ident, $sub:ident) => {
        impl $ops for $obj {
            fn dot(&self, other: &$arg) -> Result<f64> {
                $dot(self, other)
            }
            fn scale(&self, k: f64) -> $out {
                $scale(self, k)
            }
            fn add(&self, other: &$arg) -> Result<$out> {
                $add(self, other)
            }
            fn subtract(&self, other: &$arg) -> Result<$out> {
                $sub(self, other)
            }
        }
    };
}

dyn_ops!(VectorOps for dyn DataVector + '_, dyn DataVector => VectorValue:
    vector_dot, vector_scale, vector_add, vector_subtract);
dyn_ops!(VectorOps for dyn DataVector + Send + Sync + '_, dyn DataVector => VectorValue:
    vector_dot, vector_scale, vector_add, vector_subtract);
dyn_ops!(MatrixOps for dyn DataMatrix + '_, dyn DataMatrix => MatrixValue:
    matrix_dot, matrix_scale, matrix_add, matrix_subtract);
dyn_ops!(MatrixOps for dyn DataMatrix + Send + Sync + '_, dyn DataMatrix => MatrixValue:
    matrix_dot, matrix_scale, matrix_add, matrix_subtract);
