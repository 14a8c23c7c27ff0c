//! Owned results of dispatched operations.
//!
//! Kernels return whichever storage suits the operands, so results come back
//! as closed enums over the concrete kinds. They implement the same contracts
//! as the types they wrap and compare by value, not by storage.

use std::fmt;

use crate::core::kind::{Capabilities, Dims, Kind};
use crate::core::scalar::Scalar;
use crate::core::traits::{
    CsrParts, DataMatrix, DataObject, DataScalar, DataVector, SparseParts,
};
use crate::error::Result;
use crate::matrix::{DenseMatrix, SparseMatrix};
use crate::utils::display;
use crate::vector::{DenseVector, SparseVector};

/// Element-wise equality of two vectors, regardless of storage.
pub fn vectors_equal(a: &dyn DataVector, b: &dyn DataVector) -> bool {
    a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x == y)
}

/// Element-wise equality of two matrices, regardless of storage.
pub fn matrices_equal(a: &dyn DataMatrix, b: &dyn DataMatrix) -> bool {
    a.rows() == b.rows()
        && a.cols() == b.cols()
        && (0..a.rows()).all(|r| (0..a.cols()).all(|c| a.get(r, c) == b.get(r, c)))
}

#[derive(Debug, Clone)]
pub enum VectorValue {
    Dense(DenseVector),
    Sparse(SparseVector),
}

impl VectorValue {
    fn inner(&self) -> &dyn DataVector {
        match self {
            VectorValue::Dense(v) => v,
            VectorValue::Sparse(v) => v,
        }
    }

    pub fn into_dense(self) -> DenseVector {
        match self {
            VectorValue::Dense(v) => v,
            VectorValue::Sparse(v) => v.to_dense(),
        }
    }
}

impl From<DenseVector> for VectorValue {
    fn from(v: DenseVector) -> Self {
        VectorValue::Dense(v)
    }
}

impl From<SparseVector> for VectorValue {
    fn from(v: SparseVector) -> Self {
        VectorValue::Sparse(v)
    }
}

impl PartialEq for VectorValue {
    fn eq(&self, other: &Self) -> bool {
        vectors_equal(self, other)
    }
}

impl DataObject for VectorValue {
    fn dims(&self) -> Dims {
        self.inner().dims()
    }

    fn kind(&self) -> Kind {
        self.inner().kind()
    }

    fn capabilities(&self) -> Capabilities {
        self.inner().capabilities()
    }

    fn as_vector(&self) -> Option<&dyn DataVector> {
        Some(self)
    }
}

impl DataVector for VectorValue {
    fn len(&self) -> usize {
        self.inner().len()
    }

    fn get(&self, i: usize) -> f64 {
        self.inner().get(i)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = f64> + '_> {
        self.inner().iter()
    }

    fn nonzeros(&self) -> Box<dyn Iterator<Item = (usize, f64)> + '_> {
        self.inner().nonzeros()
    }

    fn sum(&self) -> f64 {
        self.inner().sum()
    }

    fn norm(&self) -> f64 {
        self.inner().norm()
    }

    fn to_dense(&self) -> DenseVector {
        self.inner().to_dense()
    }

    fn as_flat(&self) -> Option<&[f64]> {
        self.inner().as_flat()
    }

    fn as_sparse_parts(&self) -> Option<SparseParts<'_>> {
        self.inner().as_sparse_parts()
    }
}

impl fmt::Display for VectorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision();
        display::write_vector(f, self, precision)
    }
}

#[derive(Debug, Clone)]
pub enum MatrixValue {
    Dense(DenseMatrix),
    Sparse(SparseMatrix),
}

impl MatrixValue {
    fn inner(&self) -> &dyn DataMatrix {
        match self {
            MatrixValue::Dense(m) => m,
            MatrixValue::Sparse(m) => m,
        }
    }

    pub fn into_dense(self) -> DenseMatrix {
        match self {
            MatrixValue::Dense(m) => m,
            MatrixValue::Sparse(m) => m.to_dense(),
        }
    }
}

impl From<DenseMatrix> for MatrixValue {
    fn from(m: DenseMatrix) -> Self {
        MatrixValue::Dense(m)
    }
}

impl From<SparseMatrix> for MatrixValue {
    fn from(m: SparseMatrix) -> Self {
        MatrixValue::Sparse(m)
    }
}

impl PartialEq for MatrixValue {
    fn eq(&self, other: &Self) -> bool {
        matrices_equal(self, other)
    }
}

impl DataObject for MatrixValue {
    fn dims(&self) -> Dims {
        self.inner().dims()
    }

    fn kind(&self) -> Kind {
        self.inner().kind()
    }

    fn capabilities(&self) -> Capabilities {
        self.inner().capabilities()
    }

    fn as_matrix(&self) -> Option<&dyn DataMatrix> {
        Some(self)
    }
}

impl DataMatrix for MatrixValue {
    fn rows(&self) -> usize {
        self.inner().rows()
    }

    fn cols(&self) -> usize {
        self.inner().cols()
    }

    fn get(&self, r: usize, c: usize) -> f64 {
        self.inner().get(r, c)
    }

    fn nonzeros(&self) -> Box<dyn Iterator<Item = (usize, usize, f64)> + '_> {
        self.inner().nonzeros()
    }

    fn row(&self, r: usize) -> DenseVector {
        self.inner().row(r)
    }

    fn column(&self, c: usize) -> DenseVector {
        self.inner().column(c)
    }

    fn sum(&self) -> f64 {
        self.inner().sum()
    }

    fn norm(&self) -> f64 {
        self.inner().norm()
    }

    fn dot_rows(&self, v: &dyn DataVector) -> Result<DenseVector> {
        self.inner().dot_rows(v)
    }

    fn dot_columns(&self, v: &dyn DataVector) -> Result<DenseVector> {
        self.inner().dot_columns(v)
    }

    fn as_flat(&self) -> Option<&[f64]> {
        self.inner().as_flat()
    }

    fn as_csr_parts(&self) -> Option<CsrParts<'_>> {
        self.inner().as_csr_parts()
    }
}

impl fmt::Display for MatrixValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision();
        display::write_matrix(f, self, precision)
    }
}

/// Any owned numeric result.
#[derive(Debug, Clone, PartialEq)]
pub enum Numeric {
    Scalar(Scalar),
    Vector(VectorValue),
    Matrix(MatrixValue),
}

impl Numeric {
    pub fn as_object(&self) -> &dyn DataObject {
        match self {
            Numeric::Scalar(s) => s,
            Numeric::Vector(v) => v,
            Numeric::Matrix(m) => m,
        }
    }

    pub fn into_scalar(self) -> Option<Scalar> {
        match self {
            Numeric::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn into_vector(self) -> Option<VectorValue> {
        match self {
            Numeric::Vector(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_matrix(self) -> Option<MatrixValue> {
        match self {
            Numeric::Matrix(m) => Some(m),
            _ => None,
        }
    }
}

impl DataObject for Numeric {
    fn dims(&self) -> Dims {
        self.as_object().dims()
    }

    fn kind(&self) -> Kind {
        self.as_object().kind()
    }

    fn capabilities(&self) -> Capabilities {
        self.as_object().capabilities()
    }

    fn as_scalar(&self) -> Option<&dyn DataScalar> {
        self.as_object().as_scalar()
    }

    fn as_vector(&self) -> Option<&dyn DataVector> {
        self.as_object().as_vector()
    }

    fn as_matrix(&self) -> Option<&dyn DataMatrix> {
        self.as_object().as_matrix()
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision();
        display::write_object(f, self.as_object(), precision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_compare_across_storage() {
        let d = VectorValue::from(DenseVector::from(vec![0.0, 2.0, 0.0]));
        let s = VectorValue::from(SparseVector::new(3, &[1], &[2.0]).unwrap());
        assert_eq!(d, s);
        assert_ne!(d, VectorValue::from(DenseVector::zeros(3)));
        assert_eq!(s.kind(), Kind::Sparse);
    }

    #[test]
    fn matrix_values_compare_across_storage() {
        let d = DenseMatrix::identity(2);
        let s = SparseMatrix::from_dense(&d);
        assert_eq!(MatrixValue::from(d), MatrixValue::from(s));
    }

    #[test]
    fn numeric_unwraps() {
        let n = Numeric::Scalar(Scalar(2.0));
        assert_eq!(n.dims(), Dims::Scalar);
        assert_eq!(n.as_scalar().map(|s| s.value()), Some(2.0));
        assert!(n.into_vector().is_none());
    }
}
