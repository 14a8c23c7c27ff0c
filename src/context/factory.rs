//! Construction entry points for numeric objects.
//!
//! `NumericFactory` builds dense objects from literal arrays and sparse objects
//! from `(length, indices, values)` or triplets, applying the configured
//! duplicate-index policy. Collaborators that only hold a factory never need to
//! name a concrete storage type.

use std::sync::Arc;

use tracing::trace;

use crate::config::options::{DuplicatePolicy, NumericOptions};
use crate::core::scalar::Scalar;
use crate::error::Result;
use crate::matrix::{DenseMatrix, MatrixBuilder, SharedMatrix, SparseMatrix, TransposedMatrix};
use crate::vector::{CompoundVector, DenseVector, SharedVector, SparseVector, VectorBuilder};

#[derive(Debug, Clone, Default)]
pub struct NumericFactory {
    options: NumericOptions,
}

impl NumericFactory {
    pub fn new(options: NumericOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &NumericOptions {
        &self.options
    }

    fn policy(&self) -> DuplicatePolicy {
        self.options.duplicates
    }

    pub fn scalar(&self, value: f64) -> Scalar {
        Scalar(value)
    }

    pub fn dense_vector(&self, data: &[f64]) -> DenseVector {
        DenseVector::from(data)
    }

    /// Sparse vector of length `len`. Indices must lie in `[0, len)`; they need
    /// not be sorted. Repeats are handled per the configured policy.
    pub fn sparse_vector(&self, len: usize, indices: &[usize], values: &[f64]) -> Result<SparseVector> {
        trace!(len, nnz = indices.len(), policy = ?self.policy(), "sparse vector");
        SparseVector::with_policy(len, indices, values, self.policy())
    }

    pub fn zeros(&self, len: usize) -> SparseVector {
        SparseVector::zeros(len)
    }

    /// Dense matrix from row-major data.
    pub fn dense_matrix(&self, rows: usize, cols: usize, data: &[f64]) -> Result<DenseMatrix> {
        DenseMatrix::new(rows, cols, data.to_vec())
    }

    pub fn dense_matrix_from_rows(&self, rows: &[Vec<f64>]) -> Result<DenseMatrix> {
        DenseMatrix::from_rows(rows)
    }

    pub fn sparse_matrix(&self, rows: usize, cols: usize, triplets: &[(usize, usize, f64)]) -> Result<SparseMatrix> {
        trace!(rows, cols, nnz = triplets.len(), "sparse matrix");
        SparseMatrix::from_triplets(rows, cols, triplets, self.policy())
    }

    pub fn vector_builder(&self, len: usize) -> VectorBuilder {
        VectorBuilder::zeros(len)
    }

    pub fn matrix_builder(&self, rows: usize, cols: usize) -> MatrixBuilder {
        MatrixBuilder::zeros(rows, cols)
    }

    /// Parts laid end to end, without copying.
    pub fn concat(&self, parts: Vec<SharedVector>) -> CompoundVector {
        CompoundVector::concat(parts)
    }

    pub fn scaled(&self, inner: SharedVector, factor: f64) -> CompoundVector {
        CompoundVector::scaled(inner, factor)
    }

    pub fn transposed(&self, inner: SharedMatrix) -> TransposedMatrix {
        TransposedMatrix::new(inner)
    }

    /// Convenience for sharing a finished vector between compound views.
    pub fn share<V: crate::core::traits::DataVector + Send + Sync + 'static>(&self, v: V) -> SharedVector {
        Arc::new(v)
    }
}
