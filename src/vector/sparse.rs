//! Sparse vector: sorted non-zero indices paired with their values.

use std::fmt;

use crate::config::options::DuplicatePolicy;
use crate::core::kind::{Capabilities, Dims, Kind};
use crate::core::traits::{DataObject, DataVector, SparseParts};
use crate::error::{NumericError, Result};
use crate::utils::display;
use crate::vector::DenseVector;

/// Only explicitly set elements are stored.
///
/// Invariant: `indices` is strictly increasing, every index is `< len`, and
/// `indices.len() == values.len()`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SparseVector {
    len: usize,
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl SparseVector {
    /// Build from `(indices, values)` over a vector of length `len`.
    ///
    /// Indices need not be sorted. A repeated index is rejected with
    /// [`NumericError::DuplicateIndex`]; use [`SparseVector::with_policy`] to
    /// accumulate or keep the last value instead.
    pub fn new(len: usize, indices: &[usize], values: &[f64]) -> Result<Self> {
        Self::with_policy(len, indices, values, DuplicatePolicy::Reject)
    }

    pub fn with_policy(
        len: usize,
        indices: &[usize],
        values: &[f64],
        policy: DuplicatePolicy,
    ) -> Result<Self> {
        if indices.len() != values.len() {
            return Err(NumericError::mismatch(
                "sparse_vector",
                Dims::Vector(indices.len()),
                Dims::Vector(values.len()),
            ));
        }
        if let Some(&index) = indices.iter().find(|&&i| i >= len) {
            return Err(NumericError::IndexOutOfRange { index, len });
        }
        // stable: equal indices keep their input order
        let mut pairs: Vec<(usize, f64)> = indices.iter().copied().zip(values.iter().copied()).collect();
        pairs.sort_by_key(|&(i, _)| i);

        let mut out_idx: Vec<usize> = Vec::with_capacity(pairs.len());
        let mut out_val: Vec<f64> = Vec::with_capacity(pairs.len());
        for (i, v) in pairs {
            if out_idx.last() == Some(&i) {
                let last = out_val.len() - 1;
                match policy {
                    DuplicatePolicy::Reject => return Err(NumericError::DuplicateIndex(i)),
                    DuplicatePolicy::Accumulate => out_val[last] += v,
                    DuplicatePolicy::LastWins => out_val[last] = v,
                }
            } else {
                out_idx.push(i);
                out_val.push(v);
            }
        }
        Ok(Self { len, indices: out_idx, values: out_val })
    }

    /// All-zero vector of length `len`.
    pub fn zeros(len: usize) -> Self {
        Self { len, indices: Vec::new(), values: Vec::new() }
    }

    /// Keep only the non-zero entries of `data`.
    pub fn from_dense(data: &[f64]) -> Self {
        let (indices, values) = data
            .iter()
            .copied()
            .enumerate()
            .filter(|&(_, v)| v != 0.0)
            .unzip();
        Self { len: data.len(), indices, values }
    }

    /// Collect an index-ordered stream of `(index, value)` pairs.
    pub(crate) fn from_sorted(len: usize, entries: impl IntoIterator<Item = (usize, f64)>) -> Self {
        let (indices, values): (Vec<usize>, Vec<f64>) = entries.into_iter().unzip();
        debug_assert!(indices.windows(2).all(|w| w[0] < w[1]));
        debug_assert!(indices.last().is_none_or(|&i| i < len));
        Self { len, indices, values }
    }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    pub fn density(&self) -> f64 {
        if self.len == 0 { 0.0 } else { self.nnz() as f64 / self.len as f64 }
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn parts(&self) -> SparseParts<'_> {
        SparseParts { len: self.len, indices: &self.indices, values: &self.values }
    }
}

impl DataObject for SparseVector {
    fn dims(&self) -> Dims {
        Dims::Vector(self.len)
    }

    fn kind(&self) -> Kind {
        Kind::Sparse
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::SORTED_INDICES
    }

    fn as_vector(&self) -> Option<&dyn DataVector> {
        Some(self)
    }
}

impl DataVector for SparseVector {
    fn len(&self) -> usize {
        self.len
    }

    fn get(&self, i: usize) -> f64 {
        match self.indices.binary_search(&i) {
            Ok(pos) => self.values[pos],
            Err(_) => 0.0,
        }
    }

    fn iter(&self) -> Box<dyn Iterator<Item = f64> + '_> {
        let mut stored = self.indices.iter().copied().zip(self.values.iter().copied()).peekable();
        Box::new((0..self.len).map(move |i| match stored.peek() {
            Some(&(j, v)) if j == i => {
                stored.next();
                v
            }
            _ => 0.0,
        }))
    }

    fn nonzeros(&self) -> Box<dyn Iterator<Item = (usize, f64)> + '_> {
        Box::new(
            self.indices
                .iter()
                .copied()
                .zip(self.values.iter().copied())
                .filter(|&(_, v)| v != 0.0),
        )
    }

    fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    fn norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    fn to_dense(&self) -> DenseVector {
        let mut data = vec![0.0; self.len];
        for (&i, &v) in self.indices.iter().zip(&self.values) {
            data[i] = v;
        }
        DenseVector::from(data)
    }

    fn as_sparse_parts(&self) -> Option<SparseParts<'_>> {
        Some(self.parts())
    }
}

impl fmt::Display for SparseVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision();
        display::write_vector(f, self, precision)
    }
}
