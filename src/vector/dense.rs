//! Flat array-backed vector.

use std::fmt;

use crate::config::options::DEFAULT_PARALLEL_THRESHOLD;
use crate::core::kind::{Capabilities, Dims, Kind};
use crate::core::traits::{DataObject, DataVector, FlatArray};
use crate::kernel::dense::{dot_slices, sum_squares};
use crate::utils::display;

/// Every element explicitly stored in one contiguous block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DenseVector {
    data: Vec<f64>,
}

impl DenseVector {
    pub fn new(data: Vec<f64>) -> Self {
        Self { data }
    }

    pub fn zeros(len: usize) -> Self {
        Self { data: vec![0.0; len] }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Plain slice dot product; lengths must match.
    pub fn dot_slice(&self, other: &[f64]) -> f64 {
        assert_eq!(self.data.len(), other.len(), "Vectors must have the same length");
        dot_slices(&self.data, other, DEFAULT_PARALLEL_THRESHOLD)
    }
}

impl From<Vec<f64>> for DenseVector {
    fn from(data: Vec<f64>) -> Self {
        Self { data }
    }
}

impl From<&[f64]> for DenseVector {
    fn from(data: &[f64]) -> Self {
        Self { data: data.to_vec() }
    }
}

impl FromIterator<f64> for DenseVector {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self { data: iter.into_iter().collect() }
    }
}

impl AsRef<[f64]> for DenseVector {
    fn as_ref(&self) -> &[f64] {
        &self.data
    }
}

impl DataObject for DenseVector {
    fn dims(&self) -> Dims {
        Dims::Vector(self.data.len())
    }

    fn kind(&self) -> Kind {
        Kind::Dense
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::FLAT_ARRAY
    }

    fn as_vector(&self) -> Option<&dyn DataVector> {
        Some(self)
    }
}

impl DataVector for DenseVector {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn get(&self, i: usize) -> f64 {
        self.data.get(i).copied().unwrap_or(0.0)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = f64> + '_> {
        Box::new(self.data.iter().copied())
    }

    fn nonzeros(&self) -> Box<dyn Iterator<Item = (usize, f64)> + '_> {
        Box::new(self.data.iter().copied().enumerate().filter(|&(_, v)| v != 0.0))
    }

    fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    fn norm(&self) -> f64 {
        sum_squares(&self.data, DEFAULT_PARALLEL_THRESHOLD).sqrt()
    }

    fn to_dense(&self) -> DenseVector {
        self.clone()
    }

    fn as_flat(&self) -> Option<&[f64]> {
        Some(&self.data)
    }
}

impl FlatArray for DenseVector {
    fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

impl fmt::Display for DenseVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision();
        display::write_vector(f, self, precision)
    }
}
