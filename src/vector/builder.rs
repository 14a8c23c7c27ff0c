//! Mutable vector handle, finished into an immutable value.

use crate::core::kind::{Capabilities, Dims, Kind};
use crate::core::traits::{DataObject, DataVector, FlatArray, SettableVector};
use crate::error::{NumericError, Result};
use crate::vector::{DenseVector, SparseVector};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct VectorBuilder {
    data: Vec<f64>,
}

impl VectorBuilder {
    pub fn zeros(len: usize) -> Self {
        Self { data: vec![0.0; len] }
    }

    /// Start from a copy of any vector.
    pub fn from_vector(src: &dyn DataVector) -> Self {
        Self { data: src.iter().collect() }
    }

    /// Add `v` to element `i`; ignored when out of range.
    pub fn add_at(&mut self, i: usize, v: f64) {
        if let Some(x) = self.data.get_mut(i) {
            *x += v;
        }
    }

    pub fn build(self) -> DenseVector {
        DenseVector::from(self.data)
    }

    pub fn build_sparse(self) -> SparseVector {
        SparseVector::from_dense(&self.data)
    }
}

impl DataObject for VectorBuilder {
    fn dims(&self) -> Dims {
        Dims::Vector(self.data.len())
    }

    fn kind(&self) -> Kind {
        Kind::Dense
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::FLAT_ARRAY | Capabilities::SETTABLE
    }

    fn as_vector(&self) -> Option<&dyn DataVector> {
        Some(self)
    }
}

impl DataVector for VectorBuilder {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn get(&self, i: usize) -> f64 {
        self.data.get(i).copied().unwrap_or(0.0)
    }

    fn as_flat(&self) -> Option<&[f64]> {
        Some(&self.data)
    }
}

impl FlatArray for VectorBuilder {
    fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

impl SettableVector for VectorBuilder {
    fn set(&mut self, i: usize, v: f64) {
        if let Some(x) = self.data.get_mut(i) {
            *x = v;
        }
    }

    fn set_all(&mut self, src: &dyn DataVector) -> Result<()> {
        if src.len() != self.data.len() {
            return Err(NumericError::mismatch("set_all", self.dims(), src.dims()));
        }
        for (x, v) in self.data.iter_mut().zip(src.iter()) {
            *x = v;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_out_of_range_is_ignored() {
        let mut b = VectorBuilder::zeros(3);
        b.set(1, 4.0);
        b.set(3, 9.0);
        b.add_at(1, 1.0);
        b.add_at(7, 1.0);
        assert_eq!(b.build().as_slice(), &[0.0, 5.0, 0.0]);
    }

    #[test]
    fn set_all_checks_length() {
        let mut b = VectorBuilder::zeros(2);
        let src = SparseVector::new(2, &[1], &[3.0]).unwrap();
        b.set_all(&src).unwrap();
        assert_eq!(b.get(1), 3.0);
        assert!(b.set_all(&DenseVector::zeros(3)).is_err());
    }

    #[test]
    fn builder_reports_settable() {
        let b = VectorBuilder::zeros(1);
        assert!(b.capabilities().contains(Capabilities::SETTABLE));
        assert_eq!(b.build_sparse().nnz(), 0);
    }
}
