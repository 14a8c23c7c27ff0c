//! Feature vectors for downstream classifiers.
//!
//! A `FeatureVector` is an immutable vector value, built from a dense literal
//! or from sparse `(indices, values)` over an explicit length. Arithmetic goes
//! through the standard engine, so the storage of the result is whatever the
//! kernels choose; equality compares elements only.

use std::fmt;
use std::ops;

use crate::context::Numerics;
use crate::core::kind::{Capabilities, Dims, Kind};
use crate::core::traits::{DataObject, DataVector, SparseParts};
use crate::core::value::VectorValue;
use crate::error::Result;
use crate::utils::display;
use crate::vector::{DenseVector, SparseVector};

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    value: VectorValue,
}

impl FeatureVector {
    pub fn dense(data: Vec<f64>) -> Self {
        Self { value: DenseVector::from(data).into() }
    }

    /// Sparse features; indices must be in range and must not repeat.
    pub fn sparse(len: usize, indices: &[usize], values: &[f64]) -> Result<Self> {
        Ok(Self { value: SparseVector::new(len, indices, values)?.into() })
    }

    /// A single `1.0` at `position`, or all zeros when `position` is `None`.
    pub fn one_hot(len: usize, position: Option<usize>) -> Self {
        let entries = position.filter(|&p| p < len).map(|p| (p, 1.0));
        Self { value: SparseVector::from_sorted(len, entries).into() }
    }

    /// Copy any vector into a feature vector, keeping sparse storage sparse.
    pub fn from_vector(v: &dyn DataVector) -> Self {
        let value: VectorValue = match v.as_sparse_parts() {
            Some(SparseParts { len, indices, values }) => {
                SparseVector::from_sorted(len, indices.iter().copied().zip(values.iter().copied())).into()
            }
            None => v.to_dense().into(),
        };
        Self { value }
    }

    /// Parts laid end to end.
    pub fn concat(parts: &[&FeatureVector]) -> Self {
        let len = parts.iter().map(|p| p.length()).sum();
        let mut offset = 0;
        let mut entries = Vec::new();
        for p in parts {
            entries.extend(p.nonzeros().map(|(i, x)| (offset + i, x)));
            offset += p.length();
        }
        let sparse = SparseVector::from_sorted(len, entries);
        if sparse.density() > Numerics::standard().options().densify_above {
            Self { value: sparse.to_dense().into() }
        } else {
            Self { value: sparse.into() }
        }
    }

    pub fn length(&self) -> usize {
        self.value.len()
    }

    pub fn value(&self) -> &VectorValue {
        &self.value
    }

    pub fn into_value(self) -> VectorValue {
        self.value
    }

    pub fn add(&self, other: &FeatureVector) -> Result<FeatureVector> {
        Numerics::standard().add_vectors(self, other).map(Self::from)
    }

    pub fn subtract(&self, other: &FeatureVector) -> Result<FeatureVector> {
        Numerics::standard().subtract_vectors(self, other).map(Self::from)
    }

    pub fn scale(&self, k: f64) -> FeatureVector {
        Numerics::standard().scale_vector(self, k).into()
    }

    pub fn dot(&self, other: &FeatureVector) -> Result<f64> {
        Numerics::standard().dot_vectors(self, other)
    }

    fn combine(&self, other: &FeatureVector, beta: f64, op: &str) -> FeatureVector {
        assert_eq!(self.length(), other.length(), "feature vectors must have the same length to {op}");
        Numerics::standard().combine_vectors(self, other, beta).into()
    }
}

impl From<VectorValue> for FeatureVector {
    fn from(value: VectorValue) -> Self {
        Self { value }
    }
}

impl From<DenseVector> for FeatureVector {
    fn from(v: DenseVector) -> Self {
        Self { value: v.into() }
    }
}

impl From<SparseVector> for FeatureVector {
    fn from(v: SparseVector) -> Self {
        Self { value: v.into() }
    }
}

impl DataObject for FeatureVector {
    fn dims(&self) -> Dims {
        self.value.dims()
    }

    fn kind(&self) -> Kind {
        self.value.kind()
    }

    fn capabilities(&self) -> Capabilities {
        self.value.capabilities()
    }

    fn as_vector(&self) -> Option<&dyn DataVector> {
        Some(self)
    }
}

impl DataVector for FeatureVector {
    fn len(&self) -> usize {
        self.value.len()
    }

    fn get(&self, i: usize) -> f64 {
        self.value.get(i)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = f64> + '_> {
        self.value.iter()
    }

    fn nonzeros(&self) -> Box<dyn Iterator<Item = (usize, f64)> + '_> {
        self.value.nonzeros()
    }

    fn norm(&self) -> f64 {
        self.value.norm()
    }

    fn to_dense(&self) -> DenseVector {
        self.value.to_dense()
    }

    fn as_flat(&self) -> Option<&[f64]> {
        self.value.as_flat()
    }

    fn as_sparse_parts(&self) -> Option<SparseParts<'_>> {
        self.value.as_sparse_parts()
    }
}

impl fmt::Display for FeatureVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision();
        display::write_vector(f, self, precision)
    }
}

// Operators panic on a length mismatch, like a matrix-vector product with
// wrong dimensions. Use `add`/`subtract` for the checked forms.

impl ops::Add<&FeatureVector> for &FeatureVector {
    type Output = FeatureVector;

    fn add(self, rhs: &FeatureVector) -> FeatureVector {
        self.combine(rhs, 1.0, "add")
    }
}

impl ops::Add for FeatureVector {
    type Output = FeatureVector;

    fn add(self, rhs: FeatureVector) -> FeatureVector {
        &self + &rhs
    }
}

impl ops::Sub<&FeatureVector> for &FeatureVector {
    type Output = FeatureVector;

    fn sub(self, rhs: &FeatureVector) -> FeatureVector {
        self.combine(rhs, -1.0, "subtract")
    }
}

impl ops::Sub for FeatureVector {
    type Output = FeatureVector;

    fn sub(self, rhs: FeatureVector) -> FeatureVector {
        &self - &rhs
    }
}

impl ops::Mul<f64> for &FeatureVector {
    type Output = FeatureVector;

    fn mul(self, k: f64) -> FeatureVector {
        self.scale(k)
    }
}

impl ops::Mul<f64> for FeatureVector {
    type Output = FeatureVector;

    fn mul(self, k: f64) -> FeatureVector {
        self.scale(k)
    }
}

impl ops::Mul<&FeatureVector> for f64 {
    type Output = FeatureVector;

    fn mul(self, v: &FeatureVector) -> FeatureVector {
        v.scale(self)
    }
}

impl ops::Mul<FeatureVector> for f64 {
    type Output = FeatureVector;

    fn mul(self, v: FeatureVector) -> FeatureVector {
        v.scale(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NumericError;

    fn f1() -> FeatureVector {
        FeatureVector::sparse(6, &[1, 2], &[1.0, 1.0]).unwrap()
    }

    fn f2() -> FeatureVector {
        FeatureVector::sparse(6, &[0, 2, 5], &[1.0, 1.0, 1.0]).unwrap()
    }

    #[test]
    fn sparse_arithmetic() {
        let (f1, f2) = (f1(), f2());
        assert_eq!(f1.subtract(&f2).unwrap(), FeatureVector::dense(vec![-1.0, 1.0, 0.0, 0.0, 0.0, -1.0]));
        assert_eq!(f1.add(&f2).unwrap(), FeatureVector::dense(vec![1.0, 1.0, 2.0, 0.0, 0.0, 1.0]));
        assert_eq!(0.5 * ((&f1 + &f2) + (&f1 - &f2)), f1);
    }

    #[test]
    fn mismatched_lengths() {
        let short = FeatureVector::dense(vec![1.0; 5]);
        assert!(matches!(f1().add(&short), Err(NumericError::ShapeMismatch { .. })));
        assert!(f1().dot(&short).is_err());
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn operator_panics_on_mismatch() {
        let _ = &f1() + &FeatureVector::dense(vec![0.0]);
    }

    #[test]
    fn scale_never_fails() {
        let z = f2().scale(0.0);
        assert_eq!(z.length(), 6);
        assert_eq!(z.norm(), 0.0);
        assert_eq!(&f2() * 2.0, FeatureVector::sparse(6, &[0, 2, 5], &[2.0, 2.0, 2.0]).unwrap());
    }

    #[test]
    fn concat_and_one_hot() {
        let c = FeatureVector::concat(&[&FeatureVector::one_hot(3, Some(2)), &FeatureVector::one_hot(2, None), &f1()]);
        assert_eq!(c.length(), 11);
        assert_eq!(c.nonzeros().collect::<Vec<_>>(), vec![(2, 1.0), (6, 1.0), (7, 1.0)]);
        assert!(c.is_sparse());
        assert_eq!(FeatureVector::one_hot(2, Some(5)).nonzeros().count(), 0);
    }

    #[test]
    fn from_vector_keeps_storage() {
        assert!(FeatureVector::from_vector(&f2()).is_sparse());
        assert!(FeatureVector::from_vector(&DenseVector::zeros(2)).is_dense());
        assert_eq!(format!("{}", f1()), "[0, 1, 1, 0, 0, 0]");
    }
}
