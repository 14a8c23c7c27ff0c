//! Element-wise fallbacks written purely against the public accessors.
//!
//! These are total: they handle any pair of operands with matching dimensions,
//! whatever their storage. Results are dense except where the only operand is
//! sparse (scaling keeps a sparse vector sparse).

use crate::core::kind::Kind;
use crate::core::traits::{DataMatrix, DataObject, DataVector};
use crate::core::value::{MatrixValue, VectorValue};
use crate::matrix::{DenseMatrix, SparseMatrix};
use crate::vector::{DenseVector, SparseVector};

pub fn vector_norm(v: &dyn DataVector) -> f64 {
    v.nonzeros().map(|(_, x)| x * x).sum::<f64>().sqrt()
}

pub fn vector_scale(v: &dyn DataVector, k: f64) -> VectorValue {
    if v.kind() == Kind::Sparse {
        let entries = v.nonzeros().map(|(i, x)| (i, k * x)).filter(|&(_, x)| x != 0.0);
        return SparseVector::from_sorted(v.len(), entries).into();
    }
    v.iter().map(|x| k * x).collect::<DenseVector>().into()
}

pub fn vector_dot(a: &dyn DataVector, b: &dyn DataVector) -> f64 {
    a.nonzeros().map(|(i, x)| x * b.get(i)).sum()
}

/// `a + beta * b`. Callers check that the lengths agree.
pub fn vector_combine(a: &dyn DataVector, b: &dyn DataVector, beta: f64) -> VectorValue {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| x + beta * y)
        .collect::<DenseVector>()
        .into()
}

pub fn matrix_norm(m: &dyn DataMatrix) -> f64 {
    m.nonzeros().map(|(_, _, x)| x * x).sum::<f64>().sqrt()
}

pub fn matrix_scale(m: &dyn DataMatrix, k: f64) -> MatrixValue {
    if m.kind() == Kind::Sparse {
        let triplets: Vec<_> = m.nonzeros().map(|(r, c, x)| (r, c, k * x)).collect();
        let mut row_ptr = vec![0; m.rows() + 1];
        let mut col_idx = Vec::with_capacity(triplets.len());
        let mut values = Vec::with_capacity(triplets.len());
        for (r, c, x) in triplets.into_iter().filter(|&(_, _, x)| x != 0.0) {
            row_ptr[r + 1] += 1;
            col_idx.push(c);
            values.push(x);
        }
        for r in 0..m.rows() {
            row_ptr[r + 1] += row_ptr[r];
        }
        return SparseMatrix::from_parts_unchecked(m.rows(), m.cols(), row_ptr, col_idx, values).into();
    }
    DenseMatrix::from_fn(m.rows(), m.cols(), |r, c| k * m.get(r, c)).into()
}

pub fn matrix_dot(a: &dyn DataMatrix, b: &dyn DataMatrix) -> f64 {
    a.nonzeros().map(|(r, c, x)| x * b.get(r, c)).sum()
}

pub fn matrix_combine(a: &dyn DataMatrix, b: &dyn DataMatrix, beta: f64) -> MatrixValue {
    DenseMatrix::from_fn(a.rows(), a.cols(), |r, c| a.get(r, c) + beta * b.get(r, c)).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::CompoundVector;
    use std::sync::Arc;

    #[test]
    fn mixed_storage_combine() {
        let d = DenseVector::from(vec![1.0, 2.0, 3.0]);
        let s = SparseVector::new(3, &[2], &[4.0]).unwrap();
        let r = vector_combine(&d, &s, -1.0);
        assert_eq!(r.iter().collect::<Vec<_>>(), vec![1.0, 2.0, -1.0]);
        assert!(r.is_dense());
        assert_eq!(vector_dot(&d, &s), 12.0);
    }

    #[test]
    fn scaling_keeps_sparse_vectors_sparse() {
        let s = SparseVector::new(4, &[1, 3], &[2.0, -1.0]).unwrap();
        let r = vector_scale(&s, 3.0);
        assert!(r.is_sparse());
        assert_eq!(r.iter().collect::<Vec<_>>(), vec![0.0, 6.0, 0.0, -3.0]);
        assert_eq!(vector_scale(&s, 0.0).nonzeros().count(), 0);
    }

    #[test]
    fn compound_operands_use_accessors() {
        let c = CompoundVector::scaled(Arc::new(DenseVector::from(vec![3.0, 4.0])), 2.0);
        assert_eq!(vector_norm(&c), 10.0);
        assert!(vector_scale(&c, 0.5).is_dense());
    }

    #[test]
    fn sparse_matrix_scale_rebuilds_csr() {
        let m = SparseMatrix::from_dense(&DenseMatrix::from_rows(&[vec![0.0, 1.0], vec![2.0, 0.0]]).unwrap());
        let r = matrix_scale(&m, -2.0);
        assert!(r.is_sparse());
        assert_eq!(r.get(0, 1), -2.0);
        assert_eq!(r.get(1, 0), -4.0);
        assert_eq!(matrix_dot(&m, &m), 5.0);
        assert_eq!(matrix_norm(&m), 5.0f64.sqrt());
    }
}
