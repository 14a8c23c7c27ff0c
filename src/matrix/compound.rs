//! Transpose view over a shared matrix.

use std::sync::Arc;

use crate::core::kind::{Dims, Kind};
use crate::core::traits::{DataMatrix, DataObject, DataVector};
use crate::error::Result;
use crate::vector::DenseVector;

pub type SharedMatrix = Arc<dyn DataMatrix + Send + Sync>;

/// `innerᵀ`, without copying.
#[derive(Debug, Clone)]
pub struct TransposedMatrix {
    inner: SharedMatrix,
}

impl TransposedMatrix {
    pub fn new(inner: SharedMatrix) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &SharedMatrix {
        &self.inner
    }
}

impl DataObject for TransposedMatrix {
    fn dims(&self) -> Dims {
        Dims::Matrix(self.inner.cols(), self.inner.rows())
    }

    fn kind(&self) -> Kind {
        Kind::Compound
    }

    fn as_matrix(&self) -> Option<&dyn DataMatrix> {
        Some(self)
    }
}

impl DataMatrix for TransposedMatrix {
    fn rows(&self) -> usize {
        self.inner.cols()
    }

    fn cols(&self) -> usize {
        self.inner.rows()
    }

    fn get(&self, r: usize, c: usize) -> f64 {
        self.inner.get(c, r)
    }

    fn row(&self, r: usize) -> DenseVector {
        self.inner.column(r)
    }

    fn column(&self, c: usize) -> DenseVector {
        self.inner.row(c)
    }

    fn sum(&self) -> f64 {
        self.inner.sum()
    }

    fn dot_rows(&self, v: &dyn DataVector) -> Result<DenseVector> {
        self.inner.dot_columns(v)
    }

    fn dot_columns(&self, v: &dyn DataVector) -> Result<DenseVector> {
        self.inner.dot_rows(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::DenseMatrix;

    #[test]
    fn transpose_view_swaps_axes() {
        let m = DenseMatrix::new(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let t = TransposedMatrix::new(Arc::new(m.clone()));
        assert_eq!(t.dims(), Dims::Matrix(3, 2));
        assert!(t.is_compound());
        for r in 0..3 {
            for c in 0..2 {
                assert_eq!(t.get(r, c), m.get(c, r));
            }
        }
        assert_eq!(t.row(2).as_slice(), &[3.0, 6.0]);
        let y = t.dot_rows(&DenseVector::from(vec![1.0, 1.0])).unwrap();
        assert_eq!(y.as_slice(), &[5.0, 7.0, 9.0]);
        assert!(t.dot_rows(&DenseVector::zeros(3)).is_err());
    }
}
