//! Mutable matrix handle, finished into an immutable value.

use crate::core::kind::{Capabilities, Dims, Kind};
use crate::core::traits::{DataMatrix, DataObject, DataVector, FlatArrayMatrix, SettableMatrix};
use crate::error::{NumericError, Result};
use crate::matrix::{DenseMatrix, SparseMatrix};

/// Row-major scratch matrix supporting element, row, column and whole-matrix writes.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixBuilder {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl MatrixBuilder {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self { rows, cols, data: vec![0.0; rows * cols] }
    }

    pub fn from_matrix(src: &dyn DataMatrix) -> Self {
        let mut b = Self::zeros(src.rows(), src.cols());
        for (r, c, v) in src.nonzeros() {
            b.data[r * b.cols + c] = v;
        }
        b
    }

    pub fn build(self) -> DenseMatrix {
        DenseMatrix::from_fn(self.rows, self.cols, |r, c| self.data[r * self.cols + c])
    }

    pub fn build_sparse(self) -> SparseMatrix {
        SparseMatrix::from_dense(&self.build())
    }
}

impl DataObject for MatrixBuilder {
    fn dims(&self) -> Dims {
        Dims::Matrix(self.rows, self.cols)
    }

    fn kind(&self) -> Kind {
        Kind::Dense
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::FLAT_ROW_MAJOR | Capabilities::SETTABLE
    }

    fn as_matrix(&self) -> Option<&dyn DataMatrix> {
        Some(self)
    }
}

impl DataMatrix for MatrixBuilder {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn get(&self, r: usize, c: usize) -> f64 {
        if r < self.rows && c < self.cols { self.data[r * self.cols + c] } else { 0.0 }
    }

    fn as_flat(&self) -> Option<&[f64]> {
        Some(&self.data)
    }
}

impl FlatArrayMatrix for MatrixBuilder {
    fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

impl SettableMatrix for MatrixBuilder {
    fn set(&mut self, r: usize, c: usize, v: f64) {
        if r < self.rows && c < self.cols {
            self.data[r * self.cols + c] = v;
        }
    }

    fn set_row(&mut self, r: usize, src: &dyn DataVector) -> Result<()> {
        if r >= self.rows {
            return Err(NumericError::IndexOutOfRange { index: r, len: self.rows });
        }
        if src.len() != self.cols {
            return Err(NumericError::mismatch("set_row", Dims::Vector(self.cols), src.dims()));
        }
        let cols = self.cols;
        for (x, v) in self.data[r * cols..(r + 1) * cols].iter_mut().zip(src.iter()) {
            *x = v;
        }
        Ok(())
    }

    fn set_column(&mut self, c: usize, src: &dyn DataVector) -> Result<()> {
        if c >= self.cols {
            return Err(NumericError::IndexOutOfRange { index: c, len: self.cols });
        }
        if src.len() != self.rows {
            return Err(NumericError::mismatch("set_column", Dims::Vector(self.rows), src.dims()));
        }
        for (r, v) in src.iter().enumerate() {
            self.data[r * self.cols + c] = v;
        }
        Ok(())
    }

    fn set_all(&mut self, src: &dyn DataMatrix) -> Result<()> {
        if src.dims() != self.dims() {
            return Err(NumericError::mismatch("set_all", self.dims(), src.dims()));
        }
        self.data.iter_mut().for_each(|x| *x = 0.0);
        for (r, c, v) in src.nonzeros() {
            self.data[r * self.cols + c] = v;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::{DenseVector, SparseVector};

    #[test]
    fn row_and_column_writes() {
        let mut b = MatrixBuilder::zeros(2, 3);
        b.set_row(0, &DenseVector::from(vec![1.0, 2.0, 3.0])).unwrap();
        b.set_column(2, &SparseVector::new(2, &[1], &[9.0]).unwrap()).unwrap();
        b.set(1, 0, 4.0);
        b.set(2, 0, 100.0);
        let m = b.build();
        assert_eq!(m.as_slice(), &[1.0, 2.0, 0.0, 4.0, 0.0, 9.0]);
    }

    #[test]
    fn whole_row_contract() {
        let mut b = MatrixBuilder::zeros(2, 2);
        assert!(matches!(
            b.set_row(2, &DenseVector::zeros(2)),
            Err(NumericError::IndexOutOfRange { index: 2, len: 2 })
        ));
        assert!(matches!(
            b.set_column(0, &DenseVector::zeros(3)),
            Err(NumericError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn set_all_replaces_everything() {
        let mut b = MatrixBuilder::zeros(2, 2);
        b.set(0, 1, 5.0);
        let src = DenseMatrix::identity(2);
        b.set_all(&src).unwrap();
        assert_eq!(b.build_sparse().nnz(), 2);
    }
}
