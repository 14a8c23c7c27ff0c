//! Dense‐matrix storage with Faer interop.
//!
//! `DenseMatrix` keeps its elements in one row-major block, so row access and the
//! flat-array kernels work on plain slices. Conversions to and from `faer::Mat`
//! let callers hand the data to Faer's dense linear algebra, and `matmul` goes
//! through Faer directly.

use std::fmt;

use faer::Mat;

use crate::config::options::DEFAULT_PARALLEL_THRESHOLD;
use crate::core::kind::{Capabilities, Dims, Kind};
use crate::core::traits::{DataMatrix, DataObject, DataVector, FlatArrayMatrix};
use crate::error::{NumericError, Result};
use crate::kernel::dense::{dot_slices, sum_squares};
use crate::utils::display;
use crate::vector::DenseVector;

#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl DenseMatrix {
    /// Construct from raw row-major storage.
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(NumericError::mismatch(
                "dense_matrix",
                Dims::Matrix(rows, cols),
                Dims::Vector(data.len()),
            ));
        }
        Ok(Self { rows, cols, data })
    }

    /// Construct from raw column-major storage.
    pub fn from_column_major(rows: usize, cols: usize, data: &[f64]) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(NumericError::mismatch(
                "dense_matrix",
                Dims::Matrix(rows, cols),
                Dims::Vector(data.len()),
            ));
        }
        Ok(Self::from_fn(rows, cols, |i, j| data[j * rows + i]))
    }

    /// Construct from equally long rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            if row.len() != cols {
                return Err(NumericError::mismatch(
                    "dense_matrix",
                    Dims::Vector(cols),
                    Dims::Vector(row.len()),
                ));
            }
            data.extend_from_slice(row);
        }
        Ok(Self { rows: rows.len(), cols, data })
    }

    pub fn from_fn(rows: usize, cols: usize, f: impl Fn(usize, usize) -> f64) -> Self {
        let data = (0..rows * cols).map(|k| f(k / cols, k % cols)).collect();
        Self { rows, cols, data }
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self { rows, cols, data: vec![0.0; rows * cols] }
    }

    pub fn identity(n: usize) -> Self {
        Self::from_fn(n, n, |i, j| if i == j { 1.0 } else { 0.0 })
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    pub fn transpose(&self) -> DenseMatrix {
        Self::from_fn(self.cols, self.rows, |i, j| self.data[j * self.cols + i])
    }

    /// Copy into a Faer matrix.
    pub fn to_faer(&self) -> Mat<f64> {
        Mat::from_fn(self.rows, self.cols, |i, j| self.data[i * self.cols + j])
    }

    pub fn from_faer(m: &Mat<f64>) -> Self {
        Self::from_fn(m.nrows(), m.ncols(), |i, j| m[(i, j)])
    }

    /// Matrix product `self · other`, computed by Faer.
    pub fn matmul(&self, other: &DenseMatrix) -> Result<DenseMatrix> {
        if self.cols != other.rows {
            return Err(NumericError::mismatch("matmul", self.dims(), other.dims()));
        }
        let product = &self.to_faer() * &other.to_faer();
        Ok(Self::from_faer(&product))
    }
}

impl DataObject for DenseMatrix {
    fn dims(&self) -> Dims {
        Dims::Matrix(self.rows, self.cols)
    }

    fn kind(&self) -> Kind {
        Kind::Dense
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::FLAT_ROW_MAJOR
    }

    fn as_matrix(&self) -> Option<&dyn DataMatrix> {
        Some(self)
    }
}

impl DataMatrix for DenseMatrix {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn get(&self, r: usize, c: usize) -> f64 {
        if r < self.rows && c < self.cols { self.data[r * self.cols + c] } else { 0.0 }
    }

    fn row(&self, r: usize) -> DenseVector {
        if r < self.rows {
            DenseVector::from(self.row_slice(r))
        } else {
            DenseVector::zeros(self.cols)
        }
    }

    fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    fn norm(&self) -> f64 {
        sum_squares(&self.data, DEFAULT_PARALLEL_THRESHOLD).sqrt()
    }

    fn dot_rows(&self, v: &dyn DataVector) -> Result<DenseVector> {
        if v.len() != self.cols {
            return Err(NumericError::mismatch("dot_rows", self.dims(), v.dims()));
        }
        let x = v.to_dense();
        Ok((0..self.rows)
            .map(|r| dot_slices(self.row_slice(r), x.as_slice(), DEFAULT_PARALLEL_THRESHOLD))
            .collect())
    }

    fn dot_columns(&self, v: &dyn DataVector) -> Result<DenseVector> {
        if v.len() != self.rows {
            return Err(NumericError::mismatch("dot_columns", self.dims(), v.dims()));
        }
        let mut out = vec![0.0; self.cols];
        for (r, a) in v.nonzeros() {
            for (o, &m) in out.iter_mut().zip(self.row_slice(r)) {
                *o += a * m;
            }
        }
        Ok(DenseVector::from(out))
    }

    fn as_flat(&self) -> Option<&[f64]> {
        Some(&self.data)
    }
}

impl FlatArrayMatrix for DenseMatrix {
    fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

impl fmt::Display for DenseMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision();
        display::write_matrix(f, self, precision)
    }
}
