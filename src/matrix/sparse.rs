// Sparse matrix in CSR layout

use faer::sparse::{
    SparseRowMat,         // owning numeric CSR alias
    SymbolicSparseRowMat, // owning symbolic CSR alias
};

use crate::config::options::{DEFAULT_PARALLEL_THRESHOLD, DuplicatePolicy};
use crate::core::kind::{Capabilities, Dims, Kind};
use crate::core::traits::{CsrParts, DataMatrix, DataObject, DataVector};
use crate::error::{NumericError, Result};
use crate::matrix::DenseMatrix;
use crate::vector::{DenseVector, SparseVector};

/// Compressed sparse row matrix.
///
/// Memory layout:
/// - `row_ptr`: `[rows + 1]` offsets into `col_idx`/`values`
/// - `col_idx`: `[nnz]` column indices, strictly increasing within each row
/// - `values`: `[nnz]` stored values
#[derive(Debug, Clone, PartialEq)]
pub struct SparseMatrix {
    rows: usize,
    cols: usize,
    row_ptr: Vec<usize>,
    col_idx: Vec<usize>,
    values: Vec<f64>,
}

impl SparseMatrix {
    /// Build a CSR from raw row‐ptr, col‐idx, and values.
    ///
    /// Column indices within a row may come in any order; a repeated
    /// `(row, col)` pair is rejected.
    pub fn from_csr(
        rows: usize,
        cols: usize,
        row_ptr: Vec<usize>,
        col_idx: Vec<usize>,
        values: Vec<f64>,
    ) -> Result<Self> {
        if row_ptr.len() != rows + 1 {
            return Err(NumericError::mismatch(
                "sparse_matrix",
                Dims::Vector(rows + 1),
                Dims::Vector(row_ptr.len()),
            ));
        }
        if col_idx.len() != values.len() {
            return Err(NumericError::mismatch(
                "sparse_matrix",
                Dims::Vector(col_idx.len()),
                Dims::Vector(values.len()),
            ));
        }
        if row_ptr[0] != 0 || row_ptr[rows] != values.len() || row_ptr.windows(2).any(|w| w[0] > w[1]) {
            return Err(NumericError::InvalidArgument(
                "row pointers must start at 0, be non-decreasing and end at nnz".into(),
            ));
        }
        let mut triplets = Vec::with_capacity(values.len());
        for r in 0..rows {
            for k in row_ptr[r]..row_ptr[r + 1] {
                triplets.push((r, col_idx[k], values[k]));
            }
        }
        Self::from_triplets(rows, cols, &triplets, DuplicatePolicy::Reject)
    }

    /// Build from `(row, col, value)` triplets in any order.
    pub fn from_triplets(
        rows: usize,
        cols: usize,
        triplets: &[(usize, usize, f64)],
        policy: DuplicatePolicy,
    ) -> Result<Self> {
        for &(r, c, _) in triplets {
            if r >= rows {
                return Err(NumericError::IndexOutOfRange { index: r, len: rows });
            }
            if c >= cols {
                return Err(NumericError::IndexOutOfRange { index: c, len: cols });
            }
        }
        let mut sorted = triplets.to_vec();
        sorted.sort_by_key(|&(r, c, _)| (r, c));

        let mut row_ptr = vec![0; rows + 1];
        let mut col_idx: Vec<usize> = Vec::with_capacity(sorted.len());
        let mut values: Vec<f64> = Vec::with_capacity(sorted.len());
        let mut last: Option<(usize, usize)> = None;
        for (r, c, v) in sorted {
            if last == Some((r, c)) {
                let k = values.len() - 1;
                match policy {
                    DuplicatePolicy::Reject => return Err(NumericError::DuplicateIndex(r * cols + c)),
                    DuplicatePolicy::Accumulate => values[k] += v,
                    DuplicatePolicy::LastWins => values[k] = v,
                }
                continue;
            }
            col_idx.push(c);
            values.push(v);
            row_ptr[r + 1] += 1;
            last = Some((r, c));
        }
        for r in 0..rows {
            row_ptr[r + 1] += row_ptr[r];
        }
        Ok(Self { rows, cols, row_ptr, col_idx, values })
    }

    /// Assemble from already validated CSR arrays.
    pub(crate) fn from_parts_unchecked(
        rows: usize,
        cols: usize,
        row_ptr: Vec<usize>,
        col_idx: Vec<usize>,
        values: Vec<f64>,
    ) -> Self {
        debug_assert_eq!(row_ptr.len(), rows + 1);
        debug_assert_eq!(col_idx.len(), values.len());
        Self { rows, cols, row_ptr, col_idx, values }
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self { rows, cols, row_ptr: vec![0; rows + 1], col_idx: Vec::new(), values: Vec::new() }
    }

    /// Keep only the non-zero entries of a dense matrix.
    pub fn from_dense(m: &DenseMatrix) -> Self {
        let mut row_ptr = vec![0; m.rows() + 1];
        let mut col_idx = Vec::new();
        let mut values = Vec::new();
        for r in 0..m.rows() {
            for c in 0..m.cols() {
                let v = m.get(r, c);
                if v != 0.0 {
                    col_idx.push(c);
                    values.push(v);
                }
            }
            row_ptr[r + 1] = col_idx.len();
        }
        Self { rows: m.rows(), cols: m.cols(), row_ptr, col_idx, values }
    }

    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Density (nnz / total).
    pub fn density(&self) -> f64 {
        if self.rows == 0 || self.cols == 0 {
            0.0
        } else {
            self.nnz() as f64 / (self.rows * self.cols) as f64
        }
    }

    pub fn parts(&self) -> CsrParts<'_> {
        CsrParts {
            rows: self.rows,
            cols: self.cols,
            row_ptr: &self.row_ptr,
            col_idx: &self.col_idx,
            values: &self.values,
        }
    }

    fn row_range(&self, r: usize) -> std::ops::Range<usize> {
        self.row_ptr[r]..self.row_ptr[r + 1]
    }

    pub fn to_dense(&self) -> DenseMatrix {
        let mut out = vec![0.0; self.rows * self.cols];
        for r in 0..self.rows {
            for k in self.row_range(r) {
                out[r * self.cols + self.col_idx[k]] = self.values[k];
            }
        }
        DenseMatrix::from_fn(self.rows, self.cols, |i, j| out[i * self.cols + j])
    }

    /// Copy into Faer's owning CSR type.
    pub fn to_faer(&self) -> SparseRowMat<usize, f64> {
        // Build symbolic structure; second argument `None` means “no separate row_nnz”:
        let symbolic = SymbolicSparseRowMat::new_checked(
            self.rows,
            self.cols,
            self.row_ptr.clone(),
            None,
            self.col_idx.clone(),
        );
        SparseRowMat::new(symbolic, self.values.clone())
    }

    /// Compute y = A * x.  `x.len() == cols`, `y.len() == rows`.
    pub fn spmv(&self, x: &[f64], y: &mut [f64]) {
        assert_eq!(x.len(), self.cols, "x vector size mismatch");
        assert_eq!(y.len(), self.rows, "y vector size mismatch");
        for (r, yr) in y.iter_mut().enumerate() {
            *yr = self.row_range(r).map(|k| self.values[k] * x[self.col_idx[k]]).sum();
        }
    }

    /// SpMV that goes parallel once `nnz >= par_threshold` (with the `rayon`
    /// feature), serial otherwise.
    #[cfg_attr(not(feature = "rayon"), allow(unused_variables))]
    pub fn spmv_with_threshold(&self, x: &[f64], y: &mut [f64], par_threshold: usize) {
        #[cfg(feature = "rayon")]
        {
            if self.nnz() >= par_threshold {
                return self.spmv_parallel(x, y);
            }
        }
        self.spmv(x, y)
    }
}

#[cfg(feature = "rayon")]
use rayon::prelude::*;

#[cfg(feature = "rayon")]
impl SparseMatrix {
    /// Parallel SpMV using Rayon
    pub fn spmv_parallel(&self, x: &[f64], y: &mut [f64]) {
        assert_eq!(x.len(), self.cols, "x vector size mismatch");
        assert_eq!(y.len(), self.rows, "y vector size mismatch");
        y.par_iter_mut().enumerate().for_each(|(r, yr)| {
            *yr = self.row_range(r).map(|k| self.values[k] * x[self.col_idx[k]]).sum();
        });
    }
}

impl DataObject for SparseMatrix {
    fn dims(&self) -> Dims {
        Dims::Matrix(self.rows, self.cols)
    }

    fn kind(&self) -> Kind {
        Kind::Sparse
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::ROW_MAJOR | Capabilities::SORTED_INDICES
    }

    fn as_matrix(&self) -> Option<&dyn DataMatrix> {
        Some(self)
    }
}

impl DataMatrix for SparseMatrix {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn get(&self, r: usize, c: usize) -> f64 {
        if r >= self.rows {
            return 0.0;
        }
        let range = self.row_range(r);
        match self.col_idx[range.clone()].binary_search(&c) {
            Ok(pos) => self.values[range.start + pos],
            Err(_) => 0.0,
        }
    }

    fn nonzeros(&self) -> Box<dyn Iterator<Item = (usize, usize, f64)> + '_> {
        Box::new((0..self.rows).flat_map(move |r| {
            self.row_range(r)
                .map(move |k| (r, self.col_idx[k], self.values[k]))
                .filter(|&(_, _, v)| v != 0.0)
        }))
    }

    fn row(&self, r: usize) -> DenseVector {
        if r >= self.rows {
            return DenseVector::zeros(self.cols);
        }
        let range = self.row_range(r);
        SparseVector::from_sorted(
            self.cols,
            self.col_idx[range.clone()].iter().copied().zip(self.values[range].iter().copied()),
        )
        .to_dense()
    }

    fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    fn norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    fn dot_rows(&self, v: &dyn DataVector) -> Result<DenseVector> {
        if v.len() != self.cols {
            return Err(NumericError::mismatch("dot_rows", self.dims(), v.dims()));
        }
        let x = v.to_dense();
        let mut y = vec![0.0; self.rows];
        self.spmv_with_threshold(x.as_slice(), &mut y, DEFAULT_PARALLEL_THRESHOLD);
        Ok(DenseVector::from(y))
    }

    fn dot_columns(&self, v: &dyn DataVector) -> Result<DenseVector> {
        if v.len() != self.rows {
            return Err(NumericError::mismatch("dot_columns", self.dims(), v.dims()));
        }
        let mut out = vec![0.0; self.cols];
        for (r, a) in v.nonzeros() {
            for k in self.row_range(r) {
                out[self.col_idx[k]] += a * self.values[k];
            }
        }
        Ok(DenseVector::from(out))
    }

    fn as_csr_parts(&self) -> Option<CsrParts<'_>> {
        Some(self.parts())
    }
}
