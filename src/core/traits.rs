//! Core numeric-object contracts for numkit.
//!
//! Every object reports its `Dims` and `Kind`; the shape-specific traits add
//! element access and derived quantities. Derived methods have generic default
//! bodies written purely against the element accessors, so a collaborator only
//! needs `len`/`get` (or `rows`/`cols`/`get`) to take part in dispatch.
//! Storage-aware types override them, and expose their raw parts through the
//! `as_flat`/`as_sparse_parts`/`as_csr_parts` hooks the kernels look for.
//!
//! Implementors of [`DataVector`] or [`DataMatrix`] must also override
//! [`DataObject::as_vector`] or [`DataObject::as_matrix`] to return `Some(self)`.
//! The object-level engine entry points (`norm`, `scale`, `add`, `subtract`,
//! `dot`, `display`) reach the shape-specific contract only through these
//! hooks, and report `UnsupportedOperand` for an object that keeps the `None`
//! default.

use std::fmt;

use crate::core::kind::{Capabilities, Dims, Kind, Shape};
use crate::error::{NumericError, Result};
use crate::vector::DenseVector;

/// The minimal capability every numeric object exposes.
pub trait DataObject: fmt::Debug {
    /// Shape and extents. Fixed for the lifetime of the object.
    fn dims(&self) -> Dims;
    /// Storage kind. Fixed for the lifetime of the object.
    fn kind(&self) -> Kind;

    fn capabilities(&self) -> Capabilities {
        Capabilities::empty()
    }

    fn shape(&self) -> Shape {
        self.dims().shape()
    }

    /// Total element count.
    fn size(&self) -> usize {
        self.dims().size()
    }

    fn is_dense(&self) -> bool {
        self.kind() == Kind::Dense
    }

    fn is_sparse(&self) -> bool {
        self.kind() == Kind::Sparse
    }

    fn is_compound(&self) -> bool {
        self.kind() == Kind::Compound
    }

    fn as_scalar(&self) -> Option<&dyn DataScalar> {
        None
    }

    /// `Some(self)` for every [`DataVector`] implementor.
    fn as_vector(&self) -> Option<&dyn DataVector> {
        None
    }

    /// `Some(self)` for every [`DataMatrix`] implementor.
    fn as_matrix(&self) -> Option<&dyn DataMatrix> {
        None
    }
}

/// A single value.
pub trait DataScalar: DataObject {
    fn value(&self) -> f64;
}

/// Borrowed sparse storage: strictly increasing `indices` paired with `values`.
#[derive(Debug, Clone, Copy)]
pub struct SparseParts<'a> {
    pub len: usize,
    pub indices: &'a [usize],
    pub values: &'a [f64],
}

/// Borrowed CSR storage. Column indices are strictly increasing within a row.
#[derive(Debug, Clone, Copy)]
pub struct CsrParts<'a> {
    pub rows: usize,
    pub cols: usize,
    pub row_ptr: &'a [usize],
    pub col_idx: &'a [usize],
    pub values: &'a [f64],
}

/// Fixed-length ordered sequence of `f64`.
///
/// Implementors override [`DataObject::as_vector`] to return `Some(self)`.
/// Derived quantities skip zero elements, so `0 * inf` contributes nothing on
/// sparse and generic paths while a dense kernel yields NaN. Results agree
/// across storage kinds only for finite values.
pub trait DataVector: DataObject {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element `i`; `0.0` when `i` is out of range.
    fn get(&self, i: usize) -> f64;

    /// Every element in index order.
    fn iter(&self) -> Box<dyn Iterator<Item = f64> + '_> {
        Box::new((0..self.len()).map(move |i| self.get(i)))
    }

    /// `(index, value)` for every non-zero element, in index order.
    fn nonzeros(&self) -> Box<dyn Iterator<Item = (usize, f64)> + '_> {
        Box::new(
            (0..self.len())
                .map(move |i| (i, self.get(i)))
                .filter(|&(_, v)| v != 0.0),
        )
    }

    fn sum(&self) -> f64 {
        self.nonzeros().map(|(_, v)| v).sum()
    }

    /// Euclidean norm.
    fn norm(&self) -> f64 {
        self.nonzeros().map(|(_, v)| v * v).sum::<f64>().sqrt()
    }

    fn to_dense(&self) -> DenseVector {
        DenseVector::from(self.iter().collect::<Vec<_>>())
    }

    /// Contiguous storage, when the vector has one.
    fn as_flat(&self) -> Option<&[f64]> {
        None
    }

    fn as_sparse_parts(&self) -> Option<SparseParts<'_>> {
        None
    }
}

/// Fixed `rows × cols` grid of `f64`.
///
/// Implementors override [`DataObject::as_matrix`] to return `Some(self)`.
pub trait DataMatrix: DataObject {
    fn rows(&self) -> usize;
    fn cols(&self) -> usize;

    /// Element `(r, c)`; `0.0` when either index is out of range.
    fn get(&self, r: usize, c: usize) -> f64;

    /// `(row, col, value)` for every non-zero element, row by row.
    fn nonzeros(&self) -> Box<dyn Iterator<Item = (usize, usize, f64)> + '_> {
        let cols = self.cols();
        Box::new(
            (0..self.rows() * cols)
                .map(move |k| (k / cols, k % cols, self.get(k / cols, k % cols)))
                .filter(|&(_, _, v)| v != 0.0),
        )
    }

    /// Copy of row `r` (length `cols`); all zeros when `r` is out of range.
    fn row(&self, r: usize) -> DenseVector {
        DenseVector::from((0..self.cols()).map(|c| self.get(r, c)).collect::<Vec<_>>())
    }

    /// Copy of column `c` (length `rows`); all zeros when `c` is out of range.
    fn column(&self, c: usize) -> DenseVector {
        DenseVector::from((0..self.rows()).map(|r| self.get(r, c)).collect::<Vec<_>>())
    }

    fn sum(&self) -> f64 {
        self.nonzeros().map(|(_, _, v)| v).sum()
    }

    /// Frobenius norm.
    fn norm(&self) -> f64 {
        self.nonzeros().map(|(_, _, v)| v * v).sum::<f64>().sqrt()
    }

    /// `A · v`: every row dotted with `v`. Requires `v.len() == cols`.
    fn dot_rows(&self, v: &dyn DataVector) -> Result<DenseVector> {
        if v.len() != self.cols() {
            return Err(NumericError::mismatch("dot_rows", self.dims(), v.dims()));
        }
        let mut out = vec![0.0; self.rows()];
        for (r, c, a) in self.nonzeros() {
            out[r] += a * v.get(c);
        }
        Ok(DenseVector::from(out))
    }

    /// `vᵀ · A`: every column dotted with `v`. Requires `v.len() == rows`.
    fn dot_columns(&self, v: &dyn DataVector) -> Result<DenseVector> {
        if v.len() != self.rows() {
            return Err(NumericError::mismatch("dot_columns", self.dims(), v.dims()));
        }
        let mut out = vec![0.0; self.cols()];
        for (r, c, a) in self.nonzeros() {
            out[c] += v.get(r) * a;
        }
        Ok(DenseVector::from(out))
    }

    /// Row-major contiguous storage, when the matrix has one.
    fn as_flat(&self) -> Option<&[f64]> {
        None
    }

    fn as_csr_parts(&self) -> Option<CsrParts<'_>> {
        None
    }
}

/// In-place element mutation.
///
/// Implemented by builders and by `Pmf`. Finished vector values are
/// immutable, so a value that has been shared can never change underneath
/// its readers.
pub trait SettableVector: DataVector {
    /// Set element `i`; silently ignored when `i` is out of range.
    fn set(&mut self, i: usize, v: f64);

    /// Replace every element with those of `src`.
    fn set_all(&mut self, src: &dyn DataVector) -> Result<()>;
}

/// In-place mutation for matrix builders.
pub trait SettableMatrix: DataMatrix {
    /// Set element `(r, c)`; silently ignored when out of range.
    fn set(&mut self, r: usize, c: usize, v: f64);

    /// Replace row `r`. `src.len()` must equal `cols`, `r` must be in range.
    fn set_row(&mut self, r: usize, src: &dyn DataVector) -> Result<()>;

    /// Replace column `c`. `src.len()` must equal `rows`, `c` must be in range.
    fn set_column(&mut self, c: usize, src: &dyn DataVector) -> Result<()>;

    fn set_all(&mut self, src: &dyn DataMatrix) -> Result<()>;
}

/// Marker for vectors backed by one contiguous block.
pub trait FlatArray: DataVector {
    fn as_slice(&self) -> &[f64];
}

/// Marker for matrices backed by one contiguous row-major block.
pub trait FlatArrayMatrix: DataMatrix {
    fn as_slice(&self) -> &[f64];

    fn row_slice(&self, r: usize) -> &[f64] {
        let cols = self.cols();
        &self.as_slice()[r * cols..(r + 1) * cols]
    }
}
