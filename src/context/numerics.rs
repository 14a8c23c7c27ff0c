//! The dispatch engine.
//!
//! `Numerics` resolves every operation by looking at the runtime shape and kind
//! of its operands. Shapes and extents are checked first; the kernel table is
//! then consulted with the operands' kinds, and when no kernel is registered
//! for the pair, or the registered kernel declines the concrete operands, the
//! generic element-wise algorithm runs instead. A kind mismatch between the two
//! operands therefore always lands on the generic path.
//!
//! Every path returns the same value for finite operands. With infinite or NaN
//! elements the paths can differ: sparse and generic kernels skip stored or
//! implicit zeros, so `0 * inf` is dropped there but is NaN in a dense kernel.
//!
//! # Example
//!
//! ```rust
//! use numkit::{DenseVector, Numerics, SparseVector, DataVector};
//!
//! let a = DenseVector::from(vec![1.0, 2.0, 0.0]);
//! let b = SparseVector::new(3, &[2], &[5.0]).unwrap();
//! let sum = Numerics::standard().add_vectors(&a, &b).unwrap();
//! assert_eq!(sum.iter().collect::<Vec<_>>(), vec![1.0, 2.0, 5.0]);
//! ```

use std::io;
use std::sync::LazyLock;

use tracing::{debug, trace};

use crate::config::options::NumericOptions;
use crate::core::kind::Dims;
use crate::core::scalar::Scalar;
use crate::core::traits::{DataMatrix, DataObject, DataVector};
use crate::core::value::{MatrixValue, Numeric, VectorValue};
use crate::error::{NumericError, Result};
use crate::kernel::{KernelTable, generic};
use crate::utils::display;

static STANDARD: LazyLock<Numerics> = LazyLock::new(Numerics::default);

/// Engine holding the options and the kernel table used for dispatch.
#[derive(Debug, Clone, Default)]
pub struct Numerics {
    options: NumericOptions,
    table: KernelTable,
}

fn unsupported(op: &'static str, obj: &dyn DataObject) -> NumericError {
    NumericError::UnsupportedOperand { op, shape: obj.shape(), kind: obj.kind() }
}

impl Numerics {
    pub fn new(options: NumericOptions, table: KernelTable) -> Self {
        Self { options, table }
    }

    pub fn with_options(options: NumericOptions) -> Self {
        Self { options, table: KernelTable::default() }
    }

    /// Process-wide engine with default options and kernels.
    pub fn standard() -> &'static Numerics {
        &STANDARD
    }

    pub fn options(&self) -> &NumericOptions {
        &self.options
    }

    pub fn table(&self) -> &KernelTable {
        &self.table
    }

    /// Mutable access for registering additional kernels.
    pub fn table_mut(&mut self) -> &mut KernelTable {
        &mut self.table
    }

    // ---- object-level entry points -------------------------------------

    /// Euclidean norm of a vector, Frobenius norm of a matrix, `|x|` of a scalar.
    pub fn norm(&self, obj: &dyn DataObject) -> Result<f64> {
        if let Some(s) = obj.as_scalar() {
            return Ok(s.value().abs());
        }
        if let Some(v) = obj.as_vector() {
            return Ok(self.norm_vector(v));
        }
        if let Some(m) = obj.as_matrix() {
            return Ok(self.norm_matrix(m));
        }
        Err(unsupported("norm", obj))
    }

    /// `k * obj`, same shape as `obj`.
    pub fn scale(&self, obj: &dyn DataObject, k: f64) -> Result<Numeric> {
        if let Some(s) = obj.as_scalar() {
            return Ok(Numeric::Scalar(Scalar(k * s.value())));
        }
        if let Some(v) = obj.as_vector() {
            return Ok(Numeric::Vector(self.scale_vector(v, k)));
        }
        if let Some(m) = obj.as_matrix() {
            return Ok(Numeric::Matrix(self.scale_matrix(m, k)));
        }
        Err(unsupported("scale", obj))
    }

    pub fn add(&self, a: &dyn DataObject, b: &dyn DataObject) -> Result<Numeric> {
        self.combine("add", a, b, 1.0)
    }

    pub fn subtract(&self, a: &dyn DataObject, b: &dyn DataObject) -> Result<Numeric> {
        self.combine("subtract", a, b, -1.0)
    }

    /// `Σ a_i·b_i` for vectors, the Frobenius inner product for matrices.
    pub fn dot(&self, a: &dyn DataObject, b: &dyn DataObject) -> Result<f64> {
        check_dims("dot", a.dims(), b.dims())?;
        if let (Some(x), Some(y)) = (a.as_scalar(), b.as_scalar()) {
            return Ok(x.value() * y.value());
        }
        if let (Some(x), Some(y)) = (a.as_vector(), b.as_vector()) {
            return Ok(self.dot_vectors_unchecked(x, y));
        }
        if let (Some(x), Some(y)) = (a.as_matrix(), b.as_matrix()) {
            return Ok(self.dot_matrices_unchecked(x, y));
        }
        Err(unsupported("dot", a))
    }

    /// Writes `prefix`, the rendered object, then `suffix`.
    pub fn display<W: io::Write + ?Sized>(
        &self,
        out: &mut W,
        prefix: &str,
        obj: &dyn DataObject,
        suffix: &str,
    ) -> Result<()> {
        let mut text = String::from(prefix);
        display::write_object(&mut text, obj, self.options.display_precision)
            .map_err(|_| io::Error::other("formatting failed"))?;
        text.push_str(suffix);
        out.write_all(text.as_bytes())?;
        Ok(())
    }

    fn combine(&self, op: &'static str, a: &dyn DataObject, b: &dyn DataObject, beta: f64) -> Result<Numeric> {
        check_dims(op, a.dims(), b.dims())?;
        if let (Some(x), Some(y)) = (a.as_scalar(), b.as_scalar()) {
            return Ok(Numeric::Scalar(Scalar(x.value() + beta * y.value())));
        }
        if let (Some(x), Some(y)) = (a.as_vector(), b.as_vector()) {
            return Ok(Numeric::Vector(self.combine_vectors(x, y, beta)));
        }
        if let (Some(x), Some(y)) = (a.as_matrix(), b.as_matrix()) {
            return Ok(Numeric::Matrix(self.combine_matrices(x, y, beta)));
        }
        Err(unsupported(op, a))
    }

    // ---- vectors ------------------------------------------------------

    pub fn norm_vector(&self, v: &dyn DataVector) -> f64 {
        let kind = v.kind();
        if let Some(k) = self.table.vector(kind) {
            trace!(?kind, "vector norm kernel");
            if let Some(n) = (k.norm_of)(v, &self.options) {
                return n;
            }
        }
        debug!(?kind, "vector norm: generic fallback");
        generic::vector_norm(v)
    }

    pub fn scale_vector(&self, v: &dyn DataVector, k: f64) -> VectorValue {
        let kind = v.kind();
        if let Some(kernels) = self.table.vector(kind) {
            trace!(?kind, "vector scale kernel");
            if let Some(r) = (kernels.scale_by)(v, k, &self.options) {
                return r;
            }
        }
        debug!(?kind, "vector scale: generic fallback");
        generic::vector_scale(v, k)
    }

    pub fn dot_vectors(&self, a: &dyn DataVector, b: &dyn DataVector) -> Result<f64> {
        check_dims("dot", a.dims(), b.dims())?;
        Ok(self.dot_vectors_unchecked(a, b))
    }

    pub fn add_vectors(&self, a: &dyn DataVector, b: &dyn DataVector) -> Result<VectorValue> {
        check_dims("add", a.dims(), b.dims())?;
        Ok(self.combine_vectors(a, b, 1.0))
    }

    pub fn subtract_vectors(&self, a: &dyn DataVector, b: &dyn DataVector) -> Result<VectorValue> {
        check_dims("subtract", a.dims(), b.dims())?;
        Ok(self.combine_vectors(a, b, -1.0))
    }

    fn dot_vectors_unchecked(&self, a: &dyn DataVector, b: &dyn DataVector) -> f64 {
        let kinds = (a.kind(), b.kind());
        if let Some(k) = self.table.vector_pair(kinds.0, kinds.1) {
            trace!(?kinds, "vector dot kernel");
            if let Some(d) = (k.dot_with)(a, b, &self.options) {
                return d;
            }
        }
        debug!(?kinds, "vector dot: generic fallback");
        generic::vector_dot(a, b)
    }

    /// `a + beta * b` with no length check; callers guarantee equal lengths.
    pub(crate) fn combine_vectors(&self, a: &dyn DataVector, b: &dyn DataVector, beta: f64) -> VectorValue {
        let kinds = (a.kind(), b.kind());
        if let Some(k) = self.table.vector_pair(kinds.0, kinds.1) {
            trace!(?kinds, beta, "vector combine kernel");
            if let Some(r) = (k.add_into)(a, b, beta, &self.options) {
                return r;
            }
        }
        debug!(?kinds, beta, "vector combine: generic fallback");
        generic::vector_combine(a, b, beta)
    }

    // ---- matrices -----------------------------------------------------

    pub fn norm_matrix(&self, m: &dyn DataMatrix) -> f64 {
        let kind = m.kind();
        if let Some(k) = self.table.matrix(kind) {
            trace!(?kind, "matrix norm kernel");
            if let Some(n) = (k.norm_of)(m, &self.options) {
                return n;
            }
        }
        debug!(?kind, "matrix norm: generic fallback");
        generic::matrix_norm(m)
    }

    pub fn scale_matrix(&self, m: &dyn DataMatrix, k: f64) -> MatrixValue {
        let kind = m.kind();
        if let Some(kernels) = self.table.matrix(kind) {
            trace!(?kind, "matrix scale kernel");
            if let Some(r) = (kernels.scale_by)(m, k, &self.options) {
                return r;
            }
        }
        debug!(?kind, "matrix scale: generic fallback");
        generic::matrix_scale(m, k)
    }

    pub fn dot_matrices(&self, a: &dyn DataMatrix, b: &dyn DataMatrix) -> Result<f64> {
        check_dims("dot", a.dims(), b.dims())?;
        Ok(self.dot_matrices_unchecked(a, b))
    }

    pub fn add_matrices(&self, a: &dyn DataMatrix, b: &dyn DataMatrix) -> Result<MatrixValue> {
        check_dims("add", a.dims(), b.dims())?;
        Ok(self.combine_matrices(a, b, 1.0))
    }

    pub fn subtract_matrices(&self, a: &dyn DataMatrix, b: &dyn DataMatrix) -> Result<MatrixValue> {
        check_dims("subtract", a.dims(), b.dims())?;
        Ok(self.combine_matrices(a, b, -1.0))
    }

    fn dot_matrices_unchecked(&self, a: &dyn DataMatrix, b: &dyn DataMatrix) -> f64 {
        let kinds = (a.kind(), b.kind());
        if let Some(k) = self.table.matrix_pair(kinds.0, kinds.1) {
            trace!(?kinds, "matrix dot kernel");
            if let Some(d) = (k.dot_with)(a, b, &self.options) {
                return d;
            }
        }
        debug!(?kinds, "matrix dot: generic fallback");
        generic::matrix_dot(a, b)
    }

    fn combine_matrices(&self, a: &dyn DataMatrix, b: &dyn DataMatrix, beta: f64) -> MatrixValue {
        let kinds = (a.kind(), b.kind());
        if let Some(k) = self.table.matrix_pair(kinds.0, kinds.1) {
            trace!(?kinds, beta, "matrix combine kernel");
            if let Some(r) = (k.add_into)(a, b, beta, &self.options) {
                return r;
            }
        }
        debug!(?kinds, beta, "matrix combine: generic fallback");
        generic::matrix_combine(a, b, beta)
    }
}

fn check_dims(op: &'static str, left: Dims, right: Dims) -> Result<()> {
    if left != right {
        return Err(NumericError::mismatch(op, left, right));
    }
    Ok(())
}

// ---- free functions over the standard engine ------------------------------

pub fn norm(obj: &dyn DataObject) -> Result<f64> {
    Numerics::standard().norm(obj)
}

pub fn scale(obj: &dyn DataObject, k: f64) -> Result<Numeric> {
    Numerics::standard().scale(obj, k)
}

pub fn add(a: &dyn DataObject, b: &dyn DataObject) -> Result<Numeric> {
    Numerics::standard().add(a, b)
}

pub fn subtract(a: &dyn DataObject, b: &dyn DataObject) -> Result<Numeric> {
    Numerics::standard().subtract(a, b)
}

pub fn dot(a: &dyn DataObject, b: &dyn DataObject) -> Result<f64> {
    Numerics::standard().dot(a, b)
}

pub fn display<W: io::Write + ?Sized>(out: &mut W, prefix: &str, obj: &dyn DataObject, suffix: &str) -> Result<()> {
    Numerics::standard().display(out, prefix, obj, suffix)
}
