//! Kernel table: storage-specific algorithms keyed by operand kind.
//!
//! Unary kernels (norm, scale) are keyed by the operand's `Kind`; binary
//! kernels (dot, combine) by the `(Kind, Kind)` pair. Vector and matrix kernels
//! live in separate maps, so the shape half of the key is the map itself.
//! Every kernel returns `Option`: `None` means it cannot handle the concrete
//! operands it was given, and the engine runs the generic algorithm instead.
//! The same happens for any pair with no registered kernel.

pub mod dense;
pub mod generic;
pub mod sparse;

use std::collections::HashMap;

use crate::config::options::NumericOptions;
use crate::core::kind::Kind;
use crate::core::traits::{DataMatrix, DataVector};
use crate::core::value::{MatrixValue, VectorValue};

/// Unary vector kernels for one storage kind.
#[derive(Clone, Copy)]
pub struct VectorKernels {
    pub norm_of: fn(&dyn DataVector, &NumericOptions) -> Option<f64>,
    pub scale_by: fn(&dyn DataVector, f64, &NumericOptions) -> Option<VectorValue>,
}

/// Binary vector kernels for one `(Kind, Kind)` pair. `add_into` computes `a + beta * b`.
#[derive(Clone, Copy)]
pub struct VectorPairKernels {
    pub dot_with: fn(&dyn DataVector, &dyn DataVector, &NumericOptions) -> Option<f64>,
    pub add_into: fn(&dyn DataVector, &dyn DataVector, f64, &NumericOptions) -> Option<VectorValue>,
}

#[derive(Clone, Copy)]
pub struct MatrixKernels {
    pub norm_of: fn(&dyn DataMatrix, &NumericOptions) -> Option<f64>,
    pub scale_by: fn(&dyn DataMatrix, f64, &NumericOptions) -> Option<MatrixValue>,
}

#[derive(Clone, Copy)]
pub struct MatrixPairKernels {
    pub dot_with: fn(&dyn DataMatrix, &dyn DataMatrix, &NumericOptions) -> Option<f64>,
    pub add_into: fn(&dyn DataMatrix, &dyn DataMatrix, f64, &NumericOptions) -> Option<MatrixValue>,
}

/// Lookup from operand kinds to kernels.
#[derive(Clone)]
pub struct KernelTable {
    vector: HashMap<Kind, VectorKernels>,
    vector_pairs: HashMap<(Kind, Kind), VectorPairKernels>,
    matrix: HashMap<Kind, MatrixKernels>,
    matrix_pairs: HashMap<(Kind, Kind), MatrixPairKernels>,
}

impl KernelTable {
    /// A table with nothing registered: every operation takes the generic path.
    pub fn empty() -> Self {
        Self {
            vector: HashMap::new(),
            vector_pairs: HashMap::new(),
            matrix: HashMap::new(),
            matrix_pairs: HashMap::new(),
        }
    }

    pub fn register_vector(&mut self, kind: Kind, kernels: VectorKernels) -> &mut Self {
        self.vector.insert(kind, kernels);
        self
    }

    pub fn register_vector_pair(&mut self, a: Kind, b: Kind, kernels: VectorPairKernels) -> &mut Self {
        self.vector_pairs.insert((a, b), kernels);
        self
    }

    pub fn register_matrix(&mut self, kind: Kind, kernels: MatrixKernels) -> &mut Self {
        self.matrix.insert(kind, kernels);
        self
    }

    pub fn register_matrix_pair(&mut self, a: Kind, b: Kind, kernels: MatrixPairKernels) -> &mut Self {
        self.matrix_pairs.insert((a, b), kernels);
        self
    }

    pub fn vector(&self, kind: Kind) -> Option<&VectorKernels> {
        self.vector.get(&kind)
    }

    pub fn vector_pair(&self, a: Kind, b: Kind) -> Option<&VectorPairKernels> {
        self.vector_pairs.get(&(a, b))
    }

    pub fn matrix(&self, kind: Kind) -> Option<&MatrixKernels> {
        self.matrix.get(&kind)
    }

    pub fn matrix_pair(&self, a: Kind, b: Kind) -> Option<&MatrixPairKernels> {
        self.matrix_pairs.get(&(a, b))
    }
}

impl Default for KernelTable {
    /// Dense/Dense and Sparse/Sparse fast paths for vectors and matrices.
    fn default() -> Self {
        let mut table = Self::empty();
        table
            .register_vector(
                Kind::Dense,
                VectorKernels { norm_of: dense::vector_norm, scale_by: dense::vector_scale },
            )
            .register_vector(
                Kind::Sparse,
                VectorKernels { norm_of: sparse::vector_norm, scale_by: sparse::vector_scale },
            )
            .register_vector_pair(
                Kind::Dense,
                Kind::Dense,
                VectorPairKernels { dot_with: dense::vector_dot, add_into: dense::vector_combine },
            )
            .register_vector_pair(
                Kind::Sparse,
                Kind::Sparse,
                VectorPairKernels { dot_with: sparse::vector_dot, add_into: sparse::vector_combine },
            )
            .register_matrix(
                Kind::Dense,
                MatrixKernels { norm_of: dense::matrix_norm, scale_by: dense::matrix_scale },
            )
            .register_matrix(
                Kind::Sparse,
                MatrixKernels { norm_of: sparse::matrix_norm, scale_by: sparse::matrix_scale },
            )
            .register_matrix_pair(
                Kind::Dense,
                Kind::Dense,
                MatrixPairKernels { dot_with: dense::matrix_dot, add_into: dense::matrix_combine },
            )
            .register_matrix_pair(
                Kind::Sparse,
                Kind::Sparse,
                MatrixPairKernels { dot_with: sparse::matrix_dot, add_into: sparse::matrix_combine },
            );
        table
    }
}

impl std::fmt::Debug for KernelTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KernelTable")
            .field("vector", &self.vector.keys().collect::<Vec<_>>())
            .field("vector_pairs", &self.vector_pairs.keys().collect::<Vec<_>>())
            .field("matrix", &self.matrix.keys().collect::<Vec<_>>())
            .field("matrix_pairs", &self.matrix_pairs.keys().collect::<Vec<_>>())
            .finish()
    }
}
