//! API options for the numeric engine and factory.
//!
//! This module provides the `NumericOptions` struct, which controls how sparse
//! objects are assembled (duplicate-index policy), when sparse results are
//! converted to dense storage, whether exact zeros are dropped, how values are
//! printed, and when dense kernels switch to Rayon.

/// Minimum length at which dense kernels use Rayon (with the `rayon` feature).
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1 << 15;

/// What to do when sparse construction sees the same index twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Fail with `NumericError::DuplicateIndex`.
    #[default]
    Reject,
    /// Sum the values.
    Accumulate,
    /// Keep the value that appears last in the input.
    LastWins,
}

/// Engine and factory parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericOptions {
    /// Policy for repeated sparse indices
    pub duplicates: DuplicatePolicy,

    /// Density (nnz / size) above which a Sparse+Sparse result is stored dense
    pub densify_above: f64,

    /// Drop exact zeros produced by sparse kernels
    pub prune_zeros: bool,

    /// Decimals printed by `display`; `None` prints the shortest exact form
    pub display_precision: Option<usize>,

    /// Minimum length for parallel dense reductions
    pub parallel_threshold: usize,
}

impl Default for NumericOptions {
    fn default() -> Self {
        Self {
            duplicates: DuplicatePolicy::Reject,
            densify_above: 0.5,
            prune_zeros: true,
            display_precision: None,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl NumericOptions {
    pub fn with_duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    /// Clamped to `[0, 1]`; `1.0` keeps Sparse+Sparse results sparse always.
    pub fn with_densify_above(mut self, density: f64) -> Self {
        self.densify_above = density.clamp(0.0, 1.0);
        self
    }

    pub fn with_prune_zeros(mut self, prune: bool) -> Self {
        self.prune_zeros = prune;
        self
    }

    pub fn with_display_precision(mut self, precision: usize) -> Self {
        self.display_precision = Some(precision);
        self
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold.max(1);
        self
    }
}
