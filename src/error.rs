use thiserror::Error;

use crate::core::kind::{Dims, Kind, Shape};

// Unified error type for numkit

#[derive(Error, Debug)]
pub enum NumericError {
    #[error("shape mismatch in {op}: {left} vs {right}")]
    ShapeMismatch {
        op: &'static str,
        left: Dims,
        right: Dims,
    },
    #[error("unsupported operand for {op}: {shape:?}/{kind:?}")]
    UnsupportedOperand {
        op: &'static str,
        shape: Shape,
        kind: Kind,
    },
    #[error("invariant violation: weight {value} at index {index} is not a non-negative number")]
    InvariantViolation { index: usize, value: f64 },
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("duplicate index {0}")]
    DuplicateIndex(usize),
    #[error("parse error at line {line}: {reason}")]
    Parse { line: usize, reason: String },
    #[error("missing entry: {0}")]
    MissingEntry(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl NumericError {
    pub(crate) fn mismatch(op: &'static str, left: Dims, right: Dims) -> Self {
        NumericError::ShapeMismatch { op, left, right }
    }
}

pub type Result<T> = std::result::Result<T, NumericError>;
