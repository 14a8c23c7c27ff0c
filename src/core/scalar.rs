use std::fmt;

use crate::core::kind::{Capabilities, Dims, Kind};
use crate::core::traits::{DataObject, DataScalar};

/// A single explicitly stored value. Always dense.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Scalar(pub f64);

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar(v)
    }
}

impl DataObject for Scalar {
    fn dims(&self) -> Dims {
        Dims::Scalar
    }

    fn kind(&self) -> Kind {
        Kind::Dense
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::FLAT_ARRAY
    }

    fn as_scalar(&self) -> Option<&dyn DataScalar> {
        Some(self)
    }
}

impl DataScalar for Scalar {
    fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
