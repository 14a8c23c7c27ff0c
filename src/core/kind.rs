//! Structure and representation classifiers.
//!
//! `Shape` says what a numeric object looks like, `Kind` says how its elements
//! are stored. Both are fixed for the lifetime of an object. `Dims` carries the
//! shape together with its extents so that size and shape can never disagree.

use std::fmt;

use bitflags::bitflags;

/// Structural classification of a numeric object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Scalar,
    Vector,
    Matrix,
    Tensor,
}

/// Storage classification of a numeric object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Every element explicitly stored.
    Dense,
    /// Only non-zero elements stored.
    Sparse,
    /// A computed view over other numeric objects.
    Compound,
}

/// Shape plus extents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dims {
    Scalar,
    Vector(usize),
    Matrix(usize, usize),
    /// Opaque higher-rank object; only the total element count is known.
    Tensor(usize),
}

impl Dims {
    pub fn shape(&self) -> Shape {
        match self {
            Dims::Scalar => Shape::Scalar,
            Dims::Vector(_) => Shape::Vector,
            Dims::Matrix(..) => Shape::Matrix,
            Dims::Tensor(_) => Shape::Tensor,
        }
    }

    /// Total element count.
    pub fn size(&self) -> usize {
        match *self {
            Dims::Scalar => 1,
            Dims::Vector(n) => n,
            Dims::Matrix(r, c) => r * c,
            Dims::Tensor(n) => n,
        }
    }
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dims::Scalar => write!(f, "scalar"),
            Dims::Vector(n) => write!(f, "vector[{n}]"),
            Dims::Matrix(r, c) => write!(f, "matrix[{r}x{c}]"),
            Dims::Tensor(n) => write!(f, "tensor[{n}]"),
        }
    }
}

bitflags! {
    /// Informational storage capabilities reported by an object.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct Capabilities: u32 {
        const FLAT_ARRAY     = 0b0001;
        const SETTABLE       = 0b0010;
        const ROW_MAJOR      = 0b0100;
        const SORTED_INDICES = 0b1000;
        const FLAT_ROW_MAJOR = Self::FLAT_ARRAY.bits() | Self::ROW_MAJOR.bits();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dims_size_and_shape() {
        assert_eq!(Dims::Scalar.size(), 1);
        assert_eq!(Dims::Matrix(3, 4).size(), 12);
        assert_eq!(Dims::Vector(7).shape(), Shape::Vector);
        assert_eq!(Dims::Matrix(2, 5).to_string(), "matrix[2x5]");
    }

    #[test]
    fn flat_row_major_contains_both() {
        let caps = Capabilities::FLAT_ROW_MAJOR;
        assert!(caps.contains(Capabilities::FLAT_ARRAY));
        assert!(caps.contains(Capabilities::ROW_MAJOR));
        assert!(!caps.contains(Capabilities::SETTABLE));
    }
}
