//! Text rendering for diagnostics.
//!
//! Vectors print as `[a, b, c]`, matrices as one bracketed row per line.
//! With `precision = None` each value uses the shortest form that round-trips.

use std::fmt::{self, Write};

use crate::core::traits::{DataMatrix, DataObject, DataVector};

fn write_value<W: Write + ?Sized>(out: &mut W, x: f64, precision: Option<usize>) -> fmt::Result {
    match precision {
        Some(p) => write!(out, "{x:.p$}"),
        None => write!(out, "{x}"),
    }
}

pub fn write_vector<W: Write + ?Sized>(
    out: &mut W,
    v: &dyn DataVector,
    precision: Option<usize>,
) -> fmt::Result {
    out.write_char('[')?;
    for (i, x) in v.iter().enumerate() {
        if i > 0 {
            out.write_str(", ")?;
        }
        write_value(out, x, precision)?;
    }
    out.write_char(']')
}

pub fn write_matrix<W: Write + ?Sized>(
    out: &mut W,
    m: &dyn DataMatrix,
    precision: Option<usize>,
) -> fmt::Result {
    out.write_char('[')?;
    for r in 0..m.rows() {
        if r > 0 {
            out.write_str(",\n ")?;
        }
        out.write_char('[')?;
        for c in 0..m.cols() {
            if c > 0 {
                out.write_str(", ")?;
            }
            write_value(out, m.get(r, c), precision)?;
        }
        out.write_char(']')?;
    }
    out.write_char(']')
}

/// Any object; shapes without an accessor contract print as a placeholder.
pub fn write_object<W: Write + ?Sized>(
    out: &mut W,
    obj: &dyn DataObject,
    precision: Option<usize>,
) -> fmt::Result {
    if let Some(s) = obj.as_scalar() {
        return write_value(out, s.value(), precision);
    }
    if let Some(v) = obj.as_vector() {
        return write_vector(out, v, precision);
    }
    if let Some(m) = obj.as_matrix() {
        return write_matrix(out, m, precision);
    }
    write!(out, "<{} {:?}>", obj.dims(), obj.kind())
}
