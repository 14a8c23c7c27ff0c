//! Sorted-index kernels for sparse vectors and CSR matrices.
//!
//! Binary kernels walk both index lists once (two-pointer merge), so their cost
//! is proportional to the number of stored entries, not the logical size.

use crate::config::options::NumericOptions;
use crate::core::traits::{CsrParts, DataMatrix, DataVector, SparseParts};
use crate::core::value::{MatrixValue, VectorValue};
use crate::matrix::SparseMatrix;
use crate::vector::SparseVector;

/// Σ a_i·b_i over indices stored in both.
fn merge_dot(ai: &[usize], av: &[f64], bi: &[usize], bv: &[f64]) -> f64 {
    let (mut p, mut q) = (0, 0);
    let mut acc = 0.0;
    while p < ai.len() && q < bi.len() {
        match ai[p].cmp(&bi[q]) {
            std::cmp::Ordering::Less => p += 1,
            std::cmp::Ordering::Greater => q += 1,
            std::cmp::Ordering::Equal => {
                acc += av[p] * bv[q];
                p += 1;
                q += 1;
            }
        }
    }
    acc
}

/// Appends the entries of `a + beta * b` to `idx`/`val`.
fn merge_combine(
    (ai, av): (&[usize], &[f64]),
    (bi, bv): (&[usize], &[f64]),
    beta: f64,
    prune: bool,
    idx: &mut Vec<usize>,
    val: &mut Vec<f64>,
) {
    let (mut p, mut q) = (0, 0);
    let mut push = |i: usize, v: f64| {
        if !(prune && v == 0.0) {
            idx.push(i);
            val.push(v);
        }
    };
    while p < ai.len() || q < bi.len() {
        let take_a = q >= bi.len() || (p < ai.len() && ai[p] < bi[q]);
        let take_b = p >= ai.len() || (q < bi.len() && bi[q] < ai[p]);
        if take_a {
            push(ai[p], av[p]);
            p += 1;
        } else if take_b {
            push(bi[q], beta * bv[q]);
            q += 1;
        } else {
            push(ai[p], av[p] + beta * bv[q]);
            p += 1;
            q += 1;
        }
    }
}

fn vector_from_merge(len: usize, idx: Vec<usize>, val: Vec<f64>, opts: &NumericOptions) -> VectorValue {
    let sparse = SparseVector::from_sorted(len, idx.into_iter().zip(val));
    if sparse.density() > opts.densify_above {
        VectorValue::Dense(sparse.to_dense())
    } else {
        VectorValue::Sparse(sparse)
    }
}

pub fn vector_norm(v: &dyn DataVector, _opts: &NumericOptions) -> Option<f64> {
    let parts = v.as_sparse_parts()?;
    Some(parts.values.iter().map(|x| x * x).sum::<f64>().sqrt())
}

/// A zero multiplier yields an empty sparse vector of the same length.
pub fn vector_scale(v: &dyn DataVector, k: f64, opts: &NumericOptions) -> Option<VectorValue> {
    let SparseParts { len, indices, values } = v.as_sparse_parts()?;
    if k == 0.0 {
        return Some(SparseVector::zeros(len).into());
    }
    let entries = indices
        .iter()
        .copied()
        .zip(values.iter().map(|x| k * x))
        .filter(|&(_, x)| !(opts.prune_zeros && x == 0.0));
    Some(SparseVector::from_sorted(len, entries).into())
}

pub fn vector_dot(a: &dyn DataVector, b: &dyn DataVector, _opts: &NumericOptions) -> Option<f64> {
    let (a, b) = (a.as_sparse_parts()?, b.as_sparse_parts()?);
    Some(merge_dot(a.indices, a.values, b.indices, b.values))
}

pub fn vector_combine(
    a: &dyn DataVector,
    b: &dyn DataVector,
    beta: f64,
    opts: &NumericOptions,
) -> Option<VectorValue> {
    let (a, b) = (a.as_sparse_parts()?, b.as_sparse_parts()?);
    let mut idx = Vec::with_capacity(a.indices.len() + b.indices.len());
    let mut val = Vec::with_capacity(idx.capacity());
    merge_combine(
        (a.indices, a.values),
        (b.indices, b.values),
        beta,
        opts.prune_zeros,
        &mut idx,
        &mut val,
    );
    Some(vector_from_merge(a.len, idx, val, opts))
}

fn row<'a>(m: &CsrParts<'a>, r: usize) -> (&'a [usize], &'a [f64]) {
    let range = m.row_ptr[r]..m.row_ptr[r + 1];
    (&m.col_idx[range.clone()], &m.values[range])
}

pub fn matrix_norm(m: &dyn DataMatrix, _opts: &NumericOptions) -> Option<f64> {
    let parts = m.as_csr_parts()?;
    Some(parts.values.iter().map(|x| x * x).sum::<f64>().sqrt())
}

pub fn matrix_scale(m: &dyn DataMatrix, k: f64, opts: &NumericOptions) -> Option<MatrixValue> {
    let p = m.as_csr_parts()?;
    if k == 0.0 {
        return Some(SparseMatrix::zeros(p.rows, p.cols).into());
    }
    let mut row_ptr = Vec::with_capacity(p.rows + 1);
    let mut col_idx = Vec::with_capacity(p.col_idx.len());
    let mut values = Vec::with_capacity(p.values.len());
    row_ptr.push(0);
    for r in 0..p.rows {
        let (ci, cv) = row(&p, r);
        for (&c, &v) in ci.iter().zip(cv) {
            let x = k * v;
            if !(opts.prune_zeros && x == 0.0) {
                col_idx.push(c);
                values.push(x);
            }
        }
        row_ptr.push(col_idx.len());
    }
    Some(SparseMatrix::from_parts_unchecked(p.rows, p.cols, row_ptr, col_idx, values).into())
}

/// Frobenius inner product, row by row.
pub fn matrix_dot(a: &dyn DataMatrix, b: &dyn DataMatrix, _opts: &NumericOptions) -> Option<f64> {
    let (a, b) = (a.as_csr_parts()?, b.as_csr_parts()?);
    Some(
        (0..a.rows)
            .map(|r| {
                let (ai, av) = row(&a, r);
                let (bi, bv) = row(&b, r);
                merge_dot(ai, av, bi, bv)
            })
            .sum(),
    )
}

pub fn matrix_combine(
    a: &dyn DataMatrix,
    b: &dyn DataMatrix,
    beta: f64,
    opts: &NumericOptions,
) -> Option<MatrixValue> {
    let (a, b) = (a.as_csr_parts()?, b.as_csr_parts()?);
    let mut row_ptr = Vec::with_capacity(a.rows + 1);
    let mut col_idx = Vec::with_capacity(a.col_idx.len() + b.col_idx.len());
    let mut values = Vec::with_capacity(col_idx.capacity());
    row_ptr.push(0);
    for r in 0..a.rows {
        merge_combine(row(&a, r), row(&b, r), beta, opts.prune_zeros, &mut col_idx, &mut values);
        row_ptr.push(col_idx.len());
    }
    let m = SparseMatrix::from_parts_unchecked(a.rows, a.cols, row_ptr, col_idx, values);
    if m.density() > opts.densify_above {
        Some(m.to_dense().into())
    } else {
        Some(m.into())
    }
}
