//! Flat-array kernels.
//!
//! The slice helpers are generic over `num_traits::Float` and switch to Rayon
//! for long inputs when the `rayon` feature is enabled. The registered kernels
//! take the fast path only when both operands expose contiguous storage
//! (`as_flat`), and return `None` otherwise so the engine falls back.

use num_traits::Float;

use crate::config::options::NumericOptions;
use crate::core::traits::{DataMatrix, DataVector};
use crate::core::value::{MatrixValue, VectorValue};
use crate::matrix::DenseMatrix;
use crate::vector::DenseVector;

/// Computes the dot product of two slices: `x^T y`.
#[cfg_attr(not(feature = "rayon"), allow(unused_variables))]
pub fn dot_slices<T: Float + Send + Sync>(x: &[T], y: &[T], par_threshold: usize) -> T {
    assert_eq!(x.len(), y.len(), "Vectors must have the same length");
    #[cfg(feature = "rayon")]
    {
        if x.len() >= par_threshold {
            use rayon::prelude::*;
            return x
                .par_iter()
                .zip(y.par_iter())
                .map(|(xi, yi)| *xi * *yi)
                .reduce(|| T::zero(), |acc, v| acc + v);
        }
    }
    x.iter()
        .zip(y.iter())
        .map(|(xi, yi)| *xi * *yi)
        .fold(T::zero(), |acc, v| acc + v)
}

/// Computes `Σ x_i²`.
#[cfg_attr(not(feature = "rayon"), allow(unused_variables))]
pub fn sum_squares<T: Float + Send + Sync>(x: &[T], par_threshold: usize) -> T {
    #[cfg(feature = "rayon")]
    {
        if x.len() >= par_threshold {
            use rayon::prelude::*;
            return x
                .par_iter()
                .map(|xi| *xi * *xi)
                .reduce(|| T::zero(), |acc, v| acc + v);
        }
    }
    x.iter().map(|xi| *xi * *xi).fold(T::zero(), |acc, v| acc + v)
}

/// `x + beta * y`, element-wise.
pub fn axpy<T: Float>(x: &[T], y: &[T], beta: T) -> Vec<T> {
    assert_eq!(x.len(), y.len(), "Vectors must have the same length");
    x.iter().zip(y).map(|(&xi, &yi)| xi + beta * yi).collect()
}

pub fn vector_norm(v: &dyn DataVector, opts: &NumericOptions) -> Option<f64> {
    Some(sum_squares(v.as_flat()?, opts.parallel_threshold).sqrt())
}

pub fn vector_scale(v: &dyn DataVector, k: f64, _opts: &NumericOptions) -> Option<VectorValue> {
    let data = v.as_flat()?;
    Some(DenseVector::from(data.iter().map(|x| k * x).collect::<Vec<_>>()).into())
}

pub fn vector_dot(a: &dyn DataVector, b: &dyn DataVector, opts: &NumericOptions) -> Option<f64> {
    Some(dot_slices(a.as_flat()?, b.as_flat()?, opts.parallel_threshold))
}

pub fn vector_combine(
    a: &dyn DataVector,
    b: &dyn DataVector,
    beta: f64,
    _opts: &NumericOptions,
) -> Option<VectorValue> {
    Some(DenseVector::from(axpy(a.as_flat()?, b.as_flat()?, beta)).into())
}

pub fn matrix_norm(m: &dyn DataMatrix, opts: &NumericOptions) -> Option<f64> {
    Some(sum_squares(m.as_flat()?, opts.parallel_threshold).sqrt())
}

pub fn matrix_scale(m: &dyn DataMatrix, k: f64, _opts: &NumericOptions) -> Option<MatrixValue> {
    let data = m.as_flat()?;
    let scaled = data.iter().map(|x| k * x).collect();
    DenseMatrix::new(m.rows(), m.cols(), scaled).ok().map(MatrixValue::from)
}

/// Frobenius inner product.
pub fn matrix_dot(a: &dyn DataMatrix, b: &dyn DataMatrix, opts: &NumericOptions) -> Option<f64> {
    Some(dot_slices(a.as_flat()?, b.as_flat()?, opts.parallel_threshold))
}

pub fn matrix_combine(
    a: &dyn DataMatrix,
    b: &dyn DataMatrix,
    beta: f64,
    _opts: &NumericOptions,
) -> Option<MatrixValue> {
    let data = axpy(a.as_flat()?, b.as_flat()?, beta);
    DenseMatrix::new(a.rows(), a.cols(), data).ok().map(MatrixValue::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::SparseVector;
    use approx::assert_abs_diff_eq;

    #[test]
    fn dot_and_norm() {
        let x = [1.0, 2.0, 3.0];
        let y = [4.0, -5.0, 6.0];
        assert_abs_diff_eq!(dot_slices(&x, &y, 1 << 20), 12.0, epsilon = 1e-12);
        assert_abs_diff_eq!(sum_squares(&x, 1 << 20), 14.0, epsilon = 1e-12);
    }

    #[test]
    fn parallel_path_agrees_with_serial() {
        let x: Vec<f64> = (0..1000).map(|i| (i as f64).sin()).collect();
        let y: Vec<f64> = (0..1000).map(|i| (i as f64).cos()).collect();
        assert_abs_diff_eq!(dot_slices(&x, &y, 1), dot_slices(&x, &y, usize::MAX), epsilon = 1e-9);
        assert_abs_diff_eq!(sum_squares(&x, 1), sum_squares(&x, usize::MAX), epsilon = 1e-9);
    }

    #[test]
    fn generic_over_float_width() {
        let x = [1.5f32, 2.0];
        assert_eq!(dot_slices(&x, &x, usize::MAX), 6.25f32);
        assert_eq!(axpy(&x, &x, -1.0f32), vec![0.0, 0.0]);
    }

    #[test]
    fn declines_non_flat_operands() {
        let opts = NumericOptions::default();
        let d = DenseVector::from(vec![1.0, 2.0]);
        let s = SparseVector::new(2, &[0], &[1.0]).unwrap();
        assert!(vector_dot(&d, &s, &opts).is_none());
        assert!(vector_norm(&s, &opts).is_none());
        assert_eq!(vector_dot(&d, &d, &opts), Some(5.0));
    }
}
