//! Normalised, read-only probability distribution.
//!
//! A `Distribution` can only be obtained from [`Pmf::into_normalised`], so its
//! weights are known to be non-negative and to sum to one. Mutating again
//! requires converting back with [`Distribution::into_pmf`].

use crate::core::kind::{Capabilities, Dims, Kind};
use crate::core::traits::{DataObject, DataVector, FlatArray};
use crate::prob::Pmf;

#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    probs: Vec<f64>,
}

impl Distribution {
    pub(crate) fn from_normalised(probs: Vec<f64>) -> Self {
        Self { probs }
    }

    pub fn size(&self) -> usize {
        self.probs.len()
    }

    pub fn probs(&self) -> &[f64] {
        &self.probs
    }

    /// `P(i)`; `0.0` outside the support.
    pub fn prob(&self, i: usize) -> f64 {
        self.probs.get(i).copied().unwrap_or(0.0)
    }

    /// Expected index, `Σ i·p_i`.
    pub fn mean(&self) -> f64 {
        self.probs.iter().enumerate().map(|(i, p)| i as f64 * p).sum()
    }

    /// Index of the largest probability; the lowest such index on ties.
    pub fn mode(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &p) in self.probs.iter().enumerate() {
            if best.is_none_or(|(_, b)| p > b) {
                best = Some((i, p));
            }
        }
        best.map(|(i, _)| i)
    }

    /// Shannon entropy in nats.
    pub fn entropy(&self) -> f64 {
        -self
            .probs
            .iter()
            .filter(|&&p| p > 0.0)
            .map(|&p| p * p.ln())
            .sum::<f64>()
    }

    /// `P(X ≤ i)`.
    pub fn cdf(&self, i: usize) -> f64 {
        if self.probs.is_empty() {
            return 0.0;
        }
        if i >= self.probs.len() - 1 {
            return 1.0;
        }
        self.probs[..=i].iter().sum()
    }

    /// Smallest index whose cumulative probability reaches `u`.
    ///
    /// Feeding uniform draws from `[0, 1)` samples from the distribution.
    /// `u` is clamped to `[0, 1]`; `None` only for an empty distribution.
    pub fn quantile_index(&self, u: f64) -> Option<usize> {
        let last = self.probs.len().checked_sub(1)?;
        let u = u.clamp(0.0, 1.0);
        let mut acc = 0.0;
        for (i, &p) in self.probs.iter().enumerate() {
            acc += p;
            if acc >= u && p > 0.0 {
                return Some(i);
            }
        }
        // rounding left the running total just below u
        Some(self.probs.iter().rposition(|&p| p > 0.0).unwrap_or(last))
    }

    pub fn into_pmf(self) -> Pmf {
        Pmf::from_weights(self.probs)
    }
}

impl DataObject for Distribution {
    fn dims(&self) -> Dims {
        Dims::Vector(self.probs.len())
    }

    fn kind(&self) -> Kind {
        Kind::Dense
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::FLAT_ARRAY
    }

    fn as_vector(&self) -> Option<&dyn DataVector> {
        Some(self)
    }
}

impl DataVector for Distribution {
    fn len(&self) -> usize {
        self.probs.len()
    }

    fn get(&self, i: usize) -> f64 {
        self.prob(i)
    }

    fn sum(&self) -> f64 {
        self.probs.iter().sum()
    }

    fn as_flat(&self) -> Option<&[f64]> {
        Some(&self.probs)
    }
}

impl FlatArray for Distribution {
    fn as_slice(&self) -> &[f64] {
        &self.probs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn dist(w: &[f64]) -> Distribution {
        Pmf::from_weights(w.to_vec()).into_normalised().unwrap()
    }

    #[test]
    fn summary_statistics() {
        let d = dist(&[1.0, 2.0, 1.0]);
        assert_abs_diff_eq!(d.mean(), 1.0, epsilon = 1e-12);
        assert_eq!(d.mode(), Some(1));
        assert_abs_diff_eq!(d.entropy(), 1.5 * 2f64.ln(), epsilon = 1e-12);
        assert_abs_diff_eq!(d.cdf(0), 0.25, epsilon = 1e-12);
        assert_eq!(d.cdf(10), 1.0);
    }

    #[test]
    fn cdf_is_total_over_indices() {
        let d = dist(&[1.0, 3.0]);
        assert_eq!(d.cdf(1), 1.0);
        assert_eq!(d.cdf(usize::MAX), 1.0);
        assert_eq!(Pmf::new(0).into_normalised().unwrap().cdf(usize::MAX), 0.0);
    }

    #[test]
    fn mode_prefers_lowest_index() {
        assert_eq!(dist(&[1.0, 1.0]).mode(), Some(0));
        assert_eq!(Pmf::new(0).into_normalised().unwrap().mode(), None);
    }

    #[test]
    fn quantiles_skip_empty_cells() {
        let d = dist(&[0.0, 1.0, 0.0, 1.0, 0.0]);
        assert_eq!(d.quantile_index(0.0), Some(1));
        assert_eq!(d.quantile_index(0.5), Some(1));
        assert_eq!(d.quantile_index(0.51), Some(3));
        assert_eq!(d.quantile_index(7.0), Some(3));
        assert_eq!(Pmf::new(0).into_normalised().unwrap().quantile_index(0.3), None);
    }

    #[test]
    fn round_trip_to_pmf() {
        let mut p = dist(&[3.0, 1.0]).into_pmf();
        p.mult(1, 3.0);
        p.normalise().unwrap();
        assert_eq!(p.weights(), &[0.5, 0.5]);
    }
}
