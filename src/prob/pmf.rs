//! Fixed-size probability mass function.
//!
//! A `Pmf` holds non-negative weights that only become probabilities after
//! [`Pmf::normalise`]. Element access is total: `get` returns `0.0` and the
//! mutators do nothing for an index outside `[0, size)`.

use tracing::debug;

use crate::core::kind::{Capabilities, Dims, Kind};
use crate::core::traits::{DataObject, DataVector, FlatArray, SettableVector};
use crate::error::{NumericError, Result};
use crate::prob::Distribution;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Pmf {
    weights: Vec<f64>,
}

/// A discretised density uses the same weight array.
pub type Pdf = Pmf;

impl Pmf {
    /// All weights zero.
    pub fn new(size: usize) -> Self {
        Self { weights: vec![0.0; size] }
    }

    /// All weights `1 / size`.
    pub fn uniform(size: usize) -> Self {
        let mut p = Self::new(size);
        p.fill_uniform();
        p
    }

    /// Take the weights as given; they are checked when normalising.
    pub fn from_weights(weights: Vec<f64>) -> Self {
        Self { weights }
    }

    pub fn size(&self) -> usize {
        self.weights.len()
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn get(&self, i: usize) -> f64 {
        self.weights.get(i).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, i: usize, v: f64) {
        if let Some(w) = self.weights.get_mut(i) {
            *w = v;
        }
    }

    pub fn add(&mut self, i: usize, v: f64) {
        if let Some(w) = self.weights.get_mut(i) {
            *w += v;
        }
    }

    pub fn mult(&mut self, i: usize, v: f64) {
        if let Some(w) = self.weights.get_mut(i) {
            *w *= v;
        }
    }

    pub fn total(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// First weight that is negative, infinite or NaN.
    fn find_invalid(weights: &[f64]) -> Option<(usize, f64)> {
        weights
            .iter()
            .copied()
            .enumerate()
            .find(|&(_, w)| w < 0.0 || !w.is_finite())
    }

    fn fill_uniform(&mut self) {
        let u = 1.0 / self.weights.len() as f64;
        self.weights.iter_mut().for_each(|w| *w = u);
    }

    /// Divide finite non-negative weights by their total and return that
    /// total. Leaves the slice alone and returns `0.0` when every weight is
    /// zero. A total that overflows is taken relative to the largest weight,
    /// so the result still sums to one; the returned total is then `inf`.
    fn rescale(weights: &mut [f64]) -> f64 {
        let total: f64 = weights.iter().sum();
        if total == 0.0 {
            return 0.0;
        }
        if total.is_finite() {
            weights.iter_mut().for_each(|w| *w /= total);
            return total;
        }
        let max = weights.iter().copied().fold(0.0, f64::max);
        weights.iter_mut().for_each(|w| *w /= max);
        let relative: f64 = weights.iter().sum();
        weights.iter_mut().for_each(|w| *w /= relative);
        max * relative
    }

    /// Rescale so the weights sum to one.
    ///
    /// An all-zero array becomes uniform. A negative or non-finite weight
    /// fails with [`NumericError::InvariantViolation`] and leaves every weight
    /// untouched.
    pub fn normalise(&mut self) -> Result<()> {
        if let Some((index, value)) = Self::find_invalid(&self.weights) {
            return Err(NumericError::InvariantViolation { index, value });
        }
        if Self::rescale(&mut self.weights) == 0.0 {
            debug!(size = self.size(), "all-zero weights reset to uniform");
            self.fill_uniform();
        }
        Ok(())
    }

    /// Multiply each weight by its likelihood and normalise.
    ///
    /// Returns the normalising constant (the total before rescaling), which is
    /// the probability of the observation under the prior. The weights are
    /// only replaced once the whole update has succeeded.
    pub fn bayes_update(&mut self, likelihood: &dyn DataVector) -> Result<f64> {
        if likelihood.len() != self.size() {
            return Err(NumericError::mismatch("bayes_update", self.dims(), likelihood.dims()));
        }
        let likelihood: Vec<f64> = likelihood.iter().collect();
        if let Some((index, value)) = Self::find_invalid(&likelihood) {
            return Err(NumericError::InvariantViolation { index, value });
        }
        if let Some((index, value)) = Self::find_invalid(&self.weights) {
            return Err(NumericError::InvariantViolation { index, value });
        }
        let mut posterior: Vec<f64> = self.weights.iter().zip(&likelihood).map(|(w, l)| w * l).collect();
        // a finite product can still overflow
        if let Some((index, value)) = Self::find_invalid(&posterior) {
            return Err(NumericError::InvariantViolation { index, value });
        }
        let evidence = Self::rescale(&mut posterior);
        self.weights = posterior;
        if evidence == 0.0 {
            debug!(size = self.size(), "zero evidence, posterior reset to uniform");
            self.fill_uniform();
        }
        Ok(evidence)
    }

    /// Normalise and freeze into a read-only [`Distribution`].
    pub fn into_normalised(mut self) -> Result<Distribution> {
        self.normalise()?;
        Ok(Distribution::from_normalised(self.weights))
    }
}

impl From<Vec<f64>> for Pmf {
    fn from(weights: Vec<f64>) -> Self {
        Self::from_weights(weights)
    }
}

impl DataObject for Pmf {
    fn dims(&self) -> Dims {
        Dims::Vector(self.weights.len())
    }

    fn kind(&self) -> Kind {
        Kind::Dense
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::FLAT_ARRAY | Capabilities::SETTABLE
    }

    fn as_vector(&self) -> Option<&dyn DataVector> {
        Some(self)
    }
}

impl DataVector for Pmf {
    fn len(&self) -> usize {
        self.weights.len()
    }

    fn get(&self, i: usize) -> f64 {
        Pmf::get(self, i)
    }

    fn as_flat(&self) -> Option<&[f64]> {
        Some(&self.weights)
    }
}

impl FlatArray for Pmf {
    fn as_slice(&self) -> &[f64] {
        &self.weights
    }
}

impl SettableVector for Pmf {
    fn set(&mut self, i: usize, v: f64) {
        Pmf::set(self, i, v)
    }

    fn set_all(&mut self, src: &dyn DataVector) -> Result<()> {
        if src.len() != self.size() {
            return Err(NumericError::mismatch("set_all", self.dims(), src.dims()));
        }
        for (w, v) in self.weights.iter_mut().zip(src.iter()) {
            *w = v;
        }
        Ok(())
    }
}
