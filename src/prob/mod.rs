//! Probability layer: weight arrays with a normalisation invariant.
//!
//! - [`Pmf`] (alias [`Pdf`]): mutable weights, `normalise` enforces sum one.
//! - [`Distribution`]: the normalised, read-only state.
//! - [`LabelledPmf`]: weights addressed by external labels.

mod distribution;
mod labelled;
mod pmf;

pub use distribution::Distribution;
pub use labelled::{HashedLabels, LabelIndex, LabelledPmf, LinearLabels};
pub use pmf::{Pdf, Pmf};
