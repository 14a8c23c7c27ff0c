//! Probability mass function over an external label set.
//!
//! Labels are fixed at construction and map to positions `0..n` in the order
//! given. Lookup from label to position is delegated to a [`LabelIndex`]:
//! [`LinearLabels`] scans the label list (no extra memory, fine for a handful
//! of labels), [`HashedLabels`] keeps a `HashMap` (constant-time lookup for
//! large label sets). Both agree on every result. If a label appears more than
//! once, lookup returns its first position, while `label(i)` still reports
//! whatever was given at position `i`.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::marker::PhantomData;

use crate::error::Result;
use crate::prob::{Distribution, Pmf};

/// Label → position lookup strategy.
pub trait LabelIndex<L> {
    fn build(labels: &[L]) -> Self;

    fn position<Q>(&self, labels: &[L], label: &Q) -> Option<usize>
    where
        L: Borrow<Q>,
        Q: Hash + Eq + ?Sized;
}

/// Linear scan over the label list.
#[derive(Debug, Clone, Default)]
pub struct LinearLabels<L> {
    _marker: PhantomData<fn(&L)>,
}

impl<L> LabelIndex<L> for LinearLabels<L> {
    fn build(_labels: &[L]) -> Self {
        Self { _marker: PhantomData }
    }

    fn position<Q>(&self, labels: &[L], label: &Q) -> Option<usize>
    where
        L: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        labels.iter().position(|l| Borrow::<Q>::borrow(l) == label)
    }
}

/// Hash map from label to its first position.
#[derive(Debug, Clone)]
pub struct HashedLabels<L> {
    map: HashMap<L, usize>,
}

impl<L: Hash + Eq + Clone> LabelIndex<L> for HashedLabels<L> {
    fn build(labels: &[L]) -> Self {
        let mut map = HashMap::with_capacity(labels.len());
        for (i, l) in labels.iter().enumerate() {
            map.entry(l.clone()).or_insert(i);
        }
        Self { map }
    }

    fn position<Q>(&self, _labels: &[L], label: &Q) -> Option<usize>
    where
        L: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.get(label).copied()
    }
}

/// A [`Pmf`] addressed by label.
///
/// Unknown labels behave like out-of-range indices: reads give `0.0`, writes
/// are ignored.
#[derive(Debug, Clone)]
pub struct LabelledPmf<L, I = HashedLabels<L>> {
    labels: Vec<L>,
    lookup: I,
    pmf: Pmf,
}

impl<L: Hash + Eq + Clone> LabelledPmf<L> {
    /// Zero weights over `labels`, with hashed lookup.
    pub fn new(labels: impl IntoIterator<Item = L>) -> Self {
        Self::with_index(labels)
    }
}

impl<L, I: LabelIndex<L>> LabelledPmf<L, I> {
    /// Zero weights over `labels`, with the lookup strategy `I`.
    pub fn with_index(labels: impl IntoIterator<Item = L>) -> Self {
        let labels: Vec<L> = labels.into_iter().collect();
        let lookup = I::build(&labels);
        let pmf = Pmf::new(labels.len());
        Self { labels, lookup, pmf }
    }

    pub fn size(&self) -> usize {
        self.labels.len()
    }

    pub fn index<Q>(&self, label: &Q) -> Option<usize>
    where
        L: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lookup.position(&self.labels, label)
    }

    pub fn label(&self, i: usize) -> Option<&L> {
        self.labels.get(i)
    }

    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    pub fn prob<Q>(&self, label: &Q) -> f64
    where
        L: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index(label).map_or(0.0, |i| self.pmf.get(i))
    }

    pub fn set<Q>(&mut self, label: &Q, v: f64)
    where
        L: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if let Some(i) = self.index(label) {
            self.pmf.set(i, v);
        }
    }

    pub fn add<Q>(&mut self, label: &Q, v: f64)
    where
        L: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if let Some(i) = self.index(label) {
            self.pmf.add(i, v);
        }
    }

    pub fn mult<Q>(&mut self, label: &Q, v: f64)
    where
        L: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if let Some(i) = self.index(label) {
            self.pmf.mult(i, v);
        }
    }

    pub fn normalise(&mut self) -> Result<()> {
        self.pmf.normalise()
    }

    /// Positional weights.
    pub fn pmf(&self) -> &Pmf {
        &self.pmf
    }

    pub fn pmf_mut(&mut self) -> &mut Pmf {
        &mut self.pmf
    }

    /// `(label, weight)` pairs in position order.
    pub fn iter(&self) -> impl Iterator<Item = (&L, f64)> + '_ {
        self.labels.iter().zip(self.pmf.weights().iter().copied())
    }

    /// Label with the highest weight; the earliest on ties.
    pub fn most_likely(&self) -> Option<&L> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &w) in self.pmf.weights().iter().enumerate() {
            if best.is_none_or(|(_, b)| w > b) {
                best = Some((i, w));
            }
        }
        best.and_then(|(i, _)| self.labels.get(i))
    }

    /// Normalise and split into the labels and a read-only distribution.
    pub fn into_normalised(self) -> Result<(Vec<L>, Distribution)> {
        let dist = self.pmf.into_normalised()?;
        Ok((self.labels, dist))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bowls() {
        let mut p = LabelledPmf::new(["Bowl 1", "Bowl 2"]);
        assert_eq!(p.index("Bowl 1"), Some(0));
        assert_eq!(p.index("Bowl 2"), Some(1));
        assert_eq!(p.index("Bowl 3"), None);
        p.set("Bowl 1", 1.0);
        p.set("Bowl 2", 1.0);
        p.normalise().unwrap();
        p.mult("Bowl 1", 0.75);
        p.mult("Bowl 2", 0.5);
        p.normalise().unwrap();
        assert_eq!(p.prob("Bowl 1"), 0.6);
        assert_eq!(p.prob("Bowl 2"), 0.4);
        assert_eq!(p.most_likely(), Some(&"Bowl 1"));
    }

    #[test]
    fn owned_labels_look_up_by_borrowed_form() {
        let p: LabelledPmf<String, LinearLabels<String>> =
            LabelledPmf::with_index(["a".to_string(), "b".to_string()]);
        assert_eq!(p.index("b"), Some(1));
        assert_eq!(p.label(0).map(String::as_str), Some("a"));
        assert_eq!(p.label(2), None);
    }

    #[test]
    fn duplicates_resolve_to_first_position() {
        let labels = ["x", "y", "x"];
        let hashed = LabelledPmf::new(labels);
        let linear: LabelledPmf<&str, LinearLabels<&str>> = LabelledPmf::with_index(labels);
        assert_eq!(hashed.index("x"), Some(0));
        assert_eq!(linear.index("x"), Some(0));
        assert_eq!(hashed.label(2), Some(&"x"));
        assert_eq!(hashed.size(), 3);
    }

    #[test]
    fn unknown_labels_are_ignored() {
        let mut p = LabelledPmf::new([1u32, 2, 3]);
        p.add(&9u32, 5.0);
        p.add(&2u32, 2.0);
        assert_eq!(p.prob(&9u32), 0.0);
        let (labels, dist) = p.into_normalised().unwrap();
        assert_eq!(labels, vec![1, 2, 3]);
        assert_eq!(dist.probs(), &[0.0, 1.0, 0.0]);
    }
}
