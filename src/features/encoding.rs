//! One-hot encoders for categorical and bucketed numeric features.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use crate::error::{NumericError, Result};
use crate::features::FeatureVector;

/// One-hot encoding over a fixed set of categories.
///
/// Encoding an unknown category yields the all-zero vector.
#[derive(Debug, Clone)]
pub struct CategoricalEncoder<L> {
    labels: Vec<L>,
    positions: HashMap<L, usize>,
}

impl<L: Hash + Eq + Clone> CategoricalEncoder<L> {
    /// Categories in output order. A repeated category is an error.
    pub fn new(labels: impl IntoIterator<Item = L>) -> Result<Self> {
        let labels: Vec<L> = labels.into_iter().collect();
        let mut positions = HashMap::with_capacity(labels.len());
        for (i, l) in labels.iter().enumerate() {
            if positions.insert(l.clone(), i).is_some() {
                return Err(NumericError::DuplicateIndex(i));
            }
        }
        Ok(Self { labels, positions })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    pub fn position<Q>(&self, label: &Q) -> Option<usize>
    where
        L: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.positions.get(label).copied()
    }

    pub fn encode<Q>(&self, label: &Q) -> FeatureVector
    where
        L: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        FeatureVector::one_hot(self.len(), self.position(label))
    }
}

/// One-hot encoding over half-open buckets `[edges[k], edges[k + 1])`.
///
/// Values below the first edge, at or above the last edge, or NaN encode as
/// the all-zero vector.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketEncoder {
    edges: Vec<f64>,
}

impl BucketEncoder {
    /// At least two finite, strictly increasing edges.
    pub fn new(edges: Vec<f64>) -> Result<Self> {
        if edges.len() < 2 {
            return Err(NumericError::InvalidArgument(format!(
                "bucket encoder needs at least 2 edges, got {}",
                edges.len()
            )));
        }
        if edges.iter().any(|e| !e.is_finite()) || edges.windows(2).any(|w| w[0] >= w[1]) {
            return Err(NumericError::InvalidArgument(
                "bucket edges must be finite and strictly increasing".into(),
            ));
        }
        Ok(Self { edges })
    }

    /// Number of buckets (one fewer than edges).
    pub fn len(&self) -> usize {
        self.edges.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    pub fn bucket(&self, x: f64) -> Option<usize> {
        // first edge strictly greater than x
        let upper = self.edges.partition_point(|&e| e <= x);
        (upper > 0 && upper < self.edges.len()).then(|| upper - 1)
    }

    pub fn encode(&self, x: f64) -> FeatureVector {
        FeatureVector::one_hot(self.len(), self.bucket(x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::DataVector;

    #[test]
    fn categorical_one_hot() {
        let enc = CategoricalEncoder::new(["MCG".to_string(), "Docklands".to_string(), "Gabba".to_string()]).unwrap();
        assert_eq!(enc.encode("Docklands").nonzeros().collect::<Vec<_>>(), vec![(1, 1.0)]);
        assert_eq!(enc.encode("Optus").nonzeros().count(), 0);
        assert_eq!(enc.encode("Gabba").length(), 3);
    }

    #[test]
    fn categorical_rejects_repeats() {
        assert!(matches!(CategoricalEncoder::new(["a", "b", "a"]), Err(NumericError::DuplicateIndex(2))));
    }

    #[test]
    fn buckets_are_half_open() {
        let enc = BucketEncoder::new(vec![0.0, 12.0, 17.0, 24.0]).unwrap();
        assert_eq!(enc.len(), 3);
        assert_eq!(enc.bucket(0.0), Some(0));
        assert_eq!(enc.bucket(11.99), Some(0));
        assert_eq!(enc.bucket(12.0), Some(1));
        assert_eq!(enc.bucket(19.5), Some(2));
        assert_eq!(enc.bucket(24.0), None);
        assert_eq!(enc.bucket(-1.0), None);
        assert_eq!(enc.bucket(f64::NAN), None);
        assert_eq!(enc.encode(13.0), FeatureVector::dense(vec![0.0, 1.0, 0.0]));
    }

    #[test]
    fn bucket_edges_are_validated() {
        assert!(BucketEncoder::new(vec![1.0]).is_err());
        assert!(BucketEncoder::new(vec![0.0, 0.0]).is_err());
        assert!(BucketEncoder::new(vec![0.0, f64::INFINITY]).is_err());
    }
}
