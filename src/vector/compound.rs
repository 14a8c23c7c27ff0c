//! Compound vectors: computed views over other vectors without storage of their own.

use std::sync::Arc;

use crate::core::kind::{Dims, Kind};
use crate::core::traits::{DataObject, DataVector};

/// A vector shared between compound views.
pub type SharedVector = Arc<dyn DataVector + Send + Sync>;

#[derive(Debug, Clone)]
enum Composition {
    /// Parts laid end to end; `offsets[k]` is where part `k` starts.
    Concat {
        parts: Vec<SharedVector>,
        offsets: Vec<usize>,
        len: usize,
    },
    /// `factor * inner`, evaluated on access.
    Scaled { inner: SharedVector, factor: f64 },
}

#[derive(Debug, Clone)]
pub struct CompoundVector {
    form: Composition,
}

impl CompoundVector {
    pub fn concat(parts: Vec<SharedVector>) -> Self {
        let mut offsets = Vec::with_capacity(parts.len());
        let mut len = 0;
        for p in &parts {
            offsets.push(len);
            len += p.len();
        }
        Self { form: Composition::Concat { parts, offsets, len } }
    }

    pub fn scaled(inner: SharedVector, factor: f64) -> Self {
        Self { form: Composition::Scaled { inner, factor } }
    }

    /// The wrapped vectors, in order.
    pub fn parts(&self) -> Vec<&SharedVector> {
        match &self.form {
            Composition::Concat { parts, .. } => parts.iter().collect(),
            Composition::Scaled { inner, .. } => vec![inner],
        }
    }
}

impl DataObject for CompoundVector {
    fn dims(&self) -> Dims {
        Dims::Vector(self.len())
    }

    fn kind(&self) -> Kind {
        Kind::Compound
    }

    fn as_vector(&self) -> Option<&dyn DataVector> {
        Some(self)
    }
}

impl DataVector for CompoundVector {
    fn len(&self) -> usize {
        match &self.form {
            Composition::Concat { len, .. } => *len,
            Composition::Scaled { inner, .. } => inner.len(),
        }
    }

    fn get(&self, i: usize) -> f64 {
        match &self.form {
            Composition::Concat { parts, offsets, len } => {
                if i >= *len {
                    return 0.0;
                }
                // last part starting at or before i; empty parts are skipped over
                let k = offsets.partition_point(|&o| o <= i) - 1;
                parts[k].get(i - offsets[k])
            }
            Composition::Scaled { inner, factor } => factor * inner.get(i),
        }
    }

    fn iter(&self) -> Box<dyn Iterator<Item = f64> + '_> {
        match &self.form {
            Composition::Concat { parts, .. } => Box::new(parts.iter().flat_map(|p| p.iter())),
            Composition::Scaled { inner, factor } => {
                let factor = *factor;
                Box::new(inner.iter().map(move |v| factor * v))
            }
        }
    }

    fn nonzeros(&self) -> Box<dyn Iterator<Item = (usize, f64)> + '_> {
        match &self.form {
            Composition::Concat { parts, offsets, .. } => Box::new(
                parts
                    .iter()
                    .zip(offsets.iter().copied())
                    .flat_map(|(p, off)| p.nonzeros().map(move |(i, v)| (i + off, v))),
            ),
            Composition::Scaled { inner, factor } => {
                let factor = *factor;
                Box::new(
                    inner
                        .nonzeros()
                        .map(move |(i, v)| (i, factor * v))
                        .filter(|&(_, v)| v != 0.0),
                )
            }
        }
    }
}
