//! Feature vector representation and the per-problem extractor trait.

use std::collections::BTreeMap;

use crate::error::UndefinedFeatureError;

/// A single feature value: a scalar or a small fixed-length array.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FeatureValue {
    Scalar(f64),
    Vector(Vec<f64>),
}

impl FeatureValue {
    /// Returns the scalar value, or `None` for vector features.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            FeatureValue::Scalar(v) => Some(*v),
            FeatureValue::Vector(_) => None,
        }
    }

    /// Returns the vector value, or `None` for scalar features.
    pub fn as_vector(&self) -> Option<&[f64]> {
        match self {
            FeatureValue::Scalar(_) => None,
            FeatureValue::Vector(v) => Some(v),
        }
    }
}

impl From<f64> for FeatureValue {
    fn from(v: f64) -> Self {
        FeatureValue::Scalar(v)
    }
}

impl From<Vec<f64>> for FeatureValue {
    fn from(v: Vec<f64>) -> Self {
        FeatureValue::Vector(v)
    }
}

/// A flat mapping from stable feature names to numeric values.
///
/// Backed by a `BTreeMap` so iteration order is deterministic: two
/// vectors built from the same inputs compare equal and serialize
/// identically, which downstream normalization relies on.
///
/// # Examples
///
/// ```
/// use heur_core::features::{FeatureValue, FeatureVector};
///
/// let mut fv = FeatureVector::new();
/// fv.insert("node_count", 5.0);
/// fv.insert("loads", vec![0.5, 0.25]);
///
/// assert_eq!(fv.scalar("node_count"), Some(5.0));
/// assert_eq!(fv.get("loads"), Some(&FeatureValue::Vector(vec![0.5, 0.25])));
/// assert_eq!(fv.names().collect::<Vec<_>>(), vec!["loads", "node_count"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FeatureVector {
    entries: BTreeMap<&'static str, FeatureValue>,
}

impl FeatureVector {
    pub fn new() -> Self {
        Self { entries: BTreeMap::new() }
    }

    /// Inserts a feature under a stable key, replacing any previous value.
    pub fn insert(&mut self, name: &'static str, value: impl Into<FeatureValue>) {
        self.entries.insert(name, value.into());
    }

    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.entries.get(name)
    }

    /// Convenience accessor for scalar features.
    pub fn scalar(&self, name: &str) -> Option<f64> {
        self.entries.get(name).and_then(FeatureValue::as_scalar)
    }

    /// Feature names in sorted (iteration) order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FeatureValue)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Per-problem feature extraction: instance-only and instance + state.
///
/// Implemented on the instance type of each problem domain. Both methods
/// take shared references and must be pure — the compiler enforces
/// no-mutation, the implementations must supply determinism (no clocks,
/// no randomness, no iteration over unordered containers).
///
/// `instance_feature_names` / `state_feature_names` document the exact
/// key set each method emits, so a selection agent can pre-allocate its
/// normalization tables without probing.
pub trait FeatureExtractor {
    /// The state snapshot type this instance's extractors read.
    type State;

    /// Summarizes static instance structure.
    fn instance_features(&self) -> Result<FeatureVector, UndefinedFeatureError>;

    /// Summarizes the live solution state against this instance.
    fn state_features(&self, state: &Self::State) -> Result<FeatureVector, UndefinedFeatureError>;

    /// The stable key set of [`instance_features`](Self::instance_features).
    fn instance_feature_names() -> &'static [&'static str];

    /// The stable key set of [`state_features`](Self::state_features).
    fn state_feature_names() -> &'static [&'static str];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_lookup() {
        let mut fv = FeatureVector::new();
        fv.insert("a", 1.0);
        fv.insert("b", vec![1.0, 2.0]);

        assert_eq!(fv.len(), 2);
        assert_eq!(fv.scalar("a"), Some(1.0));
        assert_eq!(fv.scalar("b"), None);
        assert_eq!(fv.get("b").unwrap().as_vector(), Some(&[1.0, 2.0][..]));
        assert_eq!(fv.get("missing"), None);
    }

    #[test]
    fn test_insert_replaces() {
        let mut fv = FeatureVector::new();
        fv.insert("a", 1.0);
        fv.insert("a", 2.0);
        assert_eq!(fv.len(), 1);
        assert_eq!(fv.scalar("a"), Some(2.0));
    }

    #[test]
    fn test_deterministic_order() {
        let mut fv = FeatureVector::new();
        fv.insert("zeta", 1.0);
        fv.insert("alpha", 2.0);
        fv.insert("mid", 3.0);

        let names: Vec<_> = fv.names().collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_equality_of_identically_built_vectors() {
        let build = || {
            let mut fv = FeatureVector::new();
            fv.insert("x", 0.5);
            fv.insert("ys", vec![1.0, 2.0, 3.0]);
            fv
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn test_empty() {
        let fv = FeatureVector::new();
        assert!(fv.is_empty());
        assert_eq!(fv.names().count(), 0);
    }
}
