//! Multidimensional knapsack.
//!
//! A solution picks a subset of items; each of several resources has a
//! capacity and every item weighs on every resource. The weight matrix
//! is resource-major: `weights[r][i]` is item `i`'s load on resource
//! `r`.

use crate::error::{MalformedInputError, UndefinedFeatureError};
use crate::features::{self, FeatureExtractor, FeatureVector};

/// Immutable per-instance facts for the knapsack problem.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MkpInstance {
    profits: Vec<f64>,
    weights: Vec<Vec<f64>>,
    capacities: Vec<f64>,
}

impl MkpInstance {
    pub fn new(
        profits: Vec<f64>,
        weights: Vec<Vec<f64>>,
        capacities: Vec<f64>,
    ) -> Result<Self, MalformedInputError> {
        if profits.is_empty() {
            return Err(MalformedInputError::Empty { what: "profit vector" });
        }
        if capacities.is_empty() {
            return Err(MalformedInputError::Empty { what: "capacity vector" });
        }
        if weights.len() != capacities.len() {
            return Err(MalformedInputError::DimensionMismatch {
                what: "weight matrix rows",
                expected: capacities.len(),
                actual: weights.len(),
            });
        }
        for row in &weights {
            if row.len() != profits.len() {
                return Err(MalformedInputError::DimensionMismatch {
                    what: "weight matrix row length",
                    expected: profits.len(),
                    actual: row.len(),
                });
            }
        }
        Ok(Self { profits, weights, capacities })
    }

    pub fn num_items(&self) -> usize {
        self.profits.len()
    }

    pub fn num_resources(&self) -> usize {
        self.capacities.len()
    }

    pub fn profit(&self, item: usize) -> f64 {
        self.profits[item]
    }

    pub fn capacity(&self, resource: usize) -> f64 {
        self.capacities[resource]
    }

    pub fn weight(&self, resource: usize, item: usize) -> f64 {
        self.weights[resource][item]
    }

    pub fn selection_profit(&self, selection: &[bool]) -> f64 {
        selection
            .iter()
            .zip(&self.profits)
            .filter(|(&picked, _)| picked)
            .map(|(_, &p)| p)
            .sum()
    }

    /// Load every selected item places on each resource.
    pub fn resource_loads(&self, selection: &[bool]) -> Vec<f64> {
        self.weights
            .iter()
            .map(|row| {
                selection
                    .iter()
                    .zip(row)
                    .filter(|(&picked, _)| picked)
                    .map(|(_, &w)| w)
                    .sum()
            })
            .collect()
    }

    /// Structural validity: one flag per item, no resource over capacity.
    pub fn validate_solution(&self, selection: &[bool]) -> bool {
        if selection.len() != self.num_items() {
            return false;
        }
        self.resource_loads(selection)
            .iter()
            .zip(&self.capacities)
            .all(|(&load, &cap)| load <= cap)
    }
}

/// Snapshot of the current item selection.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MkpState {
    resource_loads: Vec<f64>,
    total_profit: f64,
    selected: usize,
    valid: bool,
}

impl MkpState {
    /// Derives a fresh snapshot from the current selection.
    pub fn capture(
        instance: &MkpInstance,
        selection: &[bool],
    ) -> Result<Self, MalformedInputError> {
        if selection.len() != instance.num_items() {
            return Err(MalformedInputError::DimensionMismatch {
                what: "selection length",
                expected: instance.num_items(),
                actual: selection.len(),
            });
        }
        Ok(Self {
            resource_loads: instance.resource_loads(selection),
            total_profit: instance.selection_profit(selection),
            selected: selection.iter().filter(|&&p| p).count(),
            valid: instance.validate_solution(selection),
        })
    }

    pub fn resource_loads(&self) -> &[f64] {
        &self.resource_loads
    }

    pub fn total_profit(&self) -> f64 {
        self.total_profit
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn valid(&self) -> bool {
        self.valid
    }
}

impl FeatureExtractor for MkpInstance {
    type State = MkpState;

    /// Keys: `item_count`, `profit_max`, `profit_mean`, `profit_total`,
    /// `resource_count`, `tightness_mean`. Per-resource tightness is
    /// `capacity / total_weight`; a resource nothing weighs on makes it
    /// undefined and raises [`UndefinedFeatureError`].
    fn instance_features(&self) -> Result<FeatureVector, UndefinedFeatureError> {
        let mut tightness = Vec::with_capacity(self.num_resources());
        for (row, &cap) in self.weights.iter().zip(&self.capacities) {
            let total: f64 = row.iter().sum();
            if total == 0.0 {
                return Err(UndefinedFeatureError::new(
                    "tightness_mean",
                    "a resource has zero total weight",
                ));
            }
            tightness.push(cap / total);
        }

        let mut fv = FeatureVector::new();
        fv.insert("item_count", self.num_items() as f64);
        fv.insert("resource_count", self.num_resources() as f64);
        fv.insert("profit_mean", features::mean(&self.profits).unwrap_or(0.0));
        fv.insert("profit_max", features::max(&self.profits).unwrap_or(0.0));
        fv.insert("profit_total", self.profits.iter().sum::<f64>());
        fv.insert("tightness_mean", features::mean(&tightness).unwrap_or(0.0));
        Ok(fv)
    }

    /// Keys: `is_valid`, `load_ratio_max`, `load_ratio_mean`,
    /// `selected_count`, `selected_ratio`, `slack_min`, `total_profit`.
    /// Load ratios treat a zero-capacity resource as fully loaded only
    /// if anything is on it.
    fn state_features(&self, state: &MkpState) -> Result<FeatureVector, UndefinedFeatureError> {
        let ratios: Vec<f64> = state
            .resource_loads()
            .iter()
            .zip(&self.capacities)
            .map(|(&load, &cap)| if cap > 0.0 { load / cap } else if load > 0.0 { 1.0 } else { 0.0 })
            .collect();
        let slacks: Vec<f64> = state
            .resource_loads()
            .iter()
            .zip(&self.capacities)
            .map(|(&load, &cap)| cap - load)
            .collect();

        let mut fv = FeatureVector::new();
        fv.insert("selected_count", state.selected() as f64);
        fv.insert("selected_ratio", state.selected() as f64 / self.num_items() as f64);
        fv.insert("total_profit", state.total_profit());
        fv.insert("load_ratio_mean", features::mean(&ratios).unwrap_or(0.0));
        fv.insert("load_ratio_max", features::max(&ratios).unwrap_or(0.0));
        fv.insert("slack_min", features::min(&slacks).unwrap_or(0.0));
        fv.insert("is_valid", if state.valid() { 1.0 } else { 0.0 });
        Ok(fv)
    }

    fn instance_feature_names() -> &'static [&'static str] {
        &[
            "item_count",
            "profit_max",
            "profit_mean",
            "profit_total",
            "resource_count",
            "tightness_mean",
        ]
    }

    fn state_feature_names() -> &'static [&'static str] {
        &[
            "is_valid",
            "load_ratio_max",
            "load_ratio_mean",
            "selected_count",
            "selected_ratio",
            "slack_min",
            "total_profit",
        ]
    }
}
