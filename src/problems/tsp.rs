//! Travelling salesman: the full worked problem instantiation.
//!
//! The solution is a closed tour: an ordering of all node ids, each
//! visited exactly once, with an implicit edge from the last node back
//! to the first. All costs come from the precomputed distance matrix —
//! nothing here recomputes geometry.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{MalformedInputError, UndefinedFeatureError};
use crate::features::{self, FeatureExtractor, FeatureVector};

/// Immutable per-instance facts for the tour problem.
///
/// The matrix is expected to be symmetric with a zero diagonal; the
/// constructor enforces shape, not metric properties.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TspInstance {
    distance_matrix: Vec<Vec<f64>>,
}

impl TspInstance {
    /// Builds an instance from a square distance matrix.
    pub fn new(distance_matrix: Vec<Vec<f64>>) -> Result<Self, MalformedInputError> {
        if distance_matrix.is_empty() {
            return Err(MalformedInputError::Empty { what: "distance matrix" });
        }
        let n = distance_matrix.len();
        for (row, entries) in distance_matrix.iter().enumerate() {
            if entries.len() != n {
                return Err(MalformedInputError::NonSquareMatrix {
                    rows: n,
                    row,
                    row_len: entries.len(),
                });
            }
        }
        Ok(Self { distance_matrix })
    }

    /// Generates a random Euclidean instance with nodes on a
    /// `[0, 1000]²` plane. Deterministic per seed.
    pub fn random_euclidean(num_nodes: usize, seed: u64) -> Result<Self, MalformedInputError> {
        if num_nodes == 0 {
            return Err(MalformedInputError::Empty { what: "distance matrix" });
        }
        let mut rng = StdRng::seed_from_u64(seed);
        let positions: Vec<(f64, f64)> = (0..num_nodes)
            .map(|_| (rng.random_range(0.0..=1000.0), rng.random_range(0.0..=1000.0)))
            .collect();
        let distance_matrix = positions
            .iter()
            .map(|&(x1, y1)| {
                positions.iter().map(|&(x2, y2)| (x1 - x2).hypot(y1 - y2)).collect()
            })
            .collect();
        Self::new(distance_matrix)
    }

    pub fn num_nodes(&self) -> usize {
        self.distance_matrix.len()
    }

    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distance_matrix[from][to]
    }

    pub fn distance_matrix(&self) -> &[Vec<f64>] {
        &self.distance_matrix
    }

    /// Total cost of a closed tour, including the wrap-around edge.
    ///
    /// Tours with fewer than two nodes cost 0.0. Node ids must be in
    /// range; structural validity beyond that is not assumed.
    pub fn tour_cost(&self, tour: &[usize]) -> f64 {
        if tour.len() < 2 {
            return 0.0;
        }
        let legs: f64 = tour.windows(2).map(|w| self.distance_matrix[w[0]][w[1]]).sum();
        legs + self.distance_matrix[tour[tour.len() - 1]][tour[0]]
    }

    /// Structural validity: a permutation of all node ids, each exactly once.
    pub fn validate_solution(&self, tour: &[usize]) -> bool {
        let n = self.num_nodes();
        if tour.len() != n {
            return false;
        }
        if tour.iter().any(|&node| node >= n) {
            return false;
        }
        let distinct: HashSet<usize> = tour.iter().copied().collect();
        distinct.len() == n
    }

    fn off_diagonal_distances(&self) -> Vec<f64> {
        let n = self.num_nodes();
        let mut out = Vec::with_capacity(n * n.saturating_sub(1));
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    out.push(self.distance_matrix[i][j]);
                }
            }
        }
        out
    }
}

/// Snapshot of the current tour, rebuilt by the environment after every
/// committed operator.
///
/// The validity flag is computed once at capture time via
/// [`TspInstance::validate_solution`]; extractors read it and never
/// re-validate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TspState {
    tour: Vec<usize>,
    leg_costs: Vec<f64>,
    tour_cost: f64,
    valid: bool,
}

impl TspState {
    /// Derives a fresh snapshot from the current tour.
    ///
    /// Fails if the tour references node ids outside the instance —
    /// that is a malformed pairing, not an invalid-but-representable
    /// solution.
    pub fn capture(instance: &TspInstance, tour: &[usize]) -> Result<Self, MalformedInputError> {
        let n = instance.num_nodes();
        if let Some(&node) = tour.iter().find(|&&node| node >= n) {
            return Err(MalformedInputError::DimensionMismatch {
                what: "tour node id",
                expected: n,
                actual: node,
            });
        }
        let leg_costs: Vec<f64> = if tour.len() < 2 {
            Vec::new()
        } else {
            let mut legs: Vec<f64> =
                tour.windows(2).map(|w| instance.distance(w[0], w[1])).collect();
            legs.push(instance.distance(tour[tour.len() - 1], tour[0]));
            legs
        };
        Ok(Self {
            tour: tour.to_vec(),
            tour_cost: leg_costs.iter().sum(),
            leg_costs,
            valid: instance.validate_solution(tour),
        })
    }

    pub fn tour(&self) -> &[usize] {
        &self.tour
    }

    pub fn tour_cost(&self) -> f64 {
        self.tour_cost
    }

    pub fn leg_costs(&self) -> &[f64] {
        &self.leg_costs
    }

    /// Whether the captured tour was structurally valid.
    pub fn valid(&self) -> bool {
        self.valid
    }
}

impl FeatureExtractor for TspInstance {
    type State = TspState;

    /// Keys: `distance_max`, `distance_mean`, `distance_min`,
    /// `distance_std`, `node_count`, `nonzero_distance_mean`.
    ///
    /// Distance statistics cover off-diagonal entries and default to
    /// 0.0 for a single-node instance. `nonzero_distance_mean` is
    /// undefined when no off-diagonal entry is non-zero and raises
    /// [`UndefinedFeatureError`] rather than emitting NaN.
    fn instance_features(&self) -> Result<FeatureVector, UndefinedFeatureError> {
        let distances = self.off_diagonal_distances();
        let nonzero: Vec<f64> = distances.iter().copied().filter(|&d| d != 0.0).collect();
        let nonzero_mean = features::mean(&nonzero).ok_or_else(|| {
            UndefinedFeatureError::new("nonzero_distance_mean", "instance has no non-zero edges")
        })?;

        let mut fv = FeatureVector::new();
        fv.insert("node_count", self.num_nodes() as f64);
        fv.insert("distance_mean", features::mean(&distances).unwrap_or(0.0));
        fv.insert("distance_std", features::std_dev(&distances).unwrap_or(0.0));
        fv.insert("distance_min", features::min(&distances).unwrap_or(0.0));
        fv.insert("distance_max", features::max(&distances).unwrap_or(0.0));
        fv.insert("nonzero_distance_mean", nonzero_mean);
        Ok(fv)
    }

    /// Keys: `is_valid`, `leg_max`, `leg_mean`, `leg_min`, `leg_std`,
    /// `tour_cost`, `tour_size`. Leg statistics default to 0.0 for
    /// tours with no legs.
    fn state_features(&self, state: &TspState) -> Result<FeatureVector, UndefinedFeatureError> {
        let legs = state.leg_costs();
        let mut fv = FeatureVector::new();
        fv.insert("tour_size", state.tour().len() as f64);
        fv.insert("tour_cost", state.tour_cost());
        fv.insert("leg_mean", features::mean(legs).unwrap_or(0.0));
        fv.insert("leg_std", features::std_dev(legs).unwrap_or(0.0));
        fv.insert("leg_min", features::min(legs).unwrap_or(0.0));
        fv.insert("leg_max", features::max(legs).unwrap_or(0.0));
        fv.insert("is_valid", if state.valid() { 1.0 } else { 0.0 });
        Ok(fv)
    }

    fn instance_feature_names() -> &'static [&'static str] {
        &[
            "distance_max",
            "distance_mean",
            "distance_min",
            "distance_std",
            "node_count",
            "nonzero_distance_mean",
        ]
    }

    fn state_feature_names() -> &'static [&'static str] {
        &["is_valid", "leg_max", "leg_mean", "leg_min", "leg_std", "tour_cost", "tour_size"]
    }
}
