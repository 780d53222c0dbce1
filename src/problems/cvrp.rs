//! Capacitated vehicle routing.
//!
//! Node 0 is the depot. A solution is a set of routes, each an ordered
//! sequence of customer ids (depot excluded); every route implicitly
//! starts and ends at the depot.

use std::collections::HashSet;

use crate::error::{MalformedInputError, UndefinedFeatureError};
use crate::features::{self, FeatureExtractor, FeatureVector};

/// Immutable per-instance facts for the routing problem.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CvrpInstance {
    distance_matrix: Vec<Vec<f64>>,
    demands: Vec<f64>,
    capacity: f64,
    num_vehicles: usize,
}

impl CvrpInstance {
    pub fn new(
        distance_matrix: Vec<Vec<f64>>,
        demands: Vec<f64>,
        capacity: f64,
        num_vehicles: usize,
    ) -> Result<Self, MalformedInputError> {
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
        if demands.len() != n {
            return Err(MalformedInputError::DimensionMismatch {
                what: "demand vector length",
                expected: n,
                actual: demands.len(),
            });
        }
        if capacity <= 0.0 {
            return Err(MalformedInputError::NonPositive { what: "vehicle capacity" });
        }
        if num_vehicles == 0 {
            return Err(MalformedInputError::NonPositive { what: "vehicle count" });
        }
        Ok(Self { distance_matrix, demands, capacity, num_vehicles })
    }

    pub fn num_nodes(&self) -> usize {
        self.distance_matrix.len()
    }

    /// Customers are every node except the depot.
    pub fn num_customers(&self) -> usize {
        self.num_nodes() - 1
    }

    pub fn num_vehicles(&self) -> usize {
        self.num_vehicles
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn demand(&self, node: usize) -> f64 {
        self.demands[node]
    }

    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distance_matrix[from][to]
    }

    pub fn route_load(&self, route: &[usize]) -> f64 {
        route.iter().map(|&c| self.demands[c]).sum()
    }

    /// Cost of one route including both depot legs.
    pub fn route_cost(&self, route: &[usize]) -> f64 {
        if route.is_empty() {
            return 0.0;
        }
        let mut cost = self.distance_matrix[0][route[0]];
        cost += route.windows(2).map(|w| self.distance_matrix[w[0]][w[1]]).sum::<f64>();
        cost + self.distance_matrix[route[route.len() - 1]][0]
    }

    pub fn solution_cost(&self, routes: &[Vec<usize>]) -> f64 {
        routes.iter().map(|r| self.route_cost(r)).sum()
    }

    /// Structural validity: within the fleet size, every customer served
    /// exactly once, no route over capacity, no depot inside a route.
    pub fn validate_solution(&self, routes: &[Vec<usize>]) -> bool {
        if routes.len() > self.num_vehicles {
            return false;
        }
        let n = self.num_nodes();
        let mut seen = HashSet::new();
        for route in routes {
            for &customer in route {
                if customer == 0 || customer >= n || !seen.insert(customer) {
                    return false;
                }
            }
            if self.route_load(route) > self.capacity {
                return false;
            }
        }
        seen.len() == self.num_customers()
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

/// Snapshot of the current route set.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CvrpState {
    route_loads: Vec<f64>,
    route_lens: Vec<f64>,
    total_distance: f64,
    served: usize,
    valid: bool,
}

impl CvrpState {
    /// Derives a fresh snapshot from the current routes.
    pub fn capture(
        instance: &CvrpInstance,
        routes: &[Vec<usize>],
    ) -> Result<Self, MalformedInputError> {
        let n = instance.num_nodes();
        for route in routes {
            if let Some(&node) = route.iter().find(|&&node| node >= n) {
                return Err(MalformedInputError::DimensionMismatch {
                    what: "route node id",
                    expected: n,
                    actual: node,
                });
            }
        }
        Ok(Self {
            route_loads: routes.iter().map(|r| instance.route_load(r)).collect(),
            route_lens: routes.iter().map(|r| r.len() as f64).collect(),
            total_distance: instance.solution_cost(routes),
            served: routes.iter().map(Vec::len).sum(),
            valid: instance.validate_solution(routes),
        })
    }

    pub fn route_loads(&self) -> &[f64] {
        &self.route_loads
    }

    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    pub fn served(&self) -> usize {
        self.served
    }

    pub fn valid(&self) -> bool {
        self.valid
    }
}

impl FeatureExtractor for CvrpInstance {
    type State = CvrpState;

    /// Keys: `capacity`, `capacity_tightness`, `customer_count`,
    /// `demand_max`, `demand_mean`, `demand_total`, `distance_mean`,
    /// `vehicle_count`. Demand and distance statistics default to 0.0
    /// for a depot-only instance.
    fn instance_features(&self) -> Result<FeatureVector, UndefinedFeatureError> {
        let customer_demands = &self.demands[1..];
        let demand_total: f64 = customer_demands.iter().sum();
        let distances = self.off_diagonal_distances();

        let mut fv = FeatureVector::new();
        fv.insert("customer_count", self.num_customers() as f64);
        fv.insert("vehicle_count", self.num_vehicles as f64);
        fv.insert("capacity", self.capacity);
        fv.insert("demand_mean", features::mean(customer_demands).unwrap_or(0.0));
        fv.insert("demand_max", features::max(customer_demands).unwrap_or(0.0));
        fv.insert("demand_total", demand_total);
        // Capacity and fleet size are validated strictly positive.
        fv.insert(
            "capacity_tightness",
            demand_total / (self.capacity * self.num_vehicles as f64),
        );
        fv.insert("distance_mean", features::mean(&distances).unwrap_or(0.0));
        Ok(fv)
    }

    /// Keys: `is_valid`, `load_max`, `load_mean`, `route_count`,
    /// `route_len_mean`, `served_ratio`, `slack_min`, `total_distance`.
    /// Per-route statistics default to 0.0 with no routes;
    /// `served_ratio` defaults to 1.0 when the instance has no
    /// customers (vacuously served).
    fn state_features(&self, state: &CvrpState) -> Result<FeatureVector, UndefinedFeatureError> {
        let loads = state.route_loads();
        let slacks: Vec<f64> = loads.iter().map(|&l| self.capacity - l).collect();
        let served_ratio = if self.num_customers() == 0 {
            1.0
        } else {
            state.served() as f64 / self.num_customers() as f64
        };

        let mut fv = FeatureVector::new();
        fv.insert("route_count", loads.len() as f64);
        fv.insert("route_len_mean", features::mean(&state.route_lens).unwrap_or(0.0));
        fv.insert("served_ratio", served_ratio);
        fv.insert("total_distance", state.total_distance());
        fv.insert("load_mean", features::mean(loads).unwrap_or(0.0));
        fv.insert("load_max", features::max(loads).unwrap_or(0.0));
        fv.insert("slack_min", features::min(&slacks).unwrap_or(0.0));
        fv.insert("is_valid", if state.valid() { 1.0 } else { 0.0 });
        Ok(fv)
    }

    fn instance_feature_names() -> &'static [&'static str] {
        &[
            "capacity",
            "capacity_tightness",
            "customer_count",
            "demand_max",
            "demand_mean",
            "demand_total",
            "distance_mean",
            "vehicle_count",
        ]
    }

    fn state_feature_names() -> &'static [&'static str] {
        &[
            "is_valid",
            "load_max",
            "load_mean",
            "route_count",
            "route_len_mean",
            "served_ratio",
            "slack_min",
            "total_distance",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_instance() -> CvrpInstance {
        // Depot + 4 customers on a line, unit spacing
        let n = 5;
        let matrix: Vec<Vec<f64>> = (0..n)
            .map(|i| (0..n).map(|j| (i as f64 - j as f64).abs()).collect())
            .collect();
        let demands = vec![0.0, 2.0, 3.0, 1.0, 4.0];
        CvrpInstance::new(matrix, demands, 6.0, 2).unwrap()
    }

    #[test]
    fn test_new_rejects_bad_inputs() {
        let matrix = vec![vec![0.0, 1.0], vec![1.0, 0.0]];
        assert!(matches!(
            CvrpInstance::new(matrix.clone(), vec![0.0], 5.0, 1),
            Err(MalformedInputError::DimensionMismatch { .. })
        ));
        assert_eq!(
            CvrpInstance::new(matrix.clone(), vec![0.0, 1.0], 0.0, 1),
            Err(MalformedInputError::NonPositive { what: "vehicle capacity" })
        );
        assert_eq!(
            CvrpInstance::new(matrix, vec![0.0, 1.0], 5.0, 0),
            Err(MalformedInputError::NonPositive { what: "vehicle count" })
        );
    }

    #[test]
    fn test_route_cost_and_load() {
        let instance = small_instance();
        // depot(0) -> 1 -> 2 -> depot: 1 + 1 + 2
        assert_eq!(instance.route_cost(&[1, 2]), 4.0);
        assert_eq!(instance.route_load(&[1, 2]), 5.0);
        assert_eq!(instance.route_cost(&[]), 0.0);
    }

    #[test]
    fn test_validate_solution() {
        let instance = small_instance();
        let good = vec![vec![1, 2], vec![3, 4]];
        assert!(instance.validate_solution(&good));

        // Over capacity: 3 + 4 = 7 > 6
        assert!(!instance.validate_solution(&[vec![2, 4], vec![1, 3]]));
        // Customer missing
        assert!(!instance.validate_solution(&[vec![1, 2], vec![3]]));
        // Customer duplicated
        assert!(!instance.validate_solution(&[vec![1, 2], vec![2, 3, 4]]));
        // Depot inside a route
        assert!(!instance.validate_solution(&[vec![1, 0, 2], vec![3, 4]]));
        // Too many routes for the fleet
        assert!(!instance.validate_solution(&[vec![1], vec![2], vec![3, 4]]));
    }

    #[test]
    fn test_capture_snapshot() {
        let instance = small_instance();
        let routes = vec![vec![1, 2], vec![3, 4]];
        let state = CvrpState::capture(&instance, &routes).unwrap();
        assert!(state.valid());
        assert_eq!(state.served(), 4);
        assert_eq!(state.route_loads(), &[5.0, 5.0]);
        assert_eq!(state.total_distance(), instance.solution_cost(&routes));
    }

    #[test]
    fn test_capture_rejects_out_of_range() {
        let instance = small_instance();
        assert!(matches!(
            CvrpState::capture(&instance, &[vec![1, 9]]),
            Err(MalformedInputError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_instance_features() {
        let instance = small_instance();
        let fv = instance.instance_features().unwrap();
        let names: Vec<_> = fv.names().collect();
        assert_eq!(names, CvrpInstance::instance_feature_names());

        assert_eq!(fv.scalar("customer_count"), Some(4.0));
        assert_eq!(fv.scalar("demand_total"), Some(10.0));
        assert_eq!(fv.scalar("demand_mean"), Some(2.5));
        // 10 / (6 * 2)
        assert!((fv.scalar("capacity_tightness").unwrap() - 10.0 / 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_state_features() {
        let instance = small_instance();
        let state = CvrpState::capture(&instance, &[vec![1, 2], vec![3]]).unwrap();
        let fv = instance.state_features(&state).unwrap();
        let names: Vec<_> = fv.names().collect();
        assert_eq!(names, CvrpInstance::state_feature_names());

        assert_eq!(fv.scalar("route_count"), Some(2.0));
        assert_eq!(fv.scalar("served_ratio"), Some(0.75));
        assert_eq!(fv.scalar("is_valid"), Some(0.0)); // customer 4 unserved
        assert_eq!(fv.scalar("slack_min"), Some(1.0)); // 6 - 5
    }

    #[test]
    fn test_empty_solution_defaults() {
        let instance = small_instance();
        let state = CvrpState::capture(&instance, &[]).unwrap();
        let fv = instance.state_features(&state).unwrap();
        assert_eq!(fv.scalar("route_count"), Some(0.0));
        assert_eq!(fv.scalar("load_mean"), Some(0.0));
        assert_eq!(fv.scalar("served_ratio"), Some(0.0));
    }

    #[test]
    fn test_extractors_deterministic_and_non_mutating() {
        let instance = small_instance();
        let state = CvrpState::capture(&instance, &[vec![1, 2], vec![3, 4]]).unwrap();

        let instance_before = instance.clone();
        let state_before = state.clone();

        assert_eq!(instance.instance_features(), instance.instance_features());
        assert_eq!(instance.state_features(&state), instance.state_features(&state));

        assert_eq!(instance, instance_before);
        assert_eq!(state, state_before);
    }
}
