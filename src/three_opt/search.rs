//! Exhaustive triple enumeration and move selection.
//!
//! # Algorithm
//!
//! 1. Enumerate breakpoint triples `(i, j, k)` over tour positions with
//!    `i + 2 <= j` and `j + 2 <= k`, excluding the one combination
//!    (`i == 0`, `k == n - 1`) where the wrap-around edge coincides
//!    with the first removed edge.
//! 2. For each triple, evaluate every enabled reconnection pattern in
//!    O(1) from the distance matrix.
//! 3. Keep the strictly best delta seen; ties keep the earliest triple.
//! 4. Emit the winning move if it beats the improvement threshold,
//!    otherwise report a local optimum.
//!
//! Each removed edge `(a,b)`, `(c,d)`, `(e,f)` takes `b`, `d`, `f` as
//! the tour-order successors of `a`, `c`, `e`; the third successor
//! wraps to position 0 when `k` is the last position.

use crate::error::MalformedInputError;
use crate::heuristic::Heuristic;
use crate::operators::SegmentReversal;
use crate::problems::tsp::{TspInstance, TspState};

use super::config::{ReconnectionPattern, ThreeOptConfig};
use super::types::{ThreeOptData, ThreeOptMove};

/// Incumbent candidate during the scan.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Candidate {
    delta: f64,
    i: usize,
    j: usize,
    k: usize,
    pattern_idx: usize,
}

impl Candidate {
    /// Strictly smaller delta wins; exact ties go to the earlier
    /// triple/pattern, which makes the parallel reduction agree with
    /// the sequential scan.
    fn better_than(&self, other: &Candidate) -> bool {
        if self.delta != other.delta {
            return self.delta < other.delta;
        }
        (self.i, self.j, self.k, self.pattern_idx)
            < (other.i, other.j, other.k, other.pattern_idx)
    }
}

/// The 3-opt heuristic.
///
/// Stateless across calls: every invocation searches the full
/// neighborhood of the tour it is handed. Drive it to a fixed point by
/// re-invoking on the re-captured state until it returns `None`.
///
/// # Examples
///
/// ```
/// use heur_core::heuristic::Heuristic;
/// use heur_core::operators::Operator;
/// use heur_core::problems::tsp::{TspInstance, TspState};
/// use heur_core::three_opt::{ThreeOpt, ThreeOptData};
///
/// let instance = TspInstance::random_euclidean(10, 42).unwrap();
/// let mut tour: Vec<usize> = (0..10).collect();
/// let mut data = ThreeOptData::default();
/// let heuristic = ThreeOpt::default();
///
/// loop {
///     let state = TspState::capture(&instance, &tour).unwrap();
///     let (op, next) = heuristic.step(&instance, &state, data).unwrap();
///     data = next;
///     match op {
///         Some(mv) => tour = mv.apply(tour).unwrap(),
///         None => break, // local optimum
///     }
/// }
/// ```
pub struct ThreeOpt {
    config: ThreeOptConfig,
}

impl ThreeOpt {
    /// Creates a 3-opt heuristic with the given configuration.
    ///
    /// # Panics
    /// Panics if the configuration is invalid (call
    /// [`ThreeOptConfig::validate`] first to get a descriptive error).
    pub fn new(config: ThreeOptConfig) -> Self {
        config.validate().expect("invalid ThreeOptConfig");
        Self { config }
    }

    pub fn config(&self) -> &ThreeOptConfig {
        &self.config
    }

    fn scan(&self, instance: &TspInstance, tour: &[usize]) -> Option<Candidate> {
        #[cfg(feature = "parallel")]
        if self.config.parallel {
            return self.scan_parallel(instance, tour);
        }
        self.scan_sequential(instance, tour)
    }

    fn scan_sequential(&self, instance: &TspInstance, tour: &[usize]) -> Option<Candidate> {
        let mut best: Option<Candidate> = None;
        for i in 0..tour.len() {
            if let Some(candidate) = self.scan_from(instance, tour, i) {
                if best.as_ref().is_none_or(|b| candidate.better_than(b)) {
                    best = Some(candidate);
                }
            }
        }
        best
    }

    #[cfg(feature = "parallel")]
    fn scan_parallel(&self, instance: &TspInstance, tour: &[usize]) -> Option<Candidate> {
        use rayon::prelude::*;

        (0..tour.len())
            .into_par_iter()
            .filter_map(|i| self.scan_from(instance, tour, i))
            .reduce_with(|a, b| if b.better_than(&a) { b } else { a })
    }

    /// Best candidate over all triples with first breakpoint `i`.
    fn scan_from(&self, instance: &TspInstance, tour: &[usize], i: usize) -> Option<Candidate> {
        let n = tour.len();
        let mut best: Option<Candidate> = None;
        if i + 4 >= n {
            return None;
        }
        let (a, b) = (tour[i], tour[i + 1]);
        for j in (i + 2)..(n - 2) {
            let (c, d) = (tour[j], tour[j + 1]);
            for k in (j + 2)..n {
                // Wrap-around edge would coincide with the first removed edge.
                if i == 0 && k == n - 1 {
                    continue;
                }
                let (e, f) = (tour[k], tour[(k + 1) % n]);
                for (pattern_idx, &pattern) in self.config.patterns.iter().enumerate() {
                    let delta = pattern_delta(instance, a, b, c, d, e, f, pattern);
                    let candidate = Candidate { delta, i, j, k, pattern_idx };
                    if best.as_ref().is_none_or(|incumbent| candidate.better_than(incumbent)) {
                        best = Some(candidate);
                    }
                }
            }
        }
        best
    }

    fn build_move(&self, candidate: Candidate) -> ThreeOptMove {
        let Candidate { delta, i, j, k, pattern_idx } = candidate;
        let pattern = self.config.patterns[pattern_idx];
        let (first, second) = match pattern {
            ReconnectionPattern::ReverseFirst => (SegmentReversal::new(i + 1, j), None),
            ReconnectionPattern::ReverseSecond => (SegmentReversal::new(j + 1, k), None),
            ReconnectionPattern::ReverseBoth => (
                SegmentReversal::new(i + 1, j),
                Some(SegmentReversal::new(j + 1, k)),
            ),
        };
        ThreeOptMove { breakpoints: (i, j, k), pattern, first, second, delta }
    }
}

impl Default for ThreeOpt {
    fn default() -> Self {
        Self::new(ThreeOptConfig::default())
    }
}

impl Heuristic for ThreeOpt {
    type Instance = TspInstance;
    type State = TspState;
    type Data = ThreeOptData;
    type Op = ThreeOptMove;

    fn step(
        &self,
        instance: &TspInstance,
        state: &TspState,
        mut data: ThreeOptData,
    ) -> Result<(Option<ThreeOptMove>, ThreeOptData), MalformedInputError> {
        data.steps += 1;

        let tour = state.tour();
        // No triple partition exists below six nodes.
        if tour.len() < 6 {
            return Ok((None, data));
        }
        if tour.len() != instance.num_nodes() {
            return Err(MalformedInputError::DimensionMismatch {
                what: "state tour length",
                expected: instance.num_nodes(),
                actual: tour.len(),
            });
        }

        let best = self.scan(instance, tour);
        match best {
            Some(candidate) if candidate.delta < -self.config.improvement_epsilon => {
                data.improving_steps += 1;
                data.total_improvement += candidate.delta;
                Ok((Some(self.build_move(candidate)), data))
            }
            _ => Ok((None, data)),
        }
    }
}

/// Cost delta of reconnecting removed edges `(a,b)`, `(c,d)`, `(e,f)`
/// under the given pattern. All lookups, no geometry.
#[allow(clippy::too_many_arguments)]
fn pattern_delta(
    instance: &TspInstance,
    a: usize,
    b: usize,
    c: usize,
    d: usize,
    e: usize,
    f: usize,
    pattern: ReconnectionPattern,
) -> f64 {
    match pattern {
        ReconnectionPattern::ReverseFirst => {
            instance.distance(a, c) + instance.distance(b, d)
                - instance.distance(a, b)
                - instance.distance(c, d)
        }
        ReconnectionPattern::ReverseSecond => {
            instance.distance(c, e) + instance.distance(d, f)
                - instance.distance(c, d)
                - instance.distance(e, f)
        }
        ReconnectionPattern::ReverseBoth => {
            instance.distance(a, c) + instance.distance(b, e) + instance.distance(d, f)
                - instance.distance(a, b)
                - instance.distance(c, d)
                - instance.distance(e, f)
        }
    }
}
