//! Strongly-typed problem domains.
//!
//! Each domain contributes an immutable instance struct (the static
//! per-instance facts: matrices, demands, capacities), a state snapshot
//! struct the environment rebuilds after every committed operator, and a
//! [`FeatureExtractor`](crate::features::FeatureExtractor)
//! implementation with a documented, stable key set.
//!
//! One deliberate asymmetry: the tour problem is the full worked
//! instantiation — its operators and the 3-opt heuristic live in
//! dedicated modules — while CVRP and MKP carry the data and feature
//! contract only. Further domains (job-shop scheduling, max-cut, order
//! scheduling) follow the identical recipe: an instance validated at
//! construction, a `capture` snapshot holding the validity flag, and
//! two extractor functions. Nothing about them is structurally new.

pub mod cvrp;
pub mod mkp;
pub mod tsp;
