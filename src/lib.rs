//! Execution substrate for improvement heuristics.
//!
//! Separates the three roles every local-search setup mixes together:
//!
//! - **Problem data**: immutable per-instance facts ([`problems`]) and
//!   cheap snapshots of the current solution, rebuilt by the
//!   environment after every committed move.
//! - **Operators** ([`operators`]): small, validated solution edits.
//!   An operator describes an intended change; it is checked against
//!   the solution it is applied to and either produces the edited
//!   solution or a structured error, never a partial edit.
//! - **Heuristics** ([`heuristic`], [`three_opt`]): pure functions from
//!   `(instance, state, data)` to an optional operator plus updated
//!   data. The environment owns the loop — it applies the operator,
//!   re-captures state, and calls again.
//!
//! [`features`] adds a uniform numeric description of instances and
//! states so selection layers can compare heuristics across problems.
//!
//! The worked instantiation is exhaustive 3-opt on the travelling
//! salesman problem; the knapsack and vehicle-routing modules show the
//! same contract on other solution shapes.

pub mod error;
pub mod features;
pub mod heuristic;
pub mod operators;
pub mod problems;
pub mod three_opt;
