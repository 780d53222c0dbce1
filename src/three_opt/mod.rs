//! Exhaustive 3-opt local search for the tour problem.
//!
//! The worked example of a heuristic function: removes three edges from
//! the current tour and evaluates alternative reconnections of the
//! resulting segments, returning the single best improving move as one
//! or two segment reversals — or nothing at a local optimum.
//!
//! The neighborhood is the *full* O(n³) set of breakpoint triples, not a
//! sampled or candidate-list variant. Callers needing sub-cubic steps
//! must restrict triples externally (e.g. via neighbor lists) before
//! this layer. A single step is not interruptible; budgets live in the
//! calling loop, which simply stops invoking [`ThreeOpt`] when done.
//!
//! # References
//!
//! - Lin, S. (1965). "Computer solutions of the traveling salesman
//!   problem", *Bell System Technical Journal* 44(10), 2245-2269.

mod config;
mod search;
mod types;

pub use config::{ReconnectionPattern, ThreeOptConfig};
pub use search::ThreeOpt;
pub use types::{ThreeOptData, ThreeOptMove};
