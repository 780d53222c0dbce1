//! Operator-based solution mutation model.
//!
//! An operator is an immutable value object describing one solution
//! delta: which positions it touches and how. It never references a
//! solution directly — a heuristic produces it, the environment applies
//! it once (to a clone if the result is tentative), then discards it.
//!
//! Application is pure by ownership: [`Operator::apply`] consumes a
//! solution value, patches the affected elements, and returns it.
//! Nothing observable happens until the caller commits the returned
//! value, so exploring several candidate operators against clones of
//! the same base solution is safe and requires no coordination.
//!
//! Preconditions (index bounds, segment fit) are checked before any
//! mutation; a stale operator fails with
//! [`InvalidOperatorError`](crate::error::InvalidOperatorError) and the
//! solution it was handed is returned untouched conceptually — `apply`
//! errors before moving any element.

mod selection;
mod sequence;
mod types;

pub use selection::BitFlip;
pub use sequence::{PairSwap, SegmentMove, SegmentReversal};
pub use types::Operator;
