//! The operator capability set.

use crate::error::InvalidOperatorError;

/// A pure, immutable description of a solution transformation.
///
/// Polymorphic over the solution representation `S`: sequence operators
/// work on `Vec<usize>` orderings, selection operators on `Vec<bool>`
/// pickings, and further shapes follow the same pattern.
///
/// # Contract
///
/// - [`check`](Self::check) reports whether the operator's preconditions
///   hold against a given solution, without touching it.
/// - [`apply`](Self::apply) consumes the solution, patches only the
///   affected elements, and returns it. On a precondition violation it
///   fails with [`InvalidOperatorError`] before mutating anything.
/// - No retries: a stale operator is the caller's signal to re-run
///   heuristic selection or abort the step.
pub trait Operator<S> {
    /// Human-readable operator name, for logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Verifies preconditions against the current solution.
    fn check(&self, solution: &S) -> Result<(), InvalidOperatorError>;

    /// Applies the transformation, returning the patched solution.
    ///
    /// Cost is proportional to the elements the delta touches, not to
    /// the full solution, except where the delta inherently spans it.
    fn apply(&self, solution: S) -> Result<S, InvalidOperatorError>;
}
