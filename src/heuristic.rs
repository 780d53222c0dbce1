//! The heuristic function contract.
//!
//! A heuristic is a pure step function: given the immutable instance,
//! the current state snapshot, and its own private data from the
//! previous call, it proposes at most one operator and hands back
//! updated data. It holds no state of its own between calls — whatever
//! must survive a step travels through `Data`, persisted and re-supplied
//! by the caller.
//!
//! The external loop owns everything else: applying or discarding the
//! operator, rebuilding the state snapshot, iteration and wall-clock
//! budgets. A heuristic signals a local optimum by returning `None`;
//! the loop decides what that means.

use crate::error::MalformedInputError;

/// One heuristic step: `(instance, state, data) -> (operator?, data')`.
///
/// `Data` is the typed replacement for an opaque per-heuristic
/// key-value store: each heuristic declares exactly what it threads
/// between calls, and the caller moves it through `step` by value.
///
/// Errors are construction-level only — a state snapshot that does not
/// belong to the given instance. Operator staleness is *not* detected
/// here; it surfaces when the environment applies the operator.
pub trait Heuristic {
    /// Immutable per-instance facts.
    type Instance;
    /// Snapshot of the current solution, rebuilt by the environment.
    type State;
    /// Private per-run data threaded through successive calls.
    type Data;
    /// The operator type this heuristic emits.
    type Op;

    /// Proposes the next operator, or `None` at a local optimum.
    fn step(
        &self,
        instance: &Self::Instance,
        state: &Self::State,
        data: Self::Data,
    ) -> Result<(Option<Self::Op>, Self::Data), MalformedInputError>;
}
