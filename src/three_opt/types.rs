//! Move and per-run data types for the 3-opt heuristic.

use crate::error::InvalidOperatorError;
use crate::operators::{Operator, SegmentReversal};

use super::config::ReconnectionPattern;

/// One 3-opt reconnection, expressed as one or two segment reversals.
///
/// Carries the breakpoint triple and the predicted cost delta so the
/// environment can verify the move after committing it: recomputing the
/// tour cost must equal `old_cost + delta` up to matrix precision.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThreeOptMove {
    /// Breakpoint positions `(i, j, k)` the move was derived from.
    pub breakpoints: (usize, usize, usize),
    /// Which reconnection the reversals realize.
    pub pattern: ReconnectionPattern,
    /// First reversal, always present.
    pub first: SegmentReversal,
    /// Second reversal, present for the two-reversal pattern.
    pub second: Option<SegmentReversal>,
    /// Predicted signed change in tour cost (negative = improvement).
    pub delta: f64,
}

impl Operator<Vec<usize>> for ThreeOptMove {
    fn name(&self) -> &'static str {
        "three_opt_move"
    }

    fn check(&self, solution: &Vec<usize>) -> Result<(), InvalidOperatorError> {
        self.first.check(solution)?;
        if let Some(second) = &self.second {
            second.check(solution)?;
        }
        Ok(())
    }

    fn apply(&self, solution: Vec<usize>) -> Result<Vec<usize>, InvalidOperatorError> {
        // Both reversals are checked up front so a stale second reversal
        // cannot leave a half-applied move behind.
        self.check(&solution)?;
        let solution = self.first.apply(solution)?;
        match &self.second {
            Some(second) => second.apply(solution),
            None => Ok(solution),
        }
    }
}

/// Data threaded through successive 3-opt calls by the caller.
///
/// The heuristic itself is stateless; these counters exist for the
/// selection layer's bookkeeping and do not influence the search.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThreeOptData {
    /// Total `step` invocations.
    pub steps: usize,
    /// Steps that returned an improving move.
    pub improving_steps: usize,
    /// Sum of emitted deltas (non-positive).
    pub total_improvement: f64,
}
