//! Operators over ordered sequences (`Vec<usize>`).
//!
//! These cover the deltas the tour-problem heuristics emit: reversing a
//! contiguous range, splicing a block to a new position, and exchanging
//! two positions. All indices refer to *positions* in the sequence, not
//! to the node ids stored there.

use crate::error::InvalidOperatorError;

use super::types::Operator;

/// Reverses the inclusive position range `[first, last]`.
///
/// Applying the same reversal twice restores the original order
/// (involution), which is what makes it the building block for
/// tentative tour reconnections.
///
/// # Examples
///
/// ```
/// use heur_core::operators::{Operator, SegmentReversal};
///
/// let op = SegmentReversal::new(1, 3);
/// let tour = op.apply(vec![0, 1, 2, 3, 4]).unwrap();
/// assert_eq!(tour, vec![0, 3, 2, 1, 4]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentReversal {
    pub first: usize,
    pub last: usize,
}

impl SegmentReversal {
    pub fn new(first: usize, last: usize) -> Self {
        Self { first, last }
    }
}

impl Operator<Vec<usize>> for SegmentReversal {
    fn name(&self) -> &'static str {
        "segment_reversal"
    }

    fn check(&self, solution: &Vec<usize>) -> Result<(), InvalidOperatorError> {
        if self.first > self.last {
            return Err(InvalidOperatorError::InvertedRange {
                first: self.first,
                last: self.last,
            });
        }
        if self.last >= solution.len() {
            return Err(InvalidOperatorError::IndexOutOfBounds {
                index: self.last,
                len: solution.len(),
            });
        }
        Ok(())
    }

    fn apply(&self, mut solution: Vec<usize>) -> Result<Vec<usize>, InvalidOperatorError> {
        self.check(&solution)?;
        solution[self.first..=self.last].reverse();
        Ok(solution)
    }
}

/// Splices the block `[start, start + len)` so that its first element
/// lands where position `dest` was in the original sequence.
///
/// `dest` uses pre-removal coordinates; `dest == start` and
/// `dest == start + len` (just past the block) are both the identity,
/// a destination strictly inside the moved block — the open range
/// `(start, start + len)` — is rejected, and `dest == solution.len()`
/// appends at the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentMove {
    pub start: usize,
    pub len: usize,
    pub dest: usize,
}

impl SegmentMove {
    pub fn new(start: usize, len: usize, dest: usize) -> Self {
        Self { start, len, dest }
    }
}

impl Operator<Vec<usize>> for SegmentMove {
    fn name(&self) -> &'static str {
        "segment_move"
    }

    fn check(&self, solution: &Vec<usize>) -> Result<(), InvalidOperatorError> {
        let n = solution.len();
        if self.len == 0 || self.start + self.len > n {
            return Err(InvalidOperatorError::SegmentOutOfBounds {
                start: self.start,
                len: self.len,
                solution_len: n,
            });
        }
        if self.dest > n {
            return Err(InvalidOperatorError::IndexOutOfBounds { index: self.dest, len: n });
        }
        if self.dest > self.start && self.dest < self.start + self.len {
            return Err(InvalidOperatorError::DestinationInsideSegment {
                start: self.start,
                len: self.len,
                dest: self.dest,
            });
        }
        Ok(())
    }

    fn apply(&self, mut solution: Vec<usize>) -> Result<Vec<usize>, InvalidOperatorError> {
        self.check(&solution)?;
        let block: Vec<usize> = solution.drain(self.start..self.start + self.len).collect();
        let dest = if self.dest > self.start { self.dest - self.len } else { self.dest };
        solution.splice(dest..dest, block);
        Ok(solution)
    }
}

/// Exchanges the elements at positions `i` and `j`. O(1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PairSwap {
    pub i: usize,
    pub j: usize,
}

impl PairSwap {
    pub fn new(i: usize, j: usize) -> Self {
        Self { i, j }
    }
}

impl Operator<Vec<usize>> for PairSwap {
    fn name(&self) -> &'static str {
        "pair_swap"
    }

    fn check(&self, solution: &Vec<usize>) -> Result<(), InvalidOperatorError> {
        let n = solution.len();
        for index in [self.i, self.j] {
            if index >= n {
                return Err(InvalidOperatorError::IndexOutOfBounds { index, len: n });
            }
        }
        Ok(())
    }

    fn apply(&self, mut solution: Vec<usize>) -> Result<Vec<usize>, InvalidOperatorError> {
        self.check(&solution)?;
        solution.swap(self.i, self.j);
        Ok(solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reversal_basic() {
        let op = SegmentReversal::new(1, 3);
        assert_eq!(op.apply(vec![0, 1, 2, 3, 4]).unwrap(), vec![0, 3, 2, 1, 4]);
    }

    #[test]
    fn test_reversal_full_range() {
        let op = SegmentReversal::new(0, 4);
        assert_eq!(op.apply(vec![0, 1, 2, 3, 4]).unwrap(), vec![4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_reversal_single_element_is_identity() {
        let op = SegmentReversal::new(2, 2);
        assert_eq!(op.apply(vec![0, 1, 2, 3]).unwrap(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_reversal_involution() {
        let op = SegmentReversal::new(1, 4);
        let original = vec![5, 3, 8, 1, 9, 2];
        let once = op.apply(original.clone()).unwrap();
        assert_ne!(once, original);
        let twice = op.apply(once).unwrap();
        assert_eq!(twice, original);
    }

    #[test]
    fn test_reversal_stale_bounds() {
        let op = SegmentReversal::new(1, 7);
        assert_eq!(
            op.check(&vec![0, 1, 2]),
            Err(InvalidOperatorError::IndexOutOfBounds { index: 7, len: 3 })
        );
        assert!(op.apply(vec![0, 1, 2]).is_err());
    }

    #[test]
    fn test_reversal_inverted_range() {
        let op = SegmentReversal::new(3, 1);
        assert_eq!(
            op.check(&vec![0, 1, 2, 3]),
            Err(InvalidOperatorError::InvertedRange { first: 3, last: 1 })
        );
    }

    #[test]
    fn test_segment_move_forward() {
        // Move [1, 2] to sit where position 4 was: 0 3 1 2 4
        let op = SegmentMove::new(1, 2, 4);
        assert_eq!(op.apply(vec![0, 1, 2, 3, 4]).unwrap(), vec![0, 3, 1, 2, 4]);
    }

    #[test]
    fn test_segment_move_backward() {
        let op = SegmentMove::new(3, 2, 1);
        assert_eq!(op.apply(vec![0, 1, 2, 3, 4]).unwrap(), vec![0, 3, 4, 1, 2]);
    }

    #[test]
    fn test_segment_move_to_end() {
        let op = SegmentMove::new(0, 2, 5);
        assert_eq!(op.apply(vec![0, 1, 2, 3, 4]).unwrap(), vec![2, 3, 4, 0, 1]);
    }

    #[test]
    fn test_segment_move_identity() {
        let op = SegmentMove::new(2, 2, 2);
        assert_eq!(op.apply(vec![0, 1, 2, 3, 4]).unwrap(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_segment_move_just_past_block_is_identity() {
        // dest == start + len sits after the block in pre-removal
        // coordinates and splices back to the original order
        let op = SegmentMove::new(1, 2, 3);
        assert_eq!(op.apply(vec![0, 1, 2, 3, 4]).unwrap(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_segment_move_inside_segment_rejected() {
        let op = SegmentMove::new(1, 3, 2);
        assert_eq!(
            op.check(&vec![0, 1, 2, 3, 4]),
            Err(InvalidOperatorError::DestinationInsideSegment { start: 1, len: 3, dest: 2 })
        );
        // last position inside the open range
        assert!(SegmentMove::new(1, 3, 3).check(&vec![0, 1, 2, 3, 4]).is_err());
    }

    #[test]
    fn test_segment_move_out_of_bounds() {
        let op = SegmentMove::new(3, 4, 0);
        assert_eq!(
            op.check(&vec![0, 1, 2, 3, 4]),
            Err(InvalidOperatorError::SegmentOutOfBounds { start: 3, len: 4, solution_len: 5 })
        );
        let op = SegmentMove::new(0, 0, 0);
        assert!(op.check(&vec![0, 1, 2]).is_err());
    }

    #[test]
    fn test_pair_swap() {
        let op = PairSwap::new(0, 3);
        assert_eq!(op.apply(vec![0, 1, 2, 3]).unwrap(), vec![3, 1, 2, 0]);
    }

    #[test]
    fn test_pair_swap_same_index_is_identity() {
        let op = PairSwap::new(2, 2);
        assert_eq!(op.apply(vec![0, 1, 2, 3]).unwrap(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_pair_swap_out_of_bounds() {
        let op = PairSwap::new(0, 9);
        assert_eq!(
            op.check(&vec![0, 1, 2]),
            Err(InvalidOperatorError::IndexOutOfBounds { index: 9, len: 3 })
        );
    }

    proptest! {
        #[test]
        fn prop_reversal_involution(
            seq in proptest::collection::vec(0usize..100, 2..40),
            a in 0usize..40,
            b in 0usize..40,
        ) {
            let n = seq.len();
            let (first, last) = (a.min(b) % n, a.max(b) % n);
            prop_assume!(first <= last);
            let op = SegmentReversal::new(first, last);
            let twice = op.apply(op.apply(seq.clone()).unwrap()).unwrap();
            prop_assert_eq!(twice, seq);
        }

        #[test]
        fn prop_segment_move_preserves_elements(
            seq in proptest::collection::vec(0usize..100, 2..30),
            start in 0usize..30,
            len in 1usize..5,
            dest in 0usize..31,
        ) {
            let op = SegmentMove::new(start, len, dest);
            if op.check(&seq).is_ok() {
                let moved = op.apply(seq.clone()).unwrap();
                let mut a = seq;
                let mut b = moved;
                a.sort_unstable();
                b.sort_unstable();
                prop_assert_eq!(a, b);
            }
        }
    }
}
