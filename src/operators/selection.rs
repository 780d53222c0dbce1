//! Operators over item selections (`Vec<bool>`).

use crate::error::InvalidOperatorError;

use super::types::Operator;

/// Toggles whether a single item is selected. O(1).
///
/// The delta the knapsack-family heuristics emit: pick an item up or
/// put it back, leaving feasibility judgement to the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BitFlip {
    pub item: usize,
}

impl BitFlip {
    pub fn new(item: usize) -> Self {
        Self { item }
    }
}

impl Operator<Vec<bool>> for BitFlip {
    fn name(&self) -> &'static str {
        "bit_flip"
    }

    fn check(&self, solution: &Vec<bool>) -> Result<(), InvalidOperatorError> {
        if self.item >= solution.len() {
            return Err(InvalidOperatorError::IndexOutOfBounds {
                index: self.item,
                len: solution.len(),
            });
        }
        Ok(())
    }

    fn apply(&self, mut solution: Vec<bool>) -> Result<Vec<bool>, InvalidOperatorError> {
        self.check(&solution)?;
        solution[self.item] = !solution[self.item];
        Ok(solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flip_toggles() {
        let op = BitFlip::new(1);
        let selection = op.apply(vec![false, false, true]).unwrap();
        assert_eq!(selection, vec![false, true, true]);
        let selection = op.apply(selection).unwrap();
        assert_eq!(selection, vec![false, false, true]);
    }

    #[test]
    fn test_flip_out_of_bounds() {
        let op = BitFlip::new(3);
        assert_eq!(
            op.check(&vec![true, false]),
            Err(InvalidOperatorError::IndexOutOfBounds { index: 3, len: 2 })
        );
    }
}
