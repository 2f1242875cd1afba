//! Subset Sum engine: brute-force backtracking and dynamic-programming
//! solver variants

pub mod brute_force;
pub mod dynamic;

pub use brute_force::SubsetSumBruteForce;
pub use dynamic::SubsetSumDp;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A Subset Sum instance: a sequence of integers (duplicates and negatives
/// allowed) and a target sum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsetSumInstance {
    numbers: Vec<i64>,
    target: i64,
}

impl SubsetSumInstance {
    pub fn new(numbers: Vec<i64>, target: i64) -> Self {
        Self { numbers, target }
    }

    pub fn numbers(&self) -> &[i64] {
        &self.numbers
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }
}

impl fmt::Display for SubsetSumInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Subset Sum instance with {} numbers, target = {}",
            self.numbers.len(),
            self.target
        )
    }
}

/// Verify a claimed witness subset by its element positions: indices must be
/// distinct and in range, values must match the input at those positions,
/// and the values must sum exactly to the target. Indexing (rather than
/// value membership) keeps duplicates unambiguous.
pub fn verify_subset(instance: &SubsetSumInstance, values: &[i64], indices: &[usize]) -> bool {
    if values.len() != indices.len() {
        return false;
    }

    let mut seen = vec![false; instance.len()];
    for (&value, &index) in values.iter().zip(indices) {
        if index >= instance.len() || seen[index] || instance.numbers()[index] != value {
            return false;
        }
        seen[index] = true;
    }

    values.iter().sum::<i64>() == instance.target()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_accepts_valid_subset() {
        let instance = SubsetSumInstance::new(vec![3, 34, 4, 12, 5, 2], 9);
        assert!(verify_subset(&instance, &[4, 5], &[2, 4]));
        assert!(verify_subset(&instance, &[3, 4, 2], &[0, 2, 5]));
    }

    #[test]
    fn test_verify_rejects_wrong_sum() {
        let instance = SubsetSumInstance::new(vec![3, 34, 4], 9);
        assert!(!verify_subset(&instance, &[3, 4], &[0, 2]));
    }

    #[test]
    fn test_verify_rejects_reused_index() {
        let instance = SubsetSumInstance::new(vec![3, 3], 6);
        assert!(!verify_subset(&instance, &[3, 3], &[0, 0]));
        assert!(verify_subset(&instance, &[3, 3], &[0, 1]));
    }

    #[test]
    fn test_verify_rejects_mismatched_value() {
        let instance = SubsetSumInstance::new(vec![3, 34, 4], 34);
        assert!(!verify_subset(&instance, &[34], &[0]));
        assert!(verify_subset(&instance, &[34], &[1]));
    }

    #[test]
    fn test_verify_empty_subset_for_zero_target() {
        let instance = SubsetSumInstance::new(vec![1, 2], 0);
        assert!(verify_subset(&instance, &[], &[]));
    }
}
