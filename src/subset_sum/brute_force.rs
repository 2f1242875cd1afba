//! Brute-force Subset Sum via include/exclude backtracking

use super::SubsetSumInstance;
use crate::error::SolverError;
use crate::problem::ProblemInstance;
use crate::solve::{Budget, Solver, SolverResult, Witness};
use std::collections::BTreeMap;
use std::time::Instant;

/// How many search nodes to expand between budget checks.
const BUDGET_CHECK_INTERVAL: u64 = 256;

/// Brute-force Subset Sum solver.
///
/// Depth-first search over include/exclude decisions, visiting elements in
/// descending-absolute-value order: large elements decide early, which
/// shortens the expected depth to a solution without changing the O(2^n)
/// worst case. A branch is pruned when the running sum plus the remaining
/// positive (or negative) mass can no longer reach the target.
///
/// With a budget attached, an expired search reports `timed_out: true`,
/// which is distinct from a proven-absent solution.
pub struct SubsetSumBruteForce;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Search {
    Found,
    Exhausted,
    TimedOut,
}

struct SearchState<'a> {
    /// Original indices, sorted by descending |value|.
    order: Vec<usize>,
    numbers: &'a [i64],
    target: i64,
    /// `pos_suffix[d]` is the sum of positive values at order positions
    /// `d..`; together with `neg_suffix` it bounds what any extension of
    /// the current prefix can still add.
    pos_suffix: Vec<i64>,
    neg_suffix: Vec<i64>,
    chosen: Vec<usize>,
    nodes: u64,
}

impl Solver for SubsetSumBruteForce {
    fn solve(
        &self,
        instance: &ProblemInstance,
        budget: &Budget,
    ) -> Result<SolverResult, SolverError> {
        let subset = instance.as_subset_sum()?;
        let started = Instant::now();

        let numbers = subset.numbers();
        let mut order: Vec<usize> = (0..numbers.len()).collect();
        order.sort_by_key(|&i| std::cmp::Reverse(numbers[i].unsigned_abs()));

        let mut pos_suffix = vec![0i64; numbers.len() + 1];
        let mut neg_suffix = vec![0i64; numbers.len() + 1];
        for depth in (0..numbers.len()).rev() {
            let value = numbers[order[depth]];
            pos_suffix[depth] = pos_suffix[depth + 1] + value.max(0);
            neg_suffix[depth] = neg_suffix[depth + 1] + value.min(0);
        }

        let mut state = SearchState {
            order,
            numbers,
            target: subset.target(),
            pos_suffix,
            neg_suffix,
            chosen: Vec::new(),
            nodes: 0,
        };

        let outcome = search(&mut state, 0, 0, budget);

        let mut counters = BTreeMap::new();
        counters.insert("subsets_tried".to_string(), state.nodes);

        let (solved, witness, timed_out) = match outcome {
            Search::Found => {
                let mut picks: Vec<usize> = state.chosen.clone();
                picks.sort_unstable();
                let values: Vec<i64> = picks.iter().map(|&i| numbers[i]).collect();
                (
                    true,
                    Some(Witness::Subset {
                        values,
                        indices: picks,
                    }),
                    false,
                )
            }
            Search::Exhausted => (false, None, false),
            Search::TimedOut => (false, None, true),
        };

        Ok(SolverResult {
            algorithm_name: self.algorithm_name().to_string(),
            solved,
            witness,
            counters,
            elapsed: started.elapsed(),
            timed_out,
        })
    }

    fn algorithm_name(&self) -> &'static str {
        "Brute Force Subset Sum Solver"
    }

    fn complexity_class(&self) -> &'static str {
        "NP-Complete (Exponential Time)"
    }
}

fn search(state: &mut SearchState<'_>, depth: usize, running_sum: i64, budget: &Budget) -> Search {
    state.nodes += 1;
    if state.nodes % BUDGET_CHECK_INTERVAL == 0 && budget.expired() {
        return Search::TimedOut;
    }

    // The currently included prefix is itself a subset: the rest is simply
    // excluded.
    if running_sum == state.target {
        return Search::Found;
    }
    if depth == state.order.len() {
        return Search::Exhausted;
    }

    // Everything an extension can still reach lies between the remaining
    // negative and positive mass.
    let reachable_min = running_sum + state.neg_suffix[depth];
    let reachable_max = running_sum + state.pos_suffix[depth];
    if state.target < reachable_min || state.target > reachable_max {
        return Search::Exhausted;
    }

    let index = state.order[depth];

    state.chosen.push(index);
    match search(state, depth + 1, running_sum + state.numbers[index], budget) {
        Search::Exhausted => {}
        other => return other,
    }
    state.chosen.pop();

    search(state, depth + 1, running_sum, budget)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::Payload;
    use crate::subset_sum::verify_subset;
    use std::time::Duration;

    fn instance(numbers: Vec<i64>, target: i64) -> ProblemInstance {
        let size = numbers.len();
        ProblemInstance::new(size, Payload::SubsetSum(SubsetSumInstance::new(numbers, target)))
    }

    #[test]
    fn test_finds_subset_summing_to_target() {
        let instance = instance(vec![3, 34, 4, 12, 5, 2], 9);
        let result = SubsetSumBruteForce
            .solve(&instance, &Budget::unlimited())
            .unwrap();

        assert!(result.solved);
        let subset = instance.as_subset_sum().unwrap();
        match result.witness {
            Some(Witness::Subset { values, indices }) => {
                assert!(verify_subset(subset, &values, &indices));
            }
            other => panic!("expected a subset witness, got {other:?}"),
        }
    }

    #[test]
    fn test_proves_absence() {
        let instance = instance(vec![5, 7, 11], 3);
        let result = SubsetSumBruteForce
            .solve(&instance, &Budget::unlimited())
            .unwrap();

        assert!(!result.solved);
        assert!(!result.timed_out);
        assert!(result.counter("subsets_tried") > 0);
    }

    #[test]
    fn test_zero_target_yields_empty_subset() {
        let instance = instance(vec![1, 2, 3], 0);
        let result = SubsetSumBruteForce
            .solve(&instance, &Budget::unlimited())
            .unwrap();

        assert!(result.solved);
        assert_eq!(
            result.witness,
            Some(Witness::Subset {
                values: vec![],
                indices: vec![],
            })
        );
    }

    #[test]
    fn test_negative_numbers_supported() {
        let instance = instance(vec![-7, 3, 10, -2], 1);
        let result = SubsetSumBruteForce
            .solve(&instance, &Budget::unlimited())
            .unwrap();

        // -7 + 10 - 2 = 1 or 3 - 2 = 1
        assert!(result.solved);
        let subset = instance.as_subset_sum().unwrap();
        match result.witness {
            Some(Witness::Subset { values, indices }) => {
                assert!(verify_subset(subset, &values, &indices));
            }
            other => panic!("expected a subset witness, got {other:?}"),
        }
    }

    #[test]
    fn test_unreachable_target_pruned_quickly() {
        // All-positive input, target above the total: the root prune fires.
        let instance = instance(vec![1, 2, 3, 4, 5], 100);
        let result = SubsetSumBruteForce
            .solve(&instance, &Budget::unlimited())
            .unwrap();

        assert!(!result.solved);
        assert_eq!(result.counter("subsets_tried"), 1);
    }

    #[test]
    fn test_timeout_distinct_from_proven_absent() {
        // 20 large even numbers with an odd in-range target: unreachable,
        // but the suffix bounds cannot prove it, so the tree stays large
        // and the expired budget is noticed mid-search.
        let numbers: Vec<i64> = (1..=20).map(|i| 2_000 * i).collect();
        let instance = instance(numbers, 333_333);
        let result = SubsetSumBruteForce
            .solve(&instance, &Budget::with_timeout(Duration::ZERO))
            .unwrap();

        assert!(result.timed_out);
        assert!(!result.solved);
    }

    #[test]
    fn test_wrong_payload_kind() {
        let formula =
            crate::sat::CnfFormula::new(1, vec![crate::sat::Clause::unit(1)]).unwrap();
        let wrong = ProblemInstance::new(1, Payload::Sat(formula));
        let err = SubsetSumBruteForce
            .solve(&wrong, &Budget::unlimited())
            .unwrap_err();
        assert!(matches!(err, SolverError::PayloadMismatch { .. }));
    }
}
