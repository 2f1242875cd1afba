//! Solver result records and witnesses

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// A concrete solution proving a positive instance.
///
/// Serialized variant names (`assignment`, `subset`, `tour`) are part of the
/// output contract; downstream consumers key off them directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Witness {
    /// Truth values for variables `x1..xN`, indexed from zero.
    Assignment(Vec<bool>),
    /// A sub-multiset summing exactly to the target, with the positions of
    /// the chosen elements in the input sequence.
    Subset { values: Vec<i64>, indices: Vec<usize> },
    /// A permutation of all cities and the length of the closed tour.
    Tour { order: Vec<usize>, distance: f64 },
}

/// Record produced once per solver invocation; read-only after return.
///
/// `timed_out: true` marks a search abandoned before completion, which is
/// distinct from `solved: false` with `timed_out: false` (a proven-absent
/// solution). Counter keys (`assignments_tried`, `subsets_tried`,
/// `tours_tried`, ...) are a stable contract and reflect work actually
/// performed, never estimates.
#[derive(Debug, Clone, Serialize)]
pub struct SolverResult {
    pub algorithm_name: String,
    pub solved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub witness: Option<Witness>,
    pub counters: BTreeMap<String, u64>,
    pub elapsed: Duration,
    pub timed_out: bool,
}

impl SolverResult {
    /// Counter value by key, zero when the solver did not record it.
    pub fn counter(&self, key: &str) -> u64 {
        self.counters.get(key).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_defaults_to_zero() {
        let result = SolverResult {
            algorithm_name: "test".to_string(),
            solved: false,
            witness: None,
            counters: BTreeMap::new(),
            elapsed: Duration::ZERO,
            timed_out: false,
        };
        assert_eq!(result.counter("assignments_tried"), 0);
    }

    #[test]
    fn test_witness_serialization_keys() {
        let assignment = Witness::Assignment(vec![true, false]);
        let json = serde_json::to_string(&assignment).unwrap();
        assert!(json.contains("\"assignment\""));

        let tour = Witness::Tour {
            order: vec![0, 1, 2],
            distance: 10.0,
        };
        let json = serde_json::to_string(&tour).unwrap();
        assert!(json.contains("\"tour\""));
    }

    #[test]
    fn test_result_serialization_includes_contract_fields() {
        let mut counters = BTreeMap::new();
        counters.insert("subsets_tried".to_string(), 12);
        let result = SolverResult {
            algorithm_name: "Brute Force Subset Sum Solver".to_string(),
            solved: true,
            witness: Some(Witness::Subset {
                values: vec![4, 5],
                indices: vec![2, 4],
            }),
            counters,
            elapsed: Duration::from_millis(3),
            timed_out: false,
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"algorithm_name\""));
        assert!(json.contains("\"subsets_tried\":12"));
        assert!(json.contains("\"timed_out\":false"));
    }
}
