//! Brute-force TSP via exhaustive permutation enumeration

use crate::error::SolverError;
use crate::problem::ProblemInstance;
use crate::solve::{Budget, Solver, SolverResult, Witness};
use itertools::Itertools;
use std::collections::BTreeMap;
use std::time::Instant;

/// How many tours to evaluate between budget checks.
const BUDGET_CHECK_INTERVAL: u64 = 64;

/// Brute-force TSP solver.
///
/// Fixes city 0 as the start to avoid rotational duplicates and enumerates
/// all `(n-1)!` permutations of the remaining cities, keeping the shortest
/// tour. Impractical beyond 10-12 cities.
pub struct TspBruteForce;

impl Solver for TspBruteForce {
    fn solve(
        &self,
        instance: &ProblemInstance,
        budget: &Budget,
    ) -> Result<SolverResult, SolverError> {
        let tsp = instance.as_tsp()?;
        let started = Instant::now();
        let n = tsp.num_cities();

        // A tour needs at least two cities.
        if n < 2 {
            return Ok(result(self.algorithm_name(), None, 0, started, false));
        }

        let mut best_tour: Option<Vec<usize>> = None;
        let mut best_distance = f64::INFINITY;
        let mut tours_tried = 0u64;
        let mut tour = Vec::with_capacity(n);

        for rest in (1..n).permutations(n - 1) {
            tours_tried += 1;
            if tours_tried % BUDGET_CHECK_INTERVAL == 0 && budget.expired() {
                let witness = best_tour.map(|order| Witness::Tour {
                    distance: tsp.tour_distance(&order),
                    order,
                });
                // Partial search: report the abandonment even though a best-
                // so-far tour may be attached.
                return Ok(result(self.algorithm_name(), witness, tours_tried, started, true));
            }

            tour.clear();
            tour.push(0);
            tour.extend(rest);

            let distance = tsp.tour_distance(&tour);
            if distance < best_distance {
                best_distance = distance;
                best_tour = Some(tour.clone());
            }
        }

        let witness = best_tour.map(|order| Witness::Tour {
            distance: best_distance,
            order,
        });
        Ok(result(self.algorithm_name(), witness, tours_tried, started, false))
    }

    fn algorithm_name(&self) -> &'static str {
        "Brute Force TSP Solver"
    }

    fn complexity_class(&self) -> &'static str {
        "NP-Complete (Factorial Time)"
    }
}

fn result(
    name: &str,
    witness: Option<Witness>,
    tours_tried: u64,
    started: Instant,
    timed_out: bool,
) -> SolverResult {
    let mut counters = BTreeMap::new();
    counters.insert("tours_tried".to_string(), tours_tried);
    SolverResult {
        algorithm_name: name.to_string(),
        solved: !timed_out && witness.is_some(),
        witness,
        counters,
        elapsed: started.elapsed(),
        timed_out,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::Payload;
    use crate::tsp::{verify_tour, TspInstance};

    fn instance(distances: Vec<Vec<f64>>) -> ProblemInstance {
        let tsp = TspInstance::new(distances).unwrap();
        ProblemInstance::new(tsp.num_cities(), Payload::Tsp(tsp))
    }

    fn square_instance() -> ProblemInstance {
        let d = std::f64::consts::SQRT_2;
        instance(vec![
            vec![0.0, 1.0, d, 1.0],
            vec![1.0, 0.0, 1.0, d],
            vec![d, 1.0, 0.0, 1.0],
            vec![1.0, d, 1.0, 0.0],
        ])
    }

    #[test]
    fn test_finds_known_optimum() {
        // The perimeter tour of the unit square has length 4; any tour
        // using a diagonal is strictly longer.
        let instance = square_instance();
        let result = TspBruteForce.solve(&instance, &Budget::unlimited()).unwrap();

        assert!(result.solved);
        assert_eq!(result.counter("tours_tried"), 6);
        match result.witness {
            Some(Witness::Tour { order, distance }) => {
                assert!((distance - 4.0).abs() < 1e-9);
                assert!(verify_tour(instance.as_tsp().unwrap(), &order));
            }
            other => panic!("expected a tour witness, got {other:?}"),
        }
    }

    #[test]
    fn test_two_cities_single_tour() {
        let instance = instance(vec![vec![0.0, 3.0], vec![3.0, 0.0]]);
        let result = TspBruteForce.solve(&instance, &Budget::unlimited()).unwrap();

        assert!(result.solved);
        assert_eq!(result.counter("tours_tried"), 1);
        match result.witness {
            Some(Witness::Tour { order, distance }) => {
                assert_eq!(order, vec![0, 1]);
                assert!((distance - 6.0).abs() < 1e-9);
            }
            other => panic!("expected a tour witness, got {other:?}"),
        }
    }

    #[test]
    fn test_single_city_has_no_tour() {
        let instance = instance(vec![vec![0.0]]);
        let result = TspBruteForce.solve(&instance, &Budget::unlimited()).unwrap();

        assert!(!result.solved);
        assert_eq!(result.counter("tours_tried"), 0);
        assert!(result.witness.is_none());
    }

    #[test]
    fn test_asymmetric_matrix_supported() {
        // Directed distances: 0->1->2->0 is cheap, the reverse expensive.
        let instance = instance(vec![
            vec![0.0, 1.0, 9.0],
            vec![9.0, 0.0, 1.0],
            vec![1.0, 9.0, 0.0],
        ]);
        let result = TspBruteForce.solve(&instance, &Budget::unlimited()).unwrap();

        match result.witness {
            Some(Witness::Tour { order, distance }) => {
                assert_eq!(order, vec![0, 1, 2]);
                assert!((distance - 3.0).abs() < 1e-9);
            }
            other => panic!("expected a tour witness, got {other:?}"),
        }
    }

    #[test]
    fn test_wrong_payload_kind() {
        let subset = crate::subset_sum::SubsetSumInstance::new(vec![1], 1);
        let wrong = ProblemInstance::new(1, Payload::SubsetSum(subset));
        let err = TspBruteForce.solve(&wrong, &Budget::unlimited()).unwrap_err();
        assert!(matches!(err, SolverError::PayloadMismatch { .. }));
    }
}
