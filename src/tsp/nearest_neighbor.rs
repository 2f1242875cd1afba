//! Nearest-neighbor TSP heuristic with optional 2-opt refinement

use super::TspInstance;
use crate::error::SolverError;
use crate::problem::ProblemInstance;
use crate::solve::{Budget, Solver, SolverResult, Witness};
use std::collections::BTreeMap;
use std::time::Instant;

/// Improvements below this are treated as floating-point noise.
const IMPROVEMENT_EPSILON: f64 = 1e-10;

/// Nearest Neighbor heuristic TSP solver.
///
/// Greedily extends a tour by always moving to the nearest unvisited city.
/// With no start city configured, every start is tried and the best tour
/// kept. O(n^2) per start; a polynomial-time approximation with no
/// optimality guarantee, but the reported length is never shorter than the
/// true optimum and the tour is always a valid permutation.
pub struct TspNearestNeighbor {
    /// Fixed start city, or `None` to try all starts.
    pub start_city: Option<usize>,
}

impl Solver for TspNearestNeighbor {
    fn solve(
        &self,
        instance: &ProblemInstance,
        budget: &Budget,
    ) -> Result<SolverResult, SolverError> {
        let tsp = instance.as_tsp()?;
        let started = Instant::now();
        let n = tsp.num_cities();

        if n < 2 {
            return Ok(result(self.algorithm_name(), None, 0, started, false));
        }
        let starts = start_cities(self.start_city, n)?;

        let mut best_tour: Option<Vec<usize>> = None;
        let mut best_distance = f64::INFINITY;
        let mut distance_calculations = 0u64;

        for start in starts {
            if budget.expired() {
                return Ok(result(
                    self.algorithm_name(),
                    None,
                    distance_calculations,
                    started,
                    true,
                ));
            }
            let (tour, distance, calculations) = greedy_tour(tsp, start);
            distance_calculations += calculations;
            if distance < best_distance {
                best_distance = distance;
                best_tour = Some(tour);
            }
        }

        let witness = best_tour.map(|order| Witness::Tour {
            distance: best_distance,
            order,
        });
        Ok(result(
            self.algorithm_name(),
            witness,
            distance_calculations,
            started,
            false,
        ))
    }

    fn algorithm_name(&self) -> &'static str {
        "Nearest Neighbor TSP Heuristic"
    }

    fn complexity_class(&self) -> &'static str {
        "Polynomial Time Approximation (O(n^2))"
    }
}

/// Nearest Neighbor with 2-opt local search.
///
/// Starts from the nearest-neighbor tour and repeatedly reverses the tour
/// segment between two edges whenever the reversal strictly shortens the
/// tour, until no improving reversal exists or the iteration cap is hit.
pub struct TspNearestNeighborTwoOpt {
    pub start_city: Option<usize>,
    /// Upper bound on applied reversals; guards against long convergence
    /// tails on adversarial instances.
    pub iteration_cap: usize,
}

impl Solver for TspNearestNeighborTwoOpt {
    fn solve(
        &self,
        instance: &ProblemInstance,
        budget: &Budget,
    ) -> Result<SolverResult, SolverError> {
        let tsp = instance.as_tsp()?;
        let started = Instant::now();
        let n = tsp.num_cities();

        if n < 2 {
            return Ok(result(self.algorithm_name(), None, 0, started, false));
        }
        let starts = start_cities(self.start_city, n)?;

        let mut best_tour: Option<Vec<usize>> = None;
        let mut best_distance = f64::INFINITY;
        let mut distance_calculations = 0u64;

        for start in starts {
            let (tour, distance, calculations) = greedy_tour(tsp, start);
            distance_calculations += calculations;
            if distance < best_distance {
                best_distance = distance;
                best_tour = Some(tour);
            }
        }

        let initial_tour = best_tour.expect("at least one start city was tried");
        let (tour, distance, improvements, calculations, timed_out) = two_opt(
            tsp,
            initial_tour,
            best_distance,
            self.iteration_cap,
            budget,
        );
        distance_calculations += calculations;

        let witness = Some(Witness::Tour {
            distance,
            order: tour,
        });
        let mut solver_result = result(
            self.algorithm_name(),
            witness,
            distance_calculations,
            started,
            timed_out,
        );
        solver_result
            .counters
            .insert("two_opt_improvements".to_string(), improvements);
        // The heuristic still holds a valid tour when the budget expires
        // mid-refinement.
        solver_result.solved = true;
        Ok(solver_result)
    }

    fn algorithm_name(&self) -> &'static str {
        "Nearest Neighbor + 2-Opt TSP Solver"
    }

    fn complexity_class(&self) -> &'static str {
        "Polynomial Time Approximation with Local Search (O(n^3))"
    }
}

fn start_cities(start_city: Option<usize>, n: usize) -> Result<Vec<usize>, SolverError> {
    match start_city {
        Some(city) if city >= n => Err(SolverError::StartCityOutOfRange {
            city,
            num_cities: n,
        }),
        Some(city) => Ok(vec![city]),
        None => Ok((0..n).collect()),
    }
}

/// Greedy tour from a start city: repeatedly move to the nearest unvisited
/// city, then close the loop.
fn greedy_tour(tsp: &TspInstance, start: usize) -> (Vec<usize>, f64, u64) {
    let n = tsp.num_cities();
    let mut tour = Vec::with_capacity(n);
    let mut visited = vec![false; n];
    let mut current = start;
    let mut total = 0.0;
    let mut calculations = 0u64;

    tour.push(start);
    visited[start] = true;

    while tour.len() < n {
        let mut nearest = None;
        let mut nearest_distance = f64::INFINITY;
        for city in 0..n {
            if visited[city] {
                continue;
            }
            let distance = tsp.distance(current, city);
            calculations += 1;
            if distance < nearest_distance {
                nearest_distance = distance;
                nearest = Some(city);
            }
        }
        let next = nearest.expect("an unvisited city remains while the tour is short");
        tour.push(next);
        visited[next] = true;
        total += nearest_distance;
        current = next;
    }

    total += tsp.distance(current, start);
    calculations += 1;

    (tour, total, calculations)
}

/// 2-opt refinement. Returns the improved tour, its length, the number of
/// applied reversals, distance lookups performed, and whether the budget
/// expired mid-search.
fn two_opt(
    tsp: &TspInstance,
    mut tour: Vec<usize>,
    mut best_distance: f64,
    iteration_cap: usize,
    budget: &Budget,
) -> (Vec<usize>, f64, u64, u64, bool) {
    let n = tour.len();
    let mut improvements = 0u64;
    let mut calculations = 0u64;
    let mut improved = true;

    while improved && (improvements as usize) < iteration_cap {
        if budget.expired() {
            return (tour, best_distance, improvements, calculations, true);
        }
        improved = false;

        'sweep: for i in 0..n {
            for j in i + 2..n {
                // The edge pair sharing the wrap-around vertex is the same
                // tour read backwards.
                if i == 0 && j == n - 1 {
                    continue;
                }

                let a = tour[i];
                let b = tour[(i + 1) % n];
                let c = tour[j];
                let d = tour[(j + 1) % n];

                let current = tsp.distance(a, b) + tsp.distance(c, d);
                let proposed = tsp.distance(a, c) + tsp.distance(b, d);
                calculations += 4;

                if proposed - current < -IMPROVEMENT_EPSILON {
                    tour[i + 1..=j].reverse();
                    best_distance += proposed - current;
                    improvements += 1;
                    improved = true;
                    break 'sweep;
                }
            }
        }
    }

    // Recompute from the matrix to shed accumulated floating-point drift.
    let exact = tsp.tour_distance(&tour);
    (tour, exact, improvements, calculations, false)
}

fn result(
    name: &str,
    witness: Option<Witness>,
    distance_calculations: u64,
    started: Instant,
    timed_out: bool,
) -> SolverResult {
    let mut counters = BTreeMap::new();
    counters.insert("distance_calculations".to_string(), distance_calculations);
    SolverResult {
        algorithm_name: name.to_string(),
        solved: !timed_out && witness.is_some(),
        witness,
        counters,
        elapsed: started.elapsed(),
        timed_out,
    }
}
