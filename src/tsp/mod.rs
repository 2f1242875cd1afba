//! TSP engine: brute-force tour enumeration and the nearest-neighbor
//! heuristic with optional 2-opt refinement

pub mod brute_force;
pub mod nearest_neighbor;

pub use brute_force::TspBruteForce;
pub use nearest_neighbor::{TspNearestNeighbor, TspNearestNeighborTwoOpt};

use crate::error::SolverError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A TSP instance: a square distance matrix over city indices. Symmetry is
/// not required by the solvers, only squareness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TspInstance {
    distances: Vec<Vec<f64>>,
}

impl TspInstance {
    pub fn new(distances: Vec<Vec<f64>>) -> Result<Self, SolverError> {
        let expected = distances.len();
        for (row, entries) in distances.iter().enumerate() {
            if entries.len() != expected {
                return Err(SolverError::NonSquareMatrix {
                    row,
                    len: entries.len(),
                    expected,
                });
            }
        }
        Ok(Self { distances })
    }

    pub fn num_cities(&self) -> usize {
        self.distances.len()
    }

    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances[from][to]
    }

    /// Total length of a closed tour: consecutive pairs plus the edge back
    /// to the start.
    pub fn tour_distance(&self, tour: &[usize]) -> f64 {
        debug_assert_eq!(tour.len(), self.num_cities());
        let mut total = 0.0;
        for i in 0..tour.len() {
            let next = tour[(i + 1) % tour.len()];
            total += self.distance(tour[i], next);
        }
        total
    }
}

impl fmt::Display for TspInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "TSP instance with {} cities:", self.num_cities())?;
        for row in &self.distances {
            write!(f, " ")?;
            for value in row {
                write!(f, " {value:6.1}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A valid tour visits every city exactly once.
pub fn verify_tour(instance: &TspInstance, tour: &[usize]) -> bool {
    let n = instance.num_cities();
    if tour.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &city in tour {
        if city >= n || seen[city] {
            return false;
        }
        seen[city] = true;
    }
    true
}
