//! Uniform solver contract shared by all six algorithm variants

pub mod budget;
pub mod result;

pub use budget::Budget;
pub use result::{SolverResult, Witness};

use crate::config::SolverConfig;
use crate::error::SolverError;
use crate::problem::{Payload, ProblemInstance, ProblemKind};
use crate::sat::{SatBruteForce, SatDpll};
use crate::subset_sum::{SubsetSumBruteForce, SubsetSumDp};
use crate::tsp::{TspBruteForce, TspNearestNeighbor, TspNearestNeighborTwoOpt};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Common interface implemented by every algorithm variant, enabling
/// benchmarking and demo code to treat them polymorphically.
///
/// Each `solve` call is a pure function of its input aside from wall-clock
/// budget checks; no state persists across calls.
pub trait Solver {
    fn solve(
        &self,
        instance: &ProblemInstance,
        budget: &Budget,
    ) -> Result<SolverResult, SolverError>;

    /// Human-readable algorithm name, also used as `algorithm_name` in
    /// result records.
    fn algorithm_name(&self) -> &'static str;

    /// Theoretical complexity class, e.g. "NP-Complete (Exponential Time)".
    fn complexity_class(&self) -> &'static str;
}

/// All solver variants by name, with a factory producing the configured
/// implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    SatBruteForce,
    SatDpll,
    SubsetSumBruteForce,
    SubsetSumDp,
    TspBruteForce,
    TspNearestNeighbor,
    TspNearestNeighborTwoOpt,
}

impl Algorithm {
    /// Build the solver behind this name, applying configurable options
    /// (TSP start city, 2-opt iteration cap).
    pub fn build(&self, config: &SolverConfig) -> Box<dyn Solver> {
        match self {
            Algorithm::SatBruteForce => Box::new(SatBruteForce),
            Algorithm::SatDpll => Box::new(SatDpll),
            Algorithm::SubsetSumBruteForce => Box::new(SubsetSumBruteForce),
            Algorithm::SubsetSumDp => Box::new(SubsetSumDp),
            Algorithm::TspBruteForce => Box::new(TspBruteForce),
            Algorithm::TspNearestNeighbor => Box::new(TspNearestNeighbor {
                start_city: config.tsp_start_city,
            }),
            Algorithm::TspNearestNeighborTwoOpt => Box::new(TspNearestNeighborTwoOpt {
                start_city: config.tsp_start_city,
                iteration_cap: config.two_opt_iteration_cap,
            }),
        }
    }

    /// Problem domain this algorithm solves.
    pub fn kind(&self) -> ProblemKind {
        match self {
            Algorithm::SatBruteForce | Algorithm::SatDpll => ProblemKind::Sat,
            Algorithm::SubsetSumBruteForce | Algorithm::SubsetSumDp => ProblemKind::SubsetSum,
            Algorithm::TspBruteForce
            | Algorithm::TspNearestNeighbor
            | Algorithm::TspNearestNeighborTwoOpt => ProblemKind::Tsp,
        }
    }

    /// All algorithms applicable to a problem kind, brute force first.
    pub fn for_kind(kind: ProblemKind) -> &'static [Algorithm] {
        match kind {
            ProblemKind::Sat => &[Algorithm::SatBruteForce, Algorithm::SatDpll],
            ProblemKind::SubsetSum => {
                &[Algorithm::SubsetSumBruteForce, Algorithm::SubsetSumDp]
            }
            ProblemKind::Tsp => &[
                Algorithm::TspBruteForce,
                Algorithm::TspNearestNeighbor,
                Algorithm::TspNearestNeighborTwoOpt,
            ],
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Algorithm::SatBruteForce => "sat-brute-force",
            Algorithm::SatDpll => "sat-dpll",
            Algorithm::SubsetSumBruteForce => "subset-sum-brute-force",
            Algorithm::SubsetSumDp => "subset-sum-dp",
            Algorithm::TspBruteForce => "tsp-brute-force",
            Algorithm::TspNearestNeighbor => "tsp-nearest-neighbor",
            Algorithm::TspNearestNeighborTwoOpt => "tsp-nearest-neighbor-2opt",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sat-brute-force" => Ok(Algorithm::SatBruteForce),
            "sat-dpll" => Ok(Algorithm::SatDpll),
            "subset-sum-brute-force" => Ok(Algorithm::SubsetSumBruteForce),
            "subset-sum-dp" => Ok(Algorithm::SubsetSumDp),
            "tsp-brute-force" => Ok(Algorithm::TspBruteForce),
            "tsp-nearest-neighbor" => Ok(Algorithm::TspNearestNeighbor),
            "tsp-nearest-neighbor-2opt" => Ok(Algorithm::TspNearestNeighborTwoOpt),
            other => Err(format!("unknown algorithm '{other}'")),
        }
    }
}

/// Check a witness against the instance it claims to solve. Used by tests
/// and the CLI to confirm solver output independently of the solver.
pub fn verify_witness(instance: &ProblemInstance, witness: &Witness) -> bool {
    match (&instance.payload, witness) {
        (Payload::Sat(formula), Witness::Assignment(assignment)) => {
            crate::sat::verify_assignment(formula, assignment)
        }
        (Payload::SubsetSum(subset), Witness::Subset { values, indices }) => {
            crate::subset_sum::verify_subset(subset, values, indices)
        }
        (Payload::Tsp(tsp), Witness::Tour { order, distance }) => {
            crate::tsp::verify_tour(tsp, order)
                && (tsp.tour_distance(order) - distance).abs() <= 1e-6
        }
        _ => false,
    }
}
