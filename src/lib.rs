//! NP-Hard Lab solver core
//!
//! Textbook solvers for three canonical NP-complete problems — 3-SAT,
//! Subset Sum, and TSP — each in a brute-force and an optimized variant,
//! behind one polymorphic solver contract. Seeded generators, a cooperative
//! timeout budget, and a benchmark harness make before/after comparisons of
//! the variants reproducible.

pub mod bench;
pub mod config;
pub mod error;
pub mod generate;
pub mod problem;
pub mod report;
pub mod sat;
pub mod solve;
pub mod subset_sum;
pub mod tsp;

pub use config::Settings;
pub use error::{ParseError, SolverError};
pub use problem::{Payload, ProblemInstance, ProblemKind};
pub use solve::{verify_witness, Algorithm, Budget, Solver, SolverResult, Witness};

/// Main entry point: run one algorithm on one instance under the given
/// settings.
pub fn solve_instance(
    algorithm: Algorithm,
    instance: &ProblemInstance,
    settings: &Settings,
) -> Result<SolverResult, SolverError> {
    algorithm
        .build(&settings.solver)
        .solve(instance, &settings.solver.budget())
}
