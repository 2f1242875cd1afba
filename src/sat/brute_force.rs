//! Brute-force SAT solving by exhaustive truth-table enumeration

use super::expr::BoolExpr;
use crate::error::SolverError;
use crate::problem::ProblemInstance;
use crate::solve::{Budget, Solver, SolverResult, Witness};
use std::collections::BTreeMap;
use std::time::Instant;

/// Exhaustive enumeration is indexed by a u64 counter, so formulas beyond
/// this many variables are rejected up front.
const MAX_BRUTE_FORCE_VARIABLES: usize = 63;

/// How many assignments to evaluate between budget checks.
const BUDGET_CHECK_INTERVAL: u64 = 256;

/// Brute-force SAT solver using exhaustive truth-table evaluation.
///
/// Tries all `2^n` truth assignments in increasing binary-counter order
/// (bit `i` of the counter is variable `x(i+1)`) and returns the first
/// satisfying assignment. O(2^n * m) for n variables and m clauses.
pub struct SatBruteForce;

impl Solver for SatBruteForce {
    fn solve(
        &self,
        instance: &ProblemInstance,
        budget: &Budget,
    ) -> Result<SolverResult, SolverError> {
        let formula = instance.as_sat()?;
        let started = Instant::now();

        let num_variables = formula.num_variables();
        if num_variables > MAX_BRUTE_FORCE_VARIABLES {
            return Err(SolverError::SearchSpaceTooLarge {
                count: num_variables,
                limit: MAX_BRUTE_FORCE_VARIABLES,
            });
        }

        let total = 1u64 << num_variables;
        let mut assignment = vec![false; num_variables];
        let mut assignments_tried = 0u64;

        for mask in 0..total {
            assignments_tried += 1;
            if assignments_tried % BUDGET_CHECK_INTERVAL == 0 && budget.expired() {
                return Ok(result(
                    self.algorithm_name(),
                    false,
                    None,
                    assignments_tried,
                    started,
                    true,
                ));
            }

            decode_assignment(mask, &mut assignment);
            if formula.is_satisfied_by(&assignment) {
                return Ok(result(
                    self.algorithm_name(),
                    true,
                    Some(Witness::Assignment(assignment)),
                    assignments_tried,
                    started,
                    false,
                ));
            }
        }

        Ok(result(
            self.algorithm_name(),
            false,
            None,
            assignments_tried,
            started,
            false,
        ))
    }

    fn algorithm_name(&self) -> &'static str {
        "Brute Force SAT Solver"
    }

    fn complexity_class(&self) -> &'static str {
        "NP-Complete (Exponential Time)"
    }
}

/// Brute-force satisfiability search over a parsed boolean expression,
/// reusing the truth-table enumeration order of [`SatBruteForce`].
pub fn solve_expression(
    expr: &BoolExpr,
    budget: &Budget,
) -> Result<SolverResult, SolverError> {
    let started = Instant::now();
    let num_variables = expr.num_variables();
    if num_variables > MAX_BRUTE_FORCE_VARIABLES {
        return Err(SolverError::SearchSpaceTooLarge {
            count: num_variables,
            limit: MAX_BRUTE_FORCE_VARIABLES,
        });
    }

    let total = 1u64 << num_variables;
    let mut assignment = vec![false; num_variables];
    let mut assignments_tried = 0u64;

    for mask in 0..total {
        assignments_tried += 1;
        if assignments_tried % BUDGET_CHECK_INTERVAL == 0 && budget.expired() {
            return Ok(result(
                "Brute Force SAT Solver",
                false,
                None,
                assignments_tried,
                started,
                true,
            ));
        }

        decode_assignment(mask, &mut assignment);
        if expr.evaluate(&assignment) {
            return Ok(result(
                "Brute Force SAT Solver",
                true,
                Some(Witness::Assignment(assignment)),
                assignments_tried,
                started,
                false,
            ));
        }
    }

    Ok(result(
        "Brute Force SAT Solver",
        false,
        None,
        assignments_tried,
        started,
        false,
    ))
}

fn decode_assignment(mask: u64, assignment: &mut [bool]) {
    for (i, slot) in assignment.iter_mut().enumerate() {
        *slot = (mask >> i) & 1 == 1;
    }
}

fn result(
    name: &str,
    solved: bool,
    witness: Option<Witness>,
    assignments_tried: u64,
    started: Instant,
    timed_out: bool,
) -> SolverResult {
    let mut counters = BTreeMap::new();
    counters.insert("assignments_tried".to_string(), assignments_tried);
    SolverResult {
        algorithm_name: name.to_string(),
        solved,
        witness,
        counters,
        elapsed: started.elapsed(),
        timed_out,
    }
}
