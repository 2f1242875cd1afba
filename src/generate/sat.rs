//! 3-SAT instance generation

use super::rng::XorShift64;
use crate::problem::{Payload, ProblemInstance};
use crate::sat::{Clause, CnfFormula};
use crate::solve::Witness;
use anyhow::Result;
use serde_json::json;

/// Generate a uniform random 3-SAT instance: each clause holds three
/// distinct variables with independently random polarities.
pub fn random_3sat(num_variables: usize, num_clauses: usize, seed: u64) -> Result<ProblemInstance> {
    validate_params(num_variables, num_clauses)?;
    let mut rng = XorShift64::new(seed);

    let clauses: Vec<Clause> = (0..num_clauses)
        .map(|_| random_clause(&mut rng, num_variables))
        .collect();

    let formula = CnfFormula::new(num_variables, clauses)?;
    let mut instance = ProblemInstance::new(num_variables, Payload::Sat(formula));
    record_params(&mut instance, num_variables, num_clauses, seed);
    instance.metadata.generation_method = Some("random_3sat".to_string());
    Ok(instance)
}

/// Generate a 3-SAT instance guaranteed satisfiable by planting a random
/// assignment first and forcing at least one agreeing literal into every
/// clause. The planted assignment lands in `metadata.known_witness`.
pub fn satisfiable_3sat(
    num_variables: usize,
    num_clauses: usize,
    seed: u64,
) -> Result<ProblemInstance> {
    validate_params(num_variables, num_clauses)?;
    let mut rng = XorShift64::new(seed);

    let planted: Vec<bool> = (0..num_variables).map(|_| rng.next_bool()).collect();

    let clauses: Vec<Clause> = (0..num_clauses)
        .map(|_| {
            let mut literals: Vec<i32> = rng
                .sample_distinct(num_variables, 3)
                .into_iter()
                .map(|index| {
                    let variable = (index + 1) as i32;
                    // Mostly agree with the planted assignment, with enough
                    // disagreement to keep the instances non-trivial.
                    let agree = rng.next_f64() < 0.7;
                    let satisfied_positively = planted[index];
                    if agree == satisfied_positively {
                        variable
                    } else {
                        -variable
                    }
                })
                .collect();

            // The clause must keep at least one literal the planted
            // assignment satisfies.
            let satisfied = literals.iter().any(|&literal| {
                let value = planted[literal.unsigned_abs() as usize - 1];
                (literal > 0) == value
            });
            if !satisfied {
                let variable = literals[0].unsigned_abs() as i32;
                literals[0] = if planted[variable as usize - 1] {
                    variable
                } else {
                    -variable
                };
            }

            Clause::new(literals)
        })
        .collect();

    let formula = CnfFormula::new(num_variables, clauses)?;
    let mut instance = ProblemInstance::new(num_variables, Payload::Sat(formula));
    record_params(&mut instance, num_variables, num_clauses, seed);
    instance.metadata.generation_method = Some("satisfiable_3sat".to_string());
    instance.metadata.known_witness = Some(Witness::Assignment(planted));
    Ok(instance)
}

fn validate_params(num_variables: usize, num_clauses: usize) -> Result<()> {
    if num_variables < 3 {
        anyhow::bail!("3-SAT needs at least 3 variables, got {num_variables}");
    }
    if num_clauses < 1 {
        anyhow::bail!("3-SAT needs at least 1 clause");
    }
    Ok(())
}

fn random_clause(rng: &mut XorShift64, num_variables: usize) -> Clause {
    let literals = rng
        .sample_distinct(num_variables, 3)
        .into_iter()
        .map(|index| {
            let variable = (index + 1) as i32;
            if rng.next_bool() {
                -variable
            } else {
                variable
            }
        })
        .collect();
    Clause::new(literals)
}

fn record_params(
    instance: &mut ProblemInstance,
    num_variables: usize,
    num_clauses: usize,
    seed: u64,
) {
    instance
        .parameters
        .insert("num_variables".to_string(), json!(num_variables));
    instance
        .parameters
        .insert("num_clauses".to_string(), json!(num_clauses));
    instance.parameters.insert("seed".to_string(), json!(seed));
    instance.metadata.extra.insert(
        "clause_to_variable_ratio".to_string(),
        json!(num_clauses as f64 / num_variables as f64),
    );
}
