//! Subset Sum instance generation

use super::rng::XorShift64;
use crate::problem::{Payload, ProblemInstance};
use crate::solve::Witness;
use crate::subset_sum::SubsetSumInstance;
use anyhow::Result;
use serde_json::json;

/// Generate a Subset Sum instance with random positive integers. When no
/// target is supplied, the sum of a random subset is used, which keeps the
/// instance solvable.
pub fn random_subset_sum(
    set_size: usize,
    max_value: i64,
    target: Option<i64>,
    seed: u64,
) -> Result<ProblemInstance> {
    validate_params(set_size, max_value)?;
    let mut rng = XorShift64::new(seed);

    let numbers: Vec<i64> = (0..set_size).map(|_| rng.next_range(1, max_value)).collect();
    let target = match target {
        Some(target) => target,
        None => planted_target(&mut rng, &numbers).1,
    };

    let mut instance = build_instance(numbers, target, max_value, seed);
    instance.metadata.generation_method = Some("random_subset_sum".to_string());
    Ok(instance)
}

/// Generate a guaranteed solvable Subset Sum instance by planting a random
/// subset and using its sum as the target. The planted subset lands in
/// `metadata.known_witness`.
pub fn solvable_subset_sum(set_size: usize, max_value: i64, seed: u64) -> Result<ProblemInstance> {
    validate_params(set_size, max_value)?;
    let mut rng = XorShift64::new(seed);

    let numbers: Vec<i64> = (0..set_size).map(|_| rng.next_range(1, max_value)).collect();
    let (indices, target) = planted_target(&mut rng, &numbers);
    let values: Vec<i64> = indices.iter().map(|&i| numbers[i]).collect();

    let mut instance = build_instance(numbers, target, max_value, seed);
    instance.metadata.generation_method = Some("solvable_subset_sum".to_string());
    instance.metadata.known_witness = Some(Witness::Subset { values, indices });
    Ok(instance)
}

fn validate_params(set_size: usize, max_value: i64) -> Result<()> {
    if set_size < 1 {
        anyhow::bail!("set size must be at least 1");
    }
    if max_value < 1 {
        anyhow::bail!("maximum value must be at least 1, got {max_value}");
    }
    Ok(())
}

/// Pick a small random subset and return its (sorted) indices and sum.
/// Subset size is capped at 5 to keep targets reachable quickly.
fn planted_target(rng: &mut XorShift64, numbers: &[i64]) -> (Vec<usize>, i64) {
    let subset_size = 1 + rng.next_below(numbers.len().min(5));
    let mut indices = rng.sample_distinct(numbers.len(), subset_size);
    indices.sort_unstable();
    let target = indices.iter().map(|&i| numbers[i]).sum();
    (indices, target)
}

fn build_instance(numbers: Vec<i64>, target: i64, max_value: i64, seed: u64) -> ProblemInstance {
    let set_size = numbers.len();
    let total: i64 = numbers.iter().sum();

    let mut instance = ProblemInstance::new(
        set_size,
        Payload::SubsetSum(SubsetSumInstance::new(numbers, target)),
    );
    instance
        .parameters
        .insert("set_size".to_string(), json!(set_size));
    instance
        .parameters
        .insert("max_value".to_string(), json!(max_value));
    instance
        .parameters
        .insert("target".to_string(), json!(target));
    instance.parameters.insert("seed".to_string(), json!(seed));
    instance
        .metadata
        .extra
        .insert("total_sum".to_string(), json!(total));
    instance
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solve::verify_witness;

    #[test]
    fn test_numbers_within_bounds() {
        let instance = random_subset_sum(10, 50, None, 5).unwrap();
        let subset = instance.as_subset_sum().unwrap();
        assert_eq!(subset.len(), 10);
        assert!(subset.numbers().iter().all(|&n| (1..=50).contains(&n)));
    }

    #[test]
    fn test_explicit_target_is_kept() {
        let instance = random_subset_sum(6, 20, Some(77), 5).unwrap();
        assert_eq!(instance.as_subset_sum().unwrap().target(), 77);
    }

    #[test]
    fn test_same_seed_reproduces_instance() {
        let a = random_subset_sum(12, 100, None, 31).unwrap();
        let b = random_subset_sum(12, 100, None, 31).unwrap();
        assert_eq!(a.as_subset_sum().unwrap(), b.as_subset_sum().unwrap());
    }

    #[test]
    fn test_planted_subset_verifies() {
        for seed in [1, 8, 555] {
            let instance = solvable_subset_sum(10, 60, seed).unwrap();
            let witness = instance
                .metadata
                .known_witness
                .clone()
                .expect("planted generator records its witness");
            assert!(verify_witness(&instance, &witness));
        }
    }

    #[test]
    fn test_parameter_validation() {
        assert!(random_subset_sum(0, 10, None, 0).is_err());
        assert!(random_subset_sum(5, 0, None, 0).is_err());
    }
}
