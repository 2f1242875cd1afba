//! Seeded problem instance generators
//!
//! Every generator takes an explicit seed and produces the same instance for
//! the same parameters, which keeps benchmark comparisons and cross-check
//! tests reproducible. Planted-solution generators record the planted
//! witness in the instance metadata so tests can verify solver output
//! against it.

pub mod rng;
pub mod sat;
pub mod subset_sum;
pub mod tsp;

pub use rng::XorShift64;
pub use sat::{random_3sat, satisfiable_3sat};
pub use subset_sum::{random_subset_sum, solvable_subset_sum};
pub use tsp::{euclidean_tsp, random_tsp};

use serde::{Deserialize, Serialize};

/// Default parameter presets for common instance sizes, kept small enough
/// that even the brute-force solvers finish interactively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizePreset {
    Small,
    Medium,
    Large,
    ExtraLarge,
}

impl SizePreset {
    /// (variables, clauses) for 3-SAT generation.
    pub fn sat_params(self) -> (usize, usize) {
        match self {
            SizePreset::Small => (5, 10),
            SizePreset::Medium => (10, 25),
            SizePreset::Large => (15, 40),
            SizePreset::ExtraLarge => (20, 60),
        }
    }

    /// (set size, max value) for Subset Sum generation.
    pub fn subset_sum_params(self) -> (usize, i64) {
        match self {
            SizePreset::Small => (8, 40),
            SizePreset::Medium => (12, 80),
            SizePreset::Large => (16, 120),
            SizePreset::ExtraLarge => (20, 200),
        }
    }

    /// (cities, max distance) for TSP generation.
    pub fn tsp_params(self) -> (usize, f64) {
        match self {
            SizePreset::Small => (4, 50.0),
            SizePreset::Medium => (6, 100.0),
            SizePreset::Large => (8, 150.0),
            SizePreset::ExtraLarge => (10, 200.0),
        }
    }
}

impl std::str::FromStr for SizePreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "small" => Ok(SizePreset::Small),
            "medium" => Ok(SizePreset::Medium),
            "large" => Ok(SizePreset::Large),
            "extra-large" | "extra_large" => Ok(SizePreset::ExtraLarge),
            other => Err(format!(
                "unknown size preset '{other}' (expected small, medium, large, or extra-large)"
            )),
        }
    }
}

impl std::fmt::Display for SizePreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SizePreset::Small => "small",
            SizePreset::Medium => "medium",
            SizePreset::Large => "large",
            SizePreset::ExtraLarge => "extra-large",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_round_trips_through_display() {
        for preset in [
            SizePreset::Small,
            SizePreset::Medium,
            SizePreset::Large,
            SizePreset::ExtraLarge,
        ] {
            assert_eq!(preset.to_string().parse::<SizePreset>().unwrap(), preset);
        }
    }

    #[test]
    fn test_presets_grow_monotonically() {
        let sizes: Vec<usize> = [
            SizePreset::Small,
            SizePreset::Medium,
            SizePreset::Large,
            SizePreset::ExtraLarge,
        ]
        .iter()
        .map(|preset| preset.sat_params().0)
        .collect();
        assert!(sizes.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
