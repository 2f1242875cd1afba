//! Configuration settings for the solver lab

use crate::generate::SizePreset;
use crate::problem::ProblemKind;
use crate::solve::Budget;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub solver: SolverConfig,
    pub generator: GeneratorConfig,
    pub bench: BenchConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Wall-clock budget per solver call in milliseconds; 0 means unlimited.
    pub timeout_ms: u64,
    /// Fixed start city for the nearest-neighbor heuristic; `None` tries
    /// every start and keeps the best tour.
    pub tsp_start_city: Option<usize>,
    /// Upper bound on applied 2-opt reversals.
    pub two_opt_iteration_cap: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub seed: u64,
    pub preset: SizePreset,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Runs per solver/instance pair.
    pub repetitions: usize,
    pub presets: Vec<SizePreset>,
    pub problems: Vec<ProblemKind>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub show_counters: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            solver: SolverConfig {
                timeout_ms: 30_000,
                tsp_start_city: None,
                two_opt_iteration_cap: 10_000,
            },
            generator: GeneratorConfig {
                seed: 42,
                preset: SizePreset::Small,
            },
            bench: BenchConfig {
                repetitions: 3,
                presets: vec![SizePreset::Small, SizePreset::Medium],
                problems: vec![ProblemKind::Sat, ProblemKind::SubsetSum, ProblemKind::Tsp],
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                show_counters: false,
            },
        }
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Settings::default().solver
    }
}

impl SolverConfig {
    /// Budget for one solver call under these settings.
    pub fn budget(&self) -> Budget {
        if self.timeout_ms == 0 {
            Budget::unlimited()
        } else {
            Budget::with_timeout(Duration::from_millis(self.timeout_ms))
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.bench.repetitions == 0 {
            anyhow::bail!("Benchmark repetitions must be positive");
        }

        if self.bench.presets.is_empty() {
            anyhow::bail!("Benchmark preset list must not be empty");
        }

        if self.bench.problems.is_empty() {
            anyhow::bail!("Benchmark problem list must not be empty");
        }

        if self.solver.two_opt_iteration_cap == 0 {
            anyhow::bail!("2-opt iteration cap must be positive");
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(seed) = cli_overrides.seed {
            self.generator.seed = seed;
        }
        if let Some(timeout_ms) = cli_overrides.timeout_ms {
            self.solver.timeout_ms = timeout_ms;
        }
        if let Some(preset) = cli_overrides.preset {
            self.generator.preset = preset;
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub seed: Option<u64>,
    pub timeout_ms: Option<u64>,
    pub preset: Option<SizePreset>,
    pub format: Option<OutputFormat>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_yaml_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config/default.yaml");

        let mut settings = Settings::default();
        settings.generator.seed = 7;
        settings.solver.timeout_ms = 1500;
        settings.to_file(&path).unwrap();

        let loaded = Settings::from_file(&path).unwrap();
        assert_eq!(loaded.generator.seed, 7);
        assert_eq!(loaded.solver.timeout_ms, 1500);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut settings = Settings::default();
        settings.bench.repetitions = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_cli_overrides_take_precedence() {
        let mut settings = Settings::default();
        let overrides = CliOverrides {
            seed: Some(9),
            timeout_ms: Some(250),
            preset: Some(SizePreset::Large),
            format: Some(OutputFormat::Json),
        };
        settings.merge_with_cli(&overrides);

        assert_eq!(settings.generator.seed, 9);
        assert_eq!(settings.solver.timeout_ms, 250);
        assert_eq!(settings.generator.preset, SizePreset::Large);
        assert_eq!(settings.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_zero_timeout_means_unlimited_budget() {
        let mut config = SolverConfig::default();
        config.timeout_ms = 0;
        assert!(config.budget().remaining().is_none());
    }
}
