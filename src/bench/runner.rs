//! Benchmark runner aggregating timing statistics per solver variant

use super::watchdog::run_with_watchdog;
use crate::config::Settings;
use crate::error::SolverError;
use crate::generate::{self, SizePreset};
use crate::problem::{ProblemInstance, ProblemKind};
use crate::solve::{Algorithm, SolverResult};
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// Aggregated timings for one solver on one instance.
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkRecord {
    pub algorithm_name: String,
    pub kind: ProblemKind,
    pub preset: SizePreset,
    pub size: usize,
    pub run_times: Vec<Duration>,
    pub average_time: Duration,
    pub min_time: Duration,
    pub max_time: Duration,
    pub solved: bool,
    pub timed_out: bool,
    /// Counters from the last completed run; deterministic solvers repeat
    /// the same work each run.
    pub counters: BTreeMap<String, u64>,
}

impl BenchmarkRecord {
    fn new(algorithm_name: String, kind: ProblemKind, preset: SizePreset, size: usize) -> Self {
        Self {
            algorithm_name,
            kind,
            preset,
            size,
            run_times: Vec::new(),
            average_time: Duration::ZERO,
            min_time: Duration::MAX,
            max_time: Duration::ZERO,
            solved: false,
            timed_out: false,
            counters: BTreeMap::new(),
        }
    }

    fn add_run(&mut self, result: &SolverResult) {
        let duration = result.elapsed;
        self.run_times.push(duration);
        self.solved = result.solved;
        self.timed_out = result.timed_out;
        self.counters = result.counters.clone();

        if duration < self.min_time {
            self.min_time = duration;
        }
        if duration > self.max_time {
            self.max_time = duration;
        }

        let total: Duration = self.run_times.iter().sum();
        self.average_time = total / self.run_times.len() as u32;
    }

    fn add_watchdog_timeout(&mut self, limit: Duration) {
        self.run_times.push(limit);
        self.timed_out = true;
        self.solved = false;
        if limit < self.min_time {
            self.min_time = limit;
        }
        if limit > self.max_time {
            self.max_time = limit;
        }
        let total: Duration = self.run_times.iter().sum();
        self.average_time = total / self.run_times.len() as u32;
    }
}

/// Runs every applicable solver over generated instances and collects
/// before/after comparison records.
pub struct BenchmarkRunner {
    settings: Settings,
}

impl BenchmarkRunner {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Run the configured suite: for each problem kind and size preset, one
    /// seeded instance solved by every applicable algorithm.
    pub fn run_suite(&self) -> Result<Vec<BenchmarkRecord>> {
        let mut records = Vec::new();

        for &kind in &self.settings.bench.problems {
            for &preset in &self.settings.bench.presets {
                let instance = self
                    .generate_instance(kind, preset)
                    .with_context(|| format!("Failed to generate {kind} instance ({preset})"))?;

                for &algorithm in Algorithm::for_kind(kind) {
                    let record = self.run_single(algorithm, &instance, preset)?;
                    records.push(record);
                }
            }
        }

        Ok(records)
    }

    /// Benchmark one algorithm against one instance.
    pub fn run_single(
        &self,
        algorithm: Algorithm,
        instance: &ProblemInstance,
        preset: SizePreset,
    ) -> Result<BenchmarkRecord> {
        let config = self.settings.solver.clone();
        let name = algorithm.build(&config).algorithm_name().to_string();
        let mut record = BenchmarkRecord::new(name, instance.kind(), preset, instance.size);

        // The watchdog backstop sits above the cooperative budget so a
        // solver stuck between budget checks cannot wedge the suite.
        let watchdog_limit = watchdog_limit(self.settings.solver.timeout_ms);

        for _ in 0..self.settings.bench.repetitions {
            let run_config = config.clone();
            let run_instance = instance.clone();
            let outcome: Option<Result<SolverResult, SolverError>> = run_with_watchdog(
                move || {
                    algorithm
                        .build(&run_config)
                        .solve(&run_instance, &run_config.budget())
                },
                watchdog_limit,
            );

            match outcome {
                Some(result) => {
                    let result = result.with_context(|| {
                        format!("Solver '{}' rejected the instance", record.algorithm_name)
                    })?;
                    record.add_run(&result);
                }
                None => record.add_watchdog_timeout(watchdog_limit),
            }
        }

        Ok(record)
    }

    fn generate_instance(&self, kind: ProblemKind, preset: SizePreset) -> Result<ProblemInstance> {
        let seed = self.settings.generator.seed;
        match kind {
            ProblemKind::Sat => {
                let (num_variables, num_clauses) = preset.sat_params();
                generate::random_3sat(num_variables, num_clauses, seed)
            }
            ProblemKind::SubsetSum => {
                let (set_size, max_value) = preset.subset_sum_params();
                generate::solvable_subset_sum(set_size, max_value, seed)
            }
            ProblemKind::Tsp => {
                let (num_cities, grid_size) = preset.tsp_params();
                generate::euclidean_tsp(num_cities, grid_size, seed)
            }
        }
    }
}

/// Double the cooperative budget, with a floor for very small budgets, so
/// the watchdog only fires when a solver misses its own deadline badly.
fn watchdog_limit(timeout_ms: u64) -> Duration {
    if timeout_ms == 0 {
        // Unlimited budget: the watchdog still bounds a single run.
        Duration::from_secs(3600)
    } else {
        Duration::from_millis((timeout_ms * 2).max(100))
    }
}
