//! Benchmark harness comparing brute-force and optimized solver variants

pub mod runner;
pub mod watchdog;

pub use runner::{BenchmarkRecord, BenchmarkRunner};
pub use watchdog::run_with_watchdog;
