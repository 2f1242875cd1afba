//! Configuration management for the solver lab

pub mod settings;

pub use settings::{
    BenchConfig, CliOverrides, GeneratorConfig, OutputConfig, OutputFormat, Settings,
    SolverConfig,
};
