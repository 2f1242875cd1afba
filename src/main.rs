//! Main CLI application for the NP-Hard Lab solvers

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use np_hard_lab::{
    config::{CliOverrides, OutputFormat, Settings},
    generate::{self, SizePreset},
    report::{ColorOutput, ResultFormatter},
    sat::{solve_expression, BoolExpr},
    solve::{verify_witness, Algorithm},
    ProblemInstance, ProblemKind,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "np_hard_lab")]
#[command(about = "Brute-force and optimized solvers for classic NP-complete problems")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an instance and run one or all applicable solvers on it
    Solve {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Problem kind: sat, subset-sum, or tsp
        #[arg(short, long, default_value = "sat")]
        kind: ProblemKind,

        /// Instance size preset (overrides config)
        #[arg(short, long)]
        preset: Option<SizePreset>,

        /// Generator seed (overrides config)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Run only this algorithm instead of every applicable one
        #[arg(short, long)]
        algorithm: Option<Algorithm>,

        /// Solve a boolean expression (e.g. "(x1 | x2) & !x3") instead of a
        /// generated instance; implies the SAT brute-force solver
        #[arg(short, long)]
        formula: Option<String>,

        /// Per-call timeout in milliseconds, 0 for unlimited (overrides config)
        #[arg(short, long)]
        timeout_ms: Option<u64>,

        /// Emit results as JSON
        #[arg(long)]
        json: bool,

        /// Show work counters for each solver
        #[arg(short, long)]
        verbose: bool,
    },

    /// Generate a problem instance and print it as JSON
    Generate {
        /// Problem kind: sat, subset-sum, or tsp
        #[arg(short, long, default_value = "sat")]
        kind: ProblemKind,

        /// Instance size preset
        #[arg(short, long, default_value = "small")]
        preset: SizePreset,

        /// Generator seed
        #[arg(short, long, default_value_t = 42)]
        seed: u64,

        /// Plant a known solution and record it in the metadata
        #[arg(long)]
        solvable: bool,
    },

    /// Run the brute-force vs optimized benchmark suite
    Bench {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Generator seed (overrides config)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Per-call timeout in milliseconds (overrides config)
        #[arg(short, long)]
        timeout_ms: Option<u64>,
    },

    /// Create the default configuration file
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            config,
            kind,
            preset,
            seed,
            algorithm,
            formula,
            timeout_ms,
            json,
            verbose,
        } => solve_command(
            config, kind, preset, seed, algorithm, formula, timeout_ms, json, verbose,
        ),
        Commands::Generate {
            kind,
            preset,
            seed,
            solvable,
        } => generate_command(kind, preset, seed, solvable),
        Commands::Bench {
            config,
            seed,
            timeout_ms,
        } => bench_command(config, seed, timeout_ms),
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        Ok(Settings::default())
    }
}

fn solve_command(
    config_path: PathBuf,
    kind: ProblemKind,
    preset: Option<SizePreset>,
    seed: Option<u64>,
    algorithm: Option<Algorithm>,
    formula: Option<String>,
    timeout_ms: Option<u64>,
    json: bool,
    verbose: bool,
) -> Result<()> {
    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&CliOverrides {
        seed,
        timeout_ms,
        preset,
        format: json.then_some(OutputFormat::Json),
    });
    settings.validate().context("Configuration validation failed")?;

    // Expression input short-circuits generation: parse, solve, report.
    if let Some(ref expression) = formula {
        let expr = BoolExpr::parse(expression)
            .with_context(|| format!("Failed to parse boolean expression {expression:?}"))?;
        let result = solve_expression(&expr, &settings.solver.budget())?;

        if settings.output.format == OutputFormat::Json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("{}", ResultFormatter::format_result(&result));
        }
        return Ok(());
    }

    let instance = generate_instance(kind, settings.generator.preset, settings.generator.seed)?;
    println!(
        "{}",
        ColorOutput::info(&format!(
            "Solving a {kind} instance of size {} (seed {})",
            instance.size, settings.generator.seed
        ))
    );

    let algorithms: Vec<Algorithm> = match algorithm {
        Some(algorithm) => vec![algorithm],
        None => Algorithm::for_kind(kind).to_vec(),
    };

    for algorithm in algorithms {
        if algorithm.kind() != kind {
            anyhow::bail!("Algorithm '{algorithm}' does not solve {kind} instances");
        }

        let result = np_hard_lab::solve_instance(algorithm, &instance, &settings)
            .with_context(|| format!("Solver '{algorithm}' failed"))?;

        if settings.output.format == OutputFormat::Json {
            println!("{}", serde_json::to_string_pretty(&result)?);
            continue;
        }

        if verbose {
            print!("{}", ResultFormatter::format_result_detailed(&result));
        } else {
            println!("[{}] {}", result.algorithm_name, ResultFormatter::format_result(&result));
        }

        if let Some(ref witness) = result.witness {
            if result.solved && !verify_witness(&instance, witness) {
                println!(
                    "{}",
                    ColorOutput::error("Witness failed independent verification!")
                );
            }
        }
    }

    Ok(())
}

fn generate_command(
    kind: ProblemKind,
    preset: SizePreset,
    seed: u64,
    solvable: bool,
) -> Result<()> {
    let instance = if solvable {
        generate_solvable_instance(kind, preset, seed)?
    } else {
        generate_instance(kind, preset, seed)?
    };
    println!("{}", serde_json::to_string_pretty(&instance)?);
    Ok(())
}

fn bench_command(config_path: PathBuf, seed: Option<u64>, timeout_ms: Option<u64>) -> Result<()> {
    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&CliOverrides {
        seed,
        timeout_ms,
        preset: None,
        format: None,
    });
    settings.validate().context("Configuration validation failed")?;

    println!(
        "{}",
        ColorOutput::info("Running brute-force vs optimized benchmark suite...")
    );

    let runner = np_hard_lab::bench::BenchmarkRunner::new(settings.clone());
    let records = runner.run_suite().context("Benchmark suite failed")?;

    match settings.output.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
        OutputFormat::Text => print!("{}", ResultFormatter::format_bench_table(&records)),
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    let config_dir = directory.join("config");
    std::fs::create_dir_all(&config_dir)
        .with_context(|| format!("Failed to create directory {}", config_dir.display()))?;

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    println!("{}", ColorOutput::success("Setup complete!"));
    println!("Try: cargo run -- solve --kind sat --preset small");
    Ok(())
}

fn generate_instance(
    kind: ProblemKind,
    preset: SizePreset,
    seed: u64,
) -> Result<ProblemInstance> {
    match kind {
        ProblemKind::Sat => {
            let (num_variables, num_clauses) = preset.sat_params();
            generate::random_3sat(num_variables, num_clauses, seed)
        }
        ProblemKind::SubsetSum => {
            let (set_size, max_value) = preset.subset_sum_params();
            generate::random_subset_sum(set_size, max_value, None, seed)
        }
        ProblemKind::Tsp => {
            let (num_cities, grid_size) = preset.tsp_params();
            generate::euclidean_tsp(num_cities, grid_size, seed)
        }
    }
}

fn generate_solvable_instance(
    kind: ProblemKind,
    preset: SizePreset,
    seed: u64,
) -> Result<ProblemInstance> {
    match kind {
        ProblemKind::Sat => {
            let (num_variables, num_clauses) = preset.sat_params();
            generate::satisfiable_3sat(num_variables, num_clauses, seed)
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

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "np_hard_lab",
            "solve",
            "--kind",
            "subset-sum",
            "--preset",
            "medium",
            "--seed",
            "7",
        ]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_cli_rejects_unknown_kind() {
        let cli = Cli::try_parse_from(["np_hard_lab", "solve", "--kind", "clique"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        setup_command(temp_dir.path().to_path_buf(), false).unwrap();
        assert!(temp_dir.path().join("config/default.yaml").exists());
    }

    #[test]
    fn test_solve_command_with_expression() {
        let temp_dir = tempdir().unwrap();
        let config = temp_dir.path().join("missing.yaml");
        let result = solve_command(
            config,
            ProblemKind::Sat,
            None,
            None,
            None,
            Some("(x1 | x2) & !x1".to_string()),
            Some(0),
            false,
            false,
        );
        assert!(result.is_ok());
    }
}
