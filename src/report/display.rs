//! Display and output formatting utilities

use crate::bench::BenchmarkRecord;
use crate::solve::{SolverResult, Witness};
use std::fmt::Write as _;

/// Format solver results for console output
pub struct ResultFormatter;

impl ResultFormatter {
    /// One-line verdict in the classic lab register, witness included.
    pub fn format_result(result: &SolverResult) -> String {
        let mut output = String::new();

        match (&result.witness, result.solved, result.timed_out) {
            (_, _, true) => {
                output.push_str("TIMED OUT before the search completed");
            }
            (Some(Witness::Assignment(assignment)), true, _) => {
                let rendered = assignment
                    .iter()
                    .enumerate()
                    .map(|(i, value)| format!("x{}={}", i + 1, value))
                    .collect::<Vec<_>>()
                    .join(", ");
                let _ = write!(
                    output,
                    "SATISFIABLE: {rendered} (tried {} assignments)",
                    result.counter("assignments_tried")
                );
            }
            (None, false, _) if result.counters.contains_key("assignments_tried") => {
                let _ = write!(
                    output,
                    "UNSATISFIABLE (tried {} assignments)",
                    result.counter("assignments_tried")
                );
            }
            (Some(Witness::Subset { values, .. }), true, _) => {
                let rendered = values
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                let sum: i64 = values.iter().sum();
                let _ = write!(output, "SOLUTION FOUND: {{{rendered}}} = {sum}");
            }
            (Some(Witness::Tour { order, distance }), _, _) => {
                let mut route: Vec<String> = order.iter().map(|c| c.to_string()).collect();
                if let Some(first) = order.first() {
                    route.push(first.to_string());
                }
                let _ = write!(
                    output,
                    "TOUR FOUND: {} (distance: {distance:.2})",
                    route.join(" -> ")
                );
            }
            _ => {
                output.push_str("NO SOLUTION");
            }
        }

        output
    }

    /// Multi-line result block with algorithm, timing, and counters.
    pub fn format_result_detailed(result: &SolverResult) -> String {
        let mut output = String::new();

        let _ = writeln!(output, "=== {} ===", result.algorithm_name);
        let _ = writeln!(output, "{}", Self::format_result(result));
        let _ = writeln!(
            output,
            "Solve time: {:.3}s",
            result.elapsed.as_secs_f64()
        );
        output.push_str(&Self::format_counters(result));

        output
    }

    /// Counter lines, stable key order.
    pub fn format_counters(result: &SolverResult) -> String {
        let mut output = String::new();
        for (key, value) in &result.counters {
            let _ = writeln!(output, "  {key}: {value}");
        }
        output
    }

    /// Benchmark records as a comparison table.
    pub fn format_bench_table(records: &[BenchmarkRecord]) -> String {
        let mut output = String::new();

        output.push_str("Benchmark Summary:\n");
        output.push_str(
            "Problem    | Preset       | Algorithm                           | Avg(ms)  | Min(ms)  | Max(ms)  | Status\n",
        );
        output.push_str(
            "-----------|--------------|-------------------------------------|----------|----------|----------|--------\n",
        );

        for record in records {
            let status = if record.timed_out {
                "timeout"
            } else if record.solved {
                "solved"
            } else {
                "no sol."
            };

            let _ = writeln!(
                output,
                "{:10} | {:12} | {:35} | {:8.3} | {:8.3} | {:8.3} | {}",
                record.kind.to_string(),
                record.preset.to_string(),
                record.algorithm_name,
                record.average_time.as_secs_f64() * 1000.0,
                record.min_time.as_secs_f64() * 1000.0,
                record.max_time.as_secs_f64() * 1000.0,
                status
            );
        }

        output
    }
}

/// ANSI color helpers for CLI status lines
pub struct ColorOutput;

impl ColorOutput {
    pub fn info(message: &str) -> String {
        format!("\x1b[36m{message}\x1b[0m")
    }

    pub fn success(message: &str) -> String {
        format!("\x1b[32m{message}\x1b[0m")
    }

    pub fn warning(message: &str) -> String {
        format!("\x1b[33m{message}\x1b[0m")
    }

    pub fn error(message: &str) -> String {
        format!("\x1b[31m{message}\x1b[0m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::time::Duration;

    fn result_with(
        solved: bool,
        witness: Option<Witness>,
        counters: Vec<(&str, u64)>,
        timed_out: bool,
    ) -> SolverResult {
        SolverResult {
            algorithm_name: "Test Solver".to_string(),
            solved,
            witness,
            counters: counters
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            elapsed: Duration::from_millis(5),
            timed_out,
        }
    }

    #[test]
    fn test_satisfiable_line() {
        let result = result_with(
            true,
            Some(Witness::Assignment(vec![false, true])),
            vec![("assignments_tried", 3)],
            false,
        );
        let line = ResultFormatter::format_result(&result);
        assert_eq!(line, "SATISFIABLE: x1=false, x2=true (tried 3 assignments)");
    }

    #[test]
    fn test_unsatisfiable_line() {
        let result = result_with(false, None, vec![("assignments_tried", 2)], false);
        assert_eq!(
            ResultFormatter::format_result(&result),
            "UNSATISFIABLE (tried 2 assignments)"
        );
    }

    #[test]
    fn test_subset_line_shows_sum() {
        let result = result_with(
            true,
            Some(Witness::Subset {
                values: vec![4, 5],
                indices: vec![2, 4],
            }),
            vec![("subsets_tried", 7)],
            false,
        );
        assert_eq!(
            ResultFormatter::format_result(&result),
            "SOLUTION FOUND: {4, 5} = 9"
        );
    }

    #[test]
    fn test_tour_line_closes_the_loop() {
        let result = result_with(
            true,
            Some(Witness::Tour {
                order: vec![0, 2, 1],
                distance: 12.5,
            }),
            vec![("tours_tried", 2)],
            false,
        );
        assert_eq!(
            ResultFormatter::format_result(&result),
            "TOUR FOUND: 0 -> 2 -> 1 -> 0 (distance: 12.50)"
        );
    }

    #[test]
    fn test_timeout_line() {
        let result = result_with(false, None, vec![("subsets_tried", 512)], true);
        assert!(ResultFormatter::format_result(&result).contains("TIMED OUT"));
    }

    #[test]
    fn test_counters_render_in_key_order() {
        let result = result_with(
            false,
            None,
            vec![("unit_propagations", 4), ("assignments_tried", 9)],
            false,
        );
        let rendered = ResultFormatter::format_counters(&result);
        let first = rendered.find("assignments_tried").unwrap();
        let second = rendered.find("unit_propagations").unwrap();
        assert!(first < second);
    }
}
