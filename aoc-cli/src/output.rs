//! Output formatting for solver results

use crate::executor::SolverResult;
use chrono::{DateTime, TimeDelta, Utc};

/// Prints results as they are released and the closing summary
pub struct OutputFormatter {
    quiet: bool,
    started: DateTime<Utc>,
}

impl OutputFormatter {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            started: Utc::now(),
        }
    }

    /// Answers go to stdout, failures to stderr.
    pub fn print_result(&self, result: &SolverResult) {
        match &result.answer {
            Ok(answer) if self.quiet => println!("{}", answer),
            Ok(answer) => println!("{}", format_answer_line(result, answer)),
            Err(e) if self.quiet => eprintln!("Error: {}", e),
            Err(e) => eprintln!(
                "{}/{:02} Part {}: Error - {}",
                result.year, result.day, result.part, e
            ),
        }
    }

    pub fn print_summary(&self, results: &[SolverResult]) {
        if self.quiet {
            return;
        }
        let summary = Summary::of(results, Utc::now() - self.started);

        println!();
        println!("--- Summary ---");
        println!("Solvers: {} solved, {} failed", summary.solved, summary.failed);
        println!("Total parse time: {}", format_duration(summary.parse_time));
        println!("Total solve time: {}", format_duration(summary.solve_time));
        println!("Elapsed wall-clock time: {}", format_duration(summary.elapsed));
        if let Some(speedup) = summary.speedup() {
            println!("Speedup factor: {:.2}x", speedup);
        }
    }
}

/// Totals over the successful results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub solved: usize,
    pub failed: usize,
    pub parse_time: TimeDelta,
    pub solve_time: TimeDelta,
    pub elapsed: TimeDelta,
}

impl Summary {
    pub fn of(results: &[SolverResult], elapsed: TimeDelta) -> Self {
        let ok = || results.iter().filter(|r| r.answer.is_ok());
        let solved = ok().count();
        Self {
            solved,
            failed: results.len() - solved,
            parse_time: ok().filter_map(|r| r.parse_duration).sum(),
            solve_time: ok().map(|r| r.solve_duration).sum(),
            elapsed,
        }
    }

    /// Summed compute time over wall-clock time
    pub fn speedup(&self) -> Option<f64> {
        let elapsed = self.elapsed.num_microseconds().filter(|&us| us > 0)?;
        let compute = (self.parse_time + self.solve_time).num_microseconds()?;
        Some(compute as f64 / elapsed as f64)
    }
}

fn format_answer_line(result: &SolverResult, answer: &str) -> String {
    let parse_timing = result
        .parse_duration
        .map(|d| format!("parse: {}, ", format_duration(d)))
        .unwrap_or_default();
    format!(
        "{}/{:02} Part {}: {} ({}solve: {})",
        result.year,
        result.day,
        result.part,
        answer,
        parse_timing,
        format_duration(result.solve_duration)
    )
}

fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };

    if micros < 0 {
        return format!("-{}", format_duration(-d));
    }

    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExecutorError;

    fn solved(part: u8, parse_ms: i64, solve_ms: i64) -> SolverResult {
        SolverResult {
            year: 2023,
            day: 21,
            part,
            answer: Ok("3652".to_string()),
            parse_duration: Some(TimeDelta::milliseconds(parse_ms)),
            solve_duration: TimeDelta::milliseconds(solve_ms),
        }
    }

    #[test]
    fn test_format_duration_units() {
        assert_eq!(format_duration(TimeDelta::microseconds(999)), "999µs");
        assert_eq!(format_duration(TimeDelta::microseconds(1500)), "1.50ms");
        assert_eq!(format_duration(TimeDelta::milliseconds(2500)), "2.50s");
        assert_eq!(format_duration(TimeDelta::microseconds(-12)), "-12µs");
    }

    #[test]
    fn test_answer_line() {
        let result = solved(1, 1, 2);
        assert_eq!(
            format_answer_line(&result, "3652"),
            "2023/21 Part 1: 3652 (parse: 1.00ms, solve: 2.00ms)"
        );

        let result = SolverResult {
            parse_duration: None,
            ..solved(2, 0, 0)
        };
        assert_eq!(format_answer_line(&result, "x"), "2023/21 Part 2: x (solve: 0µs)");
    }

    #[test]
    fn test_summary_ignores_failures() {
        let failed = SolverResult {
            answer: Err(ExecutorError::ChannelSend.into()),
            ..solved(2, 500, 500)
        };
        let summary = Summary::of(&[solved(1, 10, 30), failed], TimeDelta::milliseconds(20));

        assert_eq!(summary.solved, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.parse_time, TimeDelta::milliseconds(10));
        assert_eq!(summary.solve_time, TimeDelta::milliseconds(30));
        assert_eq!(summary.speedup(), Some(2.0));
    }

    #[test]
    fn test_no_speedup_without_elapsed_time() {
        let summary = Summary::of(&[], TimeDelta::zero());
        assert_eq!(summary.speedup(), None);
    }
}
