//! CLI argument parsing using clap

use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// Parallelization level for solver execution
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum ParallelizeBy {
    /// No parallelization; run every solver in (year, day, part) order
    Sequential,
    /// One task per year; days and parts run in order within it
    Year,
    /// One task per year/day; parts run in order (default)
    #[default]
    Day,
    /// One task per year/day/part; each part parses its own input
    Part,
}

/// Advent of Code 2023 solver runner
#[derive(Parser, Debug)]
#[command(name = "aoc", about = "Run Advent of Code solvers on local puzzle input", version)]
pub struct Args {
    /// Year to run
    #[arg(short, long, default_value_t = 2023)]
    pub year: u16,

    /// Day to run (runs all registered days if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=25))]
    pub day: Option<u8>,

    /// Part to run (runs all parts if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub part: Option<u8>,

    /// Tags to filter solvers (comma-separated, all must match)
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Read the puzzle input from FILE, or from standard input when FILE is `-`.
    /// Requires --day.
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Directory holding `{year}_day{day:02}.txt` input files
    #[arg(long, default_value = "inputs")]
    pub input_dir: PathBuf,

    /// Number of threads for parallel execution
    #[arg(long)]
    pub threads: Option<usize>,

    /// Parallelization level: sequential, year, day, or part
    #[arg(long, value_enum, default_value = "day")]
    pub parallelize_by: ParallelizeBy,

    /// Quiet mode - only output answers
    #[arg(short, long)]
    pub quiet: bool,

    /// Log more on stderr (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
