//! Configuration resolution from CLI args

use crate::cli::{Args, ParallelizeBy};
use crate::error::CliError;
use crate::inputs::InputSource;
use log::LevelFilter;
use std::path::{Path, PathBuf};

/// Resolved runtime configuration
#[derive(Debug)]
pub struct Config {
    pub year_filter: Option<u16>,
    pub day_filter: Option<u8>,
    pub part_filter: Option<u8>,
    /// Every tag must be present on a solver for it to run
    pub tags: Vec<String>,
    /// Explicit input for the single selected day
    pub input: Option<InputSource>,
    /// Directory of per-day input files, with `~` expanded
    pub input_dir: PathBuf,
    pub thread_count: usize,
    pub parallelize_by: ParallelizeBy,
    pub quiet: bool,
    /// Default log level; `RUST_LOG` still takes precedence
    pub log_level: LevelFilter,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self, CliError> {
        if args.input.is_some() && args.day.is_none() {
            return Err(CliError::Config(
                "--input feeds a single puzzle, so --day is required".to_string(),
            ));
        }

        let thread_count = match args.threads {
            Some(0) => return Err(CliError::Config("--threads must be at least 1".to_string())),
            Some(n) => n,
            None => num_cpus(),
        };

        Ok(Config {
            year_filter: Some(args.year),
            day_filter: args.day,
            part_filter: args.part,
            tags: args.tags,
            input: args.input.map(InputSource::from_arg),
            input_dir: expand_tilde(&args.input_dir),
            thread_count,
            parallelize_by: args.parallelize_by,
            quiet: args.quiet,
            log_level: log_level(args.verbose),
        })
    }
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Expand ~ to home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str()
        && (path_str.starts_with("~/") || path_str == "~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path_str.trim_start_matches('~').trim_start_matches('/'));
    }
    path.to_path_buf()
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn config(argv: &[&str]) -> Result<Config, CliError> {
        let args = Args::try_parse_from(std::iter::once("aoc").chain(argv.iter().copied()))
            .map_err(|e| CliError::Config(e.to_string()))?;
        Config::from_args(args)
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.year_filter, Some(2023));
        assert_eq!(config.day_filter, None);
        assert_eq!(config.input, None);
        assert_eq!(config.input_dir, PathBuf::from("inputs"));
        assert_eq!(config.parallelize_by, ParallelizeBy::Day);
        assert_eq!(config.log_level, LevelFilter::Warn);
        assert!(config.thread_count >= 1);
    }

    #[test]
    fn test_stdin_input_needs_day() {
        assert!(matches!(config(&["--input", "-"]), Err(CliError::Config(_))));

        let config = config(&["--input", "-", "--day", "21", "-q"]).unwrap();
        assert_eq!(config.input, Some(InputSource::Stdin));
        assert_eq!(config.day_filter, Some(21));
        assert!(config.quiet);
    }

    #[test]
    fn test_flags() {
        let config = config(&[
            "-y", "2022", "-p", "2", "--tags", "grid,bfs", "--threads", "3", "-vv",
            "--parallelize-by", "part",
        ])
        .unwrap();
        assert_eq!(config.year_filter, Some(2022));
        assert_eq!(config.part_filter, Some(2));
        assert_eq!(config.tags, vec!["grid", "bfs"]);
        assert_eq!(config.thread_count, 3);
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.parallelize_by, ParallelizeBy::Part);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(config(&["--threads", "0"]).is_err());
        assert!(config(&["--day", "26"]).is_err());
        assert!(config(&["--part", "3"]).is_err());
    }

    #[test]
    fn test_expand_tilde() {
        assert_eq!(expand_tilde(Path::new("inputs")), PathBuf::from("inputs"));
        assert_eq!(expand_tilde(Path::new("/tmp/in")), PathBuf::from("/tmp/in"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde(Path::new("~/aoc")), home.join("aoc"));
            assert_eq!(expand_tilde(Path::new("~")), home);
        }
    }
}
