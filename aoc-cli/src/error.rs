//! Error types for the CLI

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use thiserror_ext::Arc as ArcDerive;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid flag combination or value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Explicit `--input` could not be read
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Registration error
    #[error("Registration error: {0}")]
    Registration(#[from] aoc_solver::RegistrationError),

    /// Executor error (wraps Arc for cheap cloning)
    #[error("{0}")]
    Executor(#[from] ArcExecutorError),

    /// Some solvers ran but did not produce an answer
    #[error("{failed} of {total} part(s) failed")]
    SolversFailed { failed: usize, total: usize },
}

/// Executor-specific errors
#[derive(Error, Debug, ArcDerive)]
#[thiserror_ext(newtype(name = ArcExecutorError))]
pub enum ExecutorError {
    /// Puzzle input unavailable for a day
    #[error("No input for {year}/{day:02}: {source}")]
    Input {
        year: u16,
        day: u8,
        #[source]
        source: InputError,
    },

    /// Parsing or solving failed
    #[error("{0}")]
    Solver(#[from] aoc_solver::SolverError),

    /// Result receiver hung up
    #[error("Channel send error")]
    ChannelSend,

    /// Thread pool creation failed
    #[error("Thread pool creation failed: {0}")]
    ThreadPool(String),

    /// Multiple errors collected during parallel execution
    #[error("Multiple errors occurred ({} total)", .0.len())]
    Multiple(Vec<ArcExecutorError>),
}

impl ArcExecutorError {
    /// Merges two errors into one `Multiple`, flattening nested ones.
    pub fn combine(first: ArcExecutorError, second: ArcExecutorError) -> ArcExecutorError {
        let mut errors = Vec::new();
        for err in [first, second] {
            match err.inner() {
                ExecutorError::Multiple(inner) => errors.extend(inner.iter().cloned()),
                _ => errors.push(err),
            }
        }
        ExecutorError::Multiple(errors).into()
    }

    pub fn combine_opt(
        existing: Option<ArcExecutorError>,
        new: ArcExecutorError,
    ) -> ArcExecutorError {
        match existing {
            Some(e) => Self::combine(e, new),
            None => new,
        }
    }
}

/// Failures while loading puzzle input
#[derive(Error, Debug)]
pub enum InputError {
    /// No input file for the day
    #[error("{} does not exist", path.display())]
    Missing { path: PathBuf },

    /// Input file exists but could not be read
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Standard input could not be read
    #[error("failed to read standard input: {0}")]
    Stdin(#[source] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel_error() -> ArcExecutorError {
        ExecutorError::ChannelSend.into()
    }

    fn count(err: &ArcExecutorError) -> usize {
        match err.inner() {
            ExecutorError::Multiple(v) => v.len(),
            _ => 1,
        }
    }

    #[test]
    fn test_combine_flattens() {
        let pair = ArcExecutorError::combine(channel_error(), channel_error());
        assert_eq!(count(&pair), 2);

        let three = ArcExecutorError::combine(pair.clone(), channel_error());
        assert_eq!(count(&three), 3);

        let four = ArcExecutorError::combine(channel_error(), three);
        assert_eq!(count(&four), 4);

        let five = ArcExecutorError::combine(pair.clone(), ArcExecutorError::combine_opt(None, pair));
        assert_eq!(count(&five), 4);
        assert_eq!(five.to_string(), "Multiple errors occurred (4 total)");
    }

    #[test]
    fn test_input_error_mentions_day() {
        let err: ArcExecutorError = ExecutorError::Input {
            year: 2023,
            day: 7,
            source: InputError::Missing {
                path: PathBuf::from("inputs/2023_day07.txt"),
            },
        }
        .into();
        assert_eq!(
            err.to_string(),
            "No input for 2023/07: inputs/2023_day07.txt does not exist"
        );
    }
}
