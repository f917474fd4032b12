//! Error types shared by parsers, solvers and the registry

use thiserror::Error;

/// Raised while turning raw puzzle text into a solver's shared data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The text does not follow the puzzle's format
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    /// Something the puzzle requires (a start tile, a module) is absent
    #[error("Missing data: {0}")]
    MissingData(String),
}

/// Raised while answering a single part
#[derive(Debug, Error)]
pub enum SolveError {
    /// The solver declares the part but has no implementation for it
    #[error("Part {0} is not implemented")]
    PartNotImplemented(u8),
    /// The part is 0 or larger than the solver's `PARTS`
    #[error("Part {0} is out of range")]
    PartOutOfRange(u8),
    /// The input parsed but has no answer (for example an unreachable goal)
    #[error("Solve failed: {0}")]
    SolveFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors surfaced when creating or running a solver through the registry
#[derive(Debug, Error)]
pub enum SolverError {
    /// No solver was registered for the date
    #[error("Solver not found for year {0} day {1}")]
    NotFound(u16, u8),
    /// The date is outside the supported years or days
    #[error("Invalid year/day: {0}/{1}")]
    InvalidYearDay(u16, u8),
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("Solve error: {0}")]
    Solve(#[from] SolveError),
}

/// Errors raised while building a registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// A factory already exists for the date
    #[error("Duplicate solver registration for year {0} day {1}")]
    DuplicateSolver(u16, u8),
    /// The date is outside the supported years or days
    #[error("Invalid year/day: {0}/{1}")]
    InvalidYearDay(u16, u8),
}
