//! Parser and solver traits

use crate::error::{ParseError, SolveError};

/// Turns puzzle text into the data every part works on.
///
/// `SharedData` is generic over the input lifetime so a parser may either own what it
/// builds (a grid, a module table) or borrow slices of the input.
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, ParseError};
///
/// struct Depths;
///
/// impl AocParser for Depths {
///     type SharedData<'a> = Vec<u32>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .lines()
///             .map(|l| l.trim().parse().map_err(|_| ParseError::InvalidFormat(l.to_string())))
///             .collect()
///     }
/// }
///
/// assert_eq!(Depths::parse("3\n1\n").unwrap(), vec![3, 1]);
/// ```
pub trait AocParser {
    type SharedData<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError>;
}

/// Answers part `N` of a puzzle.
///
/// Parts receive the shared data mutably so the first part to run can cache
/// work (a traced loop, a BFS result) for the parts after it.
pub trait PartSolver<const N: u8>: AocParser {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError>;
}

/// A complete puzzle solver with a fixed number of parts.
///
/// Usually generated by `#[derive(AocSolver)]`, which dispatches `solve_part`
/// to the matching [`PartSolver`] impl.
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, ParseError, SolveError, Solver};
///
/// struct Depths;
///
/// impl AocParser for Depths {
///     type SharedData<'a> = Vec<u32>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .lines()
///             .map(|l| l.trim().parse().map_err(|_| ParseError::InvalidFormat(l.to_string())))
///             .collect()
///     }
/// }
///
/// impl Solver for Depths {
///     const PARTS: u8 = 2;
///
///     fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
///         match part {
///             1 => Ok(shared.iter().sum::<u32>().to_string()),
///             2 => Ok(shared.iter().max().copied().unwrap_or(0).to_string()),
///             _ => Err(SolveError::PartNotImplemented(part)),
///         }
///     }
/// }
///
/// let mut shared = Depths::parse("3\n1\n4").unwrap();
/// assert_eq!(Depths::solve_part(&mut shared, 1).unwrap(), "8");
/// assert_eq!(Depths::solve_part(&mut shared, 2).unwrap(), "4");
/// ```
pub trait Solver: AocParser {
    /// Number of parts this solver answers, numbered from 1
    const PARTS: u8;

    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError>;
}

/// Range-checked entry point used by solver instances.
pub trait SolverExt: Solver {
    /// Rejects part 0 and parts above `PARTS` with [`SolveError::PartOutOfRange`]
    /// before delegating to [`Solver::solve_part`].
    fn solve_part_checked_range(
        shared: &mut Self::SharedData<'_>,
        part: u8,
    ) -> Result<String, SolveError> {
        if (1..=Self::PARTS).contains(&part) {
            Self::solve_part(shared, part)
        } else {
            Err(SolveError::PartOutOfRange(part))
        }
    }
}

impl<T: Solver + ?Sized> SolverExt for T {}
