//! Parsed solver instances with timing

use crate::error::{ParseError, SolveError};
use crate::solver::{Solver, SolverExt};
use chrono::{DateTime, TimeDelta, Utc};

/// Wall-clock interval around one parse or solve call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Span {
    /// Runs `f` and returns its output with the interval it took.
    pub fn measure<R>(f: impl FnOnce() -> R) -> (R, Span) {
        let start = Utc::now();
        let out = f();
        (out, Span { start, end: Utc::now() })
    }

    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }
}

/// Answer to one part and when it was computed
#[derive(Debug, Clone)]
pub struct SolveResult {
    pub answer: String,
    pub span: Span,
}

impl SolveResult {
    pub fn duration(&self) -> TimeDelta {
        self.span.duration()
    }
}

/// Input parsed once for one year/day, ready to answer any of its parts
pub struct SolverInstance<'a, S: Solver> {
    date: (u16, u8),
    shared: S::SharedData<'a>,
    parsed: Span,
}

impl<'a, S: Solver> SolverInstance<'a, S> {
    /// Parses `input` with `S`, recording how long parsing took.
    pub fn new(year: u16, day: u8, input: &'a str) -> Result<Self, ParseError> {
        let (shared, parsed) = Span::measure(|| S::parse(input));
        Ok(Self {
            date: (year, day),
            shared: shared?,
            parsed,
        })
    }
}

/// Object-safe view of a [`SolverInstance`], used by the registry and the CLI.
///
/// ```
/// use aoc_solver::DynSolver;
///
/// fn report(solver: &mut dyn DynSolver) {
///     for part in 1..=solver.parts() {
///         match solver.solve(part) {
///             Ok(result) => println!("{}: {} in {}", part, result.answer, result.duration()),
///             Err(e) => eprintln!("{}: {}", part, e),
///         }
///     }
/// }
/// ```
pub trait DynSolver {
    /// Solves `part`, timing the call. Out-of-range parts fail without touching the data.
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError>;

    /// When the input was parsed
    fn parse_span(&self) -> Span;

    fn year(&self) -> u16;

    fn day(&self) -> u8;

    fn parts(&self) -> u8;

    fn parse_duration(&self) -> TimeDelta {
        self.parse_span().duration()
    }
}

impl<S: Solver> DynSolver for SolverInstance<'_, S> {
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError> {
        let shared = &mut self.shared;
        let (answer, span) = Span::measure(|| S::solve_part_checked_range(shared, part));
        answer.map(|answer| SolveResult { answer, span })
    }

    fn parse_span(&self) -> Span {
        self.parsed
    }

    fn year(&self) -> u16 {
        self.date.0
    }

    fn day(&self) -> u8 {
        self.date.1
    }

    fn parts(&self) -> u8 {
        S::PARTS
    }
}
