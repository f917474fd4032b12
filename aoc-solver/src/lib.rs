//! Advent of Code Solver Library
//!
//! A small framework for writing puzzle solvers that parse their input once and
//! answer each part from the parsed data.
//!
//! # Overview
//!
//! - [`AocParser`] turns the raw puzzle text into `SharedData`
//! - [`PartSolver<N>`] answers part `N` from that data
//! - [`Solver`] ties the parts together; `#[derive(AocSolver)]` writes it for you
//! - [`SolverInstance`] / [`DynSolver`] run a parsed puzzle with timing
//! - [`SolverRegistryBuilder`] / [`SolverRegistry`] map dates to solvers, including
//!   solvers that registered themselves with `#[derive(AutoRegisterSolver)]`
//!
//! # Quick Example
//!
//! ```
//! use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, SolverRegistryBuilder};
//!
//! #[derive(AocSolver)]
//! #[aoc_solver(max_parts = 2)]
//! struct Calories;
//!
//! impl AocParser for Calories {
//!     type SharedData<'a> = Vec<u32>;
//!
//!     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
//!         input
//!             .split("\n\n")
//!             .map(|elf| {
//!                 elf.lines()
//!                     .map(|l| l.trim().parse::<u32>())
//!                     .sum::<Result<u32, _>>()
//!                     .map_err(|e| ParseError::InvalidFormat(e.to_string()))
//!             })
//!             .collect()
//!     }
//! }
//!
//! impl PartSolver<1> for Calories {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().max().copied().unwrap_or(0).to_string())
//!     }
//! }
//!
//! impl PartSolver<2> for Calories {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         shared.sort_unstable_by(|a, b| b.cmp(a));
//!         Ok(shared.iter().take(3).sum::<u32>().to_string())
//!     }
//! }
//!
//! let registry = SolverRegistryBuilder::new()
//!     .register_solver::<Calories>(2022, 1)
//!     .unwrap()
//!     .build();
//!
//! let mut solver = registry.create_solver(2022, 1, "1\n2\n\n4\n\n3").unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "4");
//! assert_eq!(solver.solve(2).unwrap().answer, "10");
//! ```

mod error;
mod instance;
mod registry;
mod solver;

pub use error::{ParseError, RegistrationError, SolveError, SolverError};
pub use instance::{DynSolver, SolveResult, SolverInstance, Span};
pub use registry::{
    FactoryInfo, RegisterableSolver, SolverFactory, SolverPlugin, SolverRegistry,
    SolverRegistryBuilder,
};
pub use solver::{AocParser, PartSolver, Solver, SolverExt};

// The derive macros expand to paths under `::aoc_solver`, including `inventory::submit!`.
pub use inventory;

pub use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
