//! Advent of Code 2023 solutions with automatic registration
//!
//! [`utils::ring_queue`] holds the growable ring queues the search-heavy days are built on,
//! and [`utils::grid`] the rectangular grid reader. Each solution under `my_solutions` uses the
//! `AutoRegisterSolver` derive macro, so linking this crate is enough for
//! `SolverRegistryBuilder::register_all_plugins` to find it.

pub mod utils;

#[cfg(feature = "my-solutions")]
pub mod my_solutions;
