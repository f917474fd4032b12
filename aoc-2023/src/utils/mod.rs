//! Data structures and input helpers shared by the solutions.

pub mod grid;
pub mod ring_queue;
