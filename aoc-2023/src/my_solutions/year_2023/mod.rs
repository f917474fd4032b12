//! 2023 puzzles that lean on the ring queues and the grid reader.

pub mod day_10;
pub mod day_14;
pub mod day_16;
pub mod day_17;
pub mod day_18;
pub mod day_20;
pub mod day_21;
