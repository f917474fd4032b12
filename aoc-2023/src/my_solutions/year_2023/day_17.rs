use std::cmp::Reverse;
use std::collections::BinaryHeap;

use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use log::debug;

use crate::utils::grid::{Dir, Grid, Point};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 17, tags = ["grid", "dijkstra"])]
pub struct Solver;

impl AocParser for Solver {
    /// Heat loss per block, 1 to 9.
    type SharedData<'a> = Grid;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let grid = Grid::parse(input)?;
        if let Some(p) = grid.find(|c| !(b'1'..=b'9').contains(c)) {
            return Err(ParseError::InvalidFormat(format!(
                "expected heat loss digit 1-9 at {}, got '{}'",
                p, grid[p] as char
            )));
        }
        Ok(grid)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        min_heat_loss(shared, 1, 3).map(|loss| loss.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        min_heat_loss(shared, 4, 10).map(|loss| loss.to_string())
    }
}

/// Dijkstra from the top-left to the bottom-right block.
///
/// A node is a block plus the axis the crucible arrived on. Every edge is a run of
/// `min_run..=max_run` blocks straight ahead followed by a forced turn, so the run length
/// never has to be part of the state.
fn min_heat_loss(grid: &Grid, min_run: usize, max_run: usize) -> Result<u32, SolveError> {
    let target = Point::new(grid.height() - 1, grid.width() - 1);
    let mut best = Grid::filled(grid.height(), grid.width(), [u32::MAX; 2]);
    let mut heap = BinaryHeap::new();

    let start = Point::new(0, 0);
    for vertical in [false, true] {
        best[start][vertical as usize] = 0;
        heap.push(Reverse((0u32, start, vertical)));
    }

    while let Some(Reverse((loss, p, vertical))) = heap.pop() {
        if p == target {
            debug!("day 17 runs {}..={}: reached target with {}", min_run, max_run, loss);
            return Ok(loss);
        }
        if loss > best[p][vertical as usize] {
            continue;
        }

        let turns = if vertical {
            [Dir::East, Dir::West]
        } else {
            [Dir::North, Dir::South]
        };
        for dir in turns {
            let mut next = p;
            let mut next_loss = loss;
            for run in 1..=max_run {
                let Some(step) = grid.step(next, dir) else {
                    break;
                };
                next = step;
                next_loss += u32::from(grid[next] - b'0');
                if run < min_run {
                    continue;
                }
                let slot = &mut best[next][dir.is_vertical() as usize];
                if next_loss < *slot {
                    *slot = next_loss;
                    heap.push(Reverse((next_loss, next, dir.is_vertical())));
                }
            }
        }
    }

    Err(SolveError::SolveFailed(
        anyhow!("bottom-right block is unreachable with runs of {}..={}", min_run, max_run).into(),
    ))
}
