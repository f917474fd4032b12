use std::collections::HashMap;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use log::debug;

use crate::utils::grid::{Dir, Grid, Point};

const SPIN_CYCLES: usize = 1_000_000_000;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 14, tags = ["grid", "cycle-detection"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Grid;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let grid = Grid::parse(input)?;
        if let Some(p) = grid.find(|&c| !matches!(c, b'O' | b'#' | b'.')) {
            return Err(ParseError::InvalidFormat(format!(
                "unexpected tile '{}' at {}",
                grid[p] as char, p
            )));
        }
        Ok(grid)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut grid = shared.clone();
        tilt(&mut grid, Dir::North);
        Ok(north_load(&grid).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(load_after_cycles(shared.clone(), SPIN_CYCLES).to_string())
    }
}

/// Rolls every round rock as far as it goes towards `dir`.
fn tilt(grid: &mut Grid, dir: Dir) {
    let (lines, len) = if dir.is_vertical() {
        (grid.width(), grid.height())
    } else {
        (grid.height(), grid.width())
    };

    for line in 0..lines {
        // `i` counts from the edge the rocks roll towards.
        let at = |i: usize| match dir {
            Dir::North => Point::new(i, line),
            Dir::South => Point::new(len - 1 - i, line),
            Dir::West => Point::new(line, i),
            Dir::East => Point::new(line, len - 1 - i),
        };
        let mut free = 0;
        for i in 0..len {
            let p = at(i);
            match grid[p] {
                b'#' => free = i + 1,
                b'O' => {
                    grid[p] = b'.';
                    grid[at(free)] = b'O';
                    free += 1;
                }
                _ => {}
            }
        }
    }
}

fn spin_cycle(grid: &mut Grid) {
    for dir in [Dir::North, Dir::West, Dir::South, Dir::East] {
        tilt(grid, dir);
    }
}

fn north_load(grid: &Grid) -> usize {
    grid.points()
        .filter(|&p| grid[p] == b'O')
        .map(|p| grid.height() - p.row)
        .sum()
}

/// Runs spin cycles until a state repeats, then jumps ahead by whole periods.
fn load_after_cycles(mut grid: Grid, cycles: usize) -> usize {
    let mut seen: HashMap<Vec<u8>, usize> = HashMap::new();
    let mut loads = vec![north_load(&grid)];
    seen.insert(grid.cells().to_vec(), 0);

    for done in 1..=cycles {
        spin_cycle(&mut grid);
        loads.push(north_load(&grid));
        if let Some(&begin) = seen.get(grid.cells()) {
            let period = done - begin;
            debug!("day 14 cycle found: begin {} period {}", begin, period);
            return loads[begin + (cycles - begin) % period];
        }
        seen.insert(grid.cells().to_vec(), done);
    }
    loads[cycles]
}
