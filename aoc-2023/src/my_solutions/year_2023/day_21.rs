use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use log::debug;

use crate::utils::grid::{Grid, Point};
use crate::utils::ring_queue::RingQueue;

const GARDEN_STEPS: usize = 64;
const INFINITE_STEPS: usize = 26_501_365;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 21, tags = ["grid", "bfs", "ring-queue"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    /// Garden map with the start tile turned into a plot.
    grid: Grid,
    start: Point,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut grid = Grid::parse(input)?;
        if let Some(p) = grid.find(|&c| !matches!(c, b'.' | b'#' | b'S')) {
            return Err(ParseError::InvalidFormat(format!(
                "unexpected tile '{}' at {}",
                grid[p] as char, p
            )));
        }
        let start = grid
            .find(|&c| c == b'S')
            .ok_or_else(|| ParseError::MissingData("no start tile 'S'".to_string()))?;
        grid[start] = b'.';
        Ok(SharedData { grid, start })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_reachable(&shared.grid, shared.start, GARDEN_STEPS).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        infinite_by_extrapolation(shared, INFINITE_STEPS).map(|plots| plots.to_string())
    }
}

/// Plots reachable in exactly `steps` steps.
///
/// A plot at BFS distance `d <= steps` is reachable in exactly `steps` when `d` has the same
/// parity, since the elf can step back and forth.
fn count_reachable(grid: &Grid, start: Point, steps: usize) -> usize {
    let mut dist = Grid::filled(grid.height(), grid.width(), usize::MAX);
    let mut frontier = RingQueue::with_capacity(grid.width() + grid.height());
    dist[start] = 0;
    frontier.push(start);

    while let Ok(p) = frontier.pop() {
        let d = dist[p];
        if d == steps {
            continue;
        }
        for (_, next) in grid.neighbors(p) {
            if grid[next] == b'.' && dist[next] == usize::MAX {
                dist[next] = d + 1;
                frontier.push(next);
            }
        }
    }

    dist.count(|&d| d <= steps && d % 2 == steps % 2)
}

/// [`count_reachable`] on the map repeated in every direction.
///
/// The map is tiled far enough that `steps` cannot reach the border, with the start in the
/// middle copy.
fn count_reachable_infinite(grid: &Grid, start: Point, steps: usize) -> usize {
    let reach = steps / grid.height().min(grid.width()) + 1;
    let copies = 2 * reach + 1;
    let tiled = grid.tiled(copies);
    let start = Point::new(
        reach * grid.height() + start.row,
        reach * grid.width() + start.col,
    );
    count_reachable(&tiled, start, steps)
}

/// Value at `x` of the quadratic through `(0, f0)`, `(1, f1)`, `(2, f2)`.
fn extrapolate([f0, f1, f2]: [i64; 3], x: i64) -> i64 {
    let first = f1 - f0;
    let second = f2 - 2 * f1 + f0;
    f0 + first * x + second * x * (x - 1) / 2
}

/// Counts plots for a huge step count on square maps whose start sits in the centre.
///
/// The start row and column are open, so the reached area grows as a diamond by one map width
/// every `width` steps, and the plot count is quadratic in the number of map widths crossed.
/// Three BFS runs at `steps % width + k * width` for `k = 0, 1, 2` pin down the quadratic.
fn infinite_by_extrapolation(shared: &SharedData, steps: usize) -> Result<i64, SolveError> {
    let grid = &shared.grid;
    let size = grid.width();
    let centre = Point::new(size / 2, size / 2);
    if grid.height() != size || size % 2 == 0 || shared.start != centre {
        return Err(SolveError::SolveFailed(
            format!(
                "extrapolation needs an odd square map with the start in the centre, got {}x{} starting at {}",
                grid.height(),
                size,
                shared.start
            )
            .into(),
        ));
    }

    let offset = steps % size;
    let samples = [0, 1, 2].map(|k| {
        let count = count_reachable_infinite(grid, shared.start, offset + k * size);
        debug!("day 21 {} steps: {} plots", offset + k * size, count);
        count as i64
    });
    Ok(extrapolate(samples, (steps / size) as i64))
}
