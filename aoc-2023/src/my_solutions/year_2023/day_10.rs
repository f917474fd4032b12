use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use log::debug;

use crate::utils::grid::{Dir, Grid, Point};
use crate::utils::ring_queue::RingQueue;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 10, tags = ["grid", "bfs", "ring-queue"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    grid: Grid,
    /// Loop cells in walking order, starting at `S`.
    path: Vec<Point>,
    start_dirs: [Dir; 2],
}

/// The two openings of a pipe tile.
fn openings(tile: u8) -> Option<[Dir; 2]> {
    match tile {
        b'|' => Some([Dir::North, Dir::South]),
        b'-' => Some([Dir::East, Dir::West]),
        b'L' => Some([Dir::North, Dir::East]),
        b'J' => Some([Dir::North, Dir::West]),
        b'7' => Some([Dir::South, Dir::West]),
        b'F' => Some([Dir::South, Dir::East]),
        _ => None,
    }
}

fn start_openings(grid: &Grid, start: Point) -> anyhow::Result<[Dir; 2]> {
    let dirs: Vec<Dir> = grid
        .neighbors(start)
        .filter(|&(dir, next)| {
            openings(grid[next]).is_some_and(|open| open.contains(&dir.opposite()))
        })
        .map(|(dir, _)| dir)
        .collect();
    match dirs.as_slice() {
        &[a, b] => Ok([a, b]),
        _ => Err(anyhow!("start {} connects to {} pipes, expected 2", start, dirs.len())),
    }
}

fn walk_loop(grid: &Grid, start: Point, first: Dir) -> anyhow::Result<Vec<Point>> {
    let mut path = vec![start];
    let mut pos = start;
    let mut heading = first;
    loop {
        pos = grid
            .step(pos, heading)
            .ok_or_else(|| anyhow!("loop leaves the map at {}", pos))?;
        if pos == start {
            return Ok(path);
        }
        let [a, b] = openings(grid[pos])
            .ok_or_else(|| anyhow!("loop hits non-pipe tile '{}' at {}", grid[pos] as char, pos))?;
        heading = if a == heading.opposite() {
            b
        } else if b == heading.opposite() {
            a
        } else {
            bail!("pipe at {} does not connect back", pos);
        };
        path.push(pos);
    }
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let grid = Grid::parse(input)?;
        let start = grid
            .find(|&c| c == b'S')
            .ok_or_else(|| ParseError::MissingData("no start tile 'S'".to_string()))?;

        start_openings(&grid, start)
            .and_then(|start_dirs| {
                let path = walk_loop(&grid, start, start_dirs[0])?;
                Ok((start_dirs, path))
            })
            .map(|(start_dirs, path)| SharedData {
                grid,
                path,
                start_dirs,
            })
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok((shared.path.len() / 2).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_enclosed(shared).to_string())
    }
}

/// Counts tiles inside the loop.
///
/// Each tile `(r, c)` becomes cell `(2r + 1, 2c + 1)` of a grid with twice the resolution, and
/// every pipe also walls off the half-cells between it and its neighbours. Flooding from the
/// corner then squeezes between adjacent pipes, and the unreached tile cells are enclosed.
fn count_enclosed(shared: &SharedData) -> usize {
    let grid = &shared.grid;
    let mut fine = Grid::filled(2 * grid.height() + 1, 2 * grid.width() + 1, b'.');

    for (idx, &p) in shared.path.iter().enumerate() {
        let center = Point::new(2 * p.row + 1, 2 * p.col + 1);
        fine[center] = b'#';
        let dirs = if idx == 0 {
            Some(shared.start_dirs)
        } else {
            openings(grid[p])
        };
        for dir in dirs.into_iter().flatten() {
            if let Some(half) = fine.step(center, dir) {
                fine[half] = b'#';
            }
        }
    }

    let mut frontier = RingQueue::with_capacity(fine.width() + fine.height());
    let origin = Point::new(0, 0);
    fine[origin] = b'O';
    frontier.push(origin);
    while let Ok(p) = frontier.pop() {
        for dir in Dir::ALL {
            if let Some(next) = fine.step(p, dir)
                && fine[next] == b'.'
            {
                fine[next] = b'O';
                frontier.push(next);
            }
        }
    }
    debug!("day 10 flooded plane:\n{}", fine.render());

    grid.points()
        .filter(|p| fine[Point::new(2 * p.row + 1, 2 * p.col + 1)] == b'.')
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const SIMPLE_LOOP: &str = "\
.....
.S-7.
.|.|.
.L-J.
.....
";

    const COMPLEX_LOOP: &str = "\
..F7.
.FJ|.
SJ.L7
|F--J
LJ...
";

    const ENCLOSED: &str = "\
...........
.S-------7.
.|F-----7|.
.||.....||.
.||.....||.
.|L-7.F-J|.
.|..|.|..|.
.L--J.L--J.
...........
";

    const SQUEEZED: &str = "\
..........
.S------7.
.|F----7|.
.||....||.
.||....||.
.|L-7F-J|.
.|..||..|.
.L--JL--J.
..........
";

    fn solve(input: &str, part: u8) -> String {
        let mut shared = Solver::parse(input).unwrap();
        Solver::solve_part(&mut shared, part).unwrap()
    }

    #[test]
    fn test_farthest_point() {
        assert_eq!(solve(SIMPLE_LOOP, 1), "4");
        assert_eq!(solve(COMPLEX_LOOP, 1), "8");
    }

    #[test]
    fn test_enclosed_tiles() {
        assert_eq!(solve(ENCLOSED, 2), "4");
        assert_eq!(solve(SQUEEZED, 2), "4");
        assert_eq!(solve(SIMPLE_LOOP, 2), "1");
    }

    #[test]
    fn test_start_shape_is_inferred() {
        let shared = Solver::parse(COMPLEX_LOOP).unwrap();
        assert_eq!(shared.start_dirs, [Dir::East, Dir::South]);
        assert_eq!(shared.path.len(), 16);
    }

    #[test]
    fn test_rejects_bad_maps() {
        assert!(matches!(Solver::parse("..\n.."), Err(ParseError::MissingData(_))));
        assert!(matches!(
            Solver::parse(".S.\n...\n"),
            Err(ParseError::InvalidFormat(_))
        ));
    }
}
