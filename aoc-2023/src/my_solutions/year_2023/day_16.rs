use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use log::debug;

use crate::utils::grid::{Dir, Grid, Point};
use crate::utils::ring_queue::RingDeque;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 16, tags = ["grid", "dfs", "ring-queue"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Grid;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let grid = Grid::parse(input)?;
        if let Some(p) = grid.find(|&c| !matches!(c, b'.' | b'/' | b'\\' | b'|' | b'-')) {
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
        Ok(energize(shared, Point::new(0, 0), Dir::East).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let grid: &Grid = shared;
        let (height, width) = (grid.height(), grid.width());
        let entries = (0..height)
            .flat_map(|row| {
                [
                    (Point::new(row, 0), Dir::East),
                    (Point::new(row, width - 1), Dir::West),
                ]
            })
            .chain((0..width).flat_map(|col| {
                [
                    (Point::new(0, col), Dir::South),
                    (Point::new(height - 1, col), Dir::North),
                ]
            }));

        let best = entries
            .map(|(start, dir)| energize(grid, start, dir))
            .max()
            .unwrap_or_default();
        Ok(best.to_string())
    }
}

/// Directions a beam heading `dir` leaves `tile` in.
fn deflect(tile: u8, dir: Dir) -> [Option<Dir>; 2] {
    match (tile, dir) {
        (b'/', Dir::East) => [Some(Dir::North), None],
        (b'/', Dir::North) => [Some(Dir::East), None],
        (b'/', Dir::West) => [Some(Dir::South), None],
        (b'/', Dir::South) => [Some(Dir::West), None],
        (b'\\', Dir::East) => [Some(Dir::South), None],
        (b'\\', Dir::South) => [Some(Dir::East), None],
        (b'\\', Dir::West) => [Some(Dir::North), None],
        (b'\\', Dir::North) => [Some(Dir::West), None],
        (b'|', d) if !d.is_vertical() => [Some(Dir::North), Some(Dir::South)],
        (b'-', d) if d.is_vertical() => [Some(Dir::East), Some(Dir::West)],
        _ => [Some(dir), None],
    }
}

/// Number of tiles a beam entering `start` heading `dir` passes through.
fn energize(grid: &Grid, start: Point, dir: Dir) -> usize {
    // One bit per heading, so loops between splitters terminate.
    let mut seen = Grid::filled(grid.height(), grid.width(), 0u8);
    let mut beams = RingDeque::with_capacity(16);
    beams.push_back((start, dir));

    while let Ok((p, dir)) = beams.pop_back() {
        let bit = 1 << dir as u8;
        if seen[p] & bit != 0 {
            continue;
        }
        seen[p] |= bit;

        for next_dir in deflect(grid[p], dir).into_iter().flatten() {
            if let Some(next) = grid.step(p, next_dir) {
                beams.push_back((next, next_dir));
            }
        }
    }

    let energized = seen.count(|&mask| mask != 0);
    debug!("day 16 entry {} {:?}: {} energized", start, dir, energized);
    energized
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = r".|...\....
|.-.\.....
.....|-...
........|.
..........
.........\
..../.\\..
.-.-/..|..
.|....-|.\
..//.|....
";

    #[test]
    fn test_example() {
        let mut grid = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut grid, 1).unwrap(), "46");
        assert_eq!(Solver::solve_part(&mut grid, 2).unwrap(), "51");
    }

    #[test]
    fn test_best_entry_is_top_row_heading_south() {
        let grid = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(energize(&grid, Point::new(0, 3), Dir::South), 51);
    }

    #[test]
    fn test_splitter_loop_terminates() {
        let grid = Solver::parse("-.\\\n...\n\\./").unwrap();
        // The beam circles through the corners and the splitter sends it back into the loop.
        assert_eq!(energize(&grid, Point::new(0, 0), Dir::East), 8);
    }

    #[test]
    fn test_mirror_turns() {
        assert_eq!(deflect(b'/', Dir::East), [Some(Dir::North), None]);
        assert_eq!(deflect(b'\\', Dir::East), [Some(Dir::South), None]);
        assert_eq!(deflect(b'|', Dir::North), [Some(Dir::North), None]);
        assert_eq!(deflect(b'-', Dir::South), [Some(Dir::East), Some(Dir::West)]);
    }
}
