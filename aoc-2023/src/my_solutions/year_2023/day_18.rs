use anyhow::{anyhow, bail, Context};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use log::debug;

use crate::utils::grid::{Dir, Grid, Point};
use crate::utils::ring_queue::RingQueue;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 18, tags = ["geometry", "flood-fill", "ring-queue"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dig {
    dir: Dir,
    len: i64,
}

/// Each plan line read both ways: the visible instruction and the one hidden in the colour.
#[derive(Debug)]
pub struct SharedData {
    plain: Vec<Dig>,
    decoded: Vec<Dig>,
}

fn parse_line(line: &str) -> anyhow::Result<(Dig, Dig)> {
    let mut fields = line.split_whitespace();
    let (Some(dir), Some(len), Some(color), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        bail!("expected `<dir> <len> (#rrggbb)`");
    };

    let dir = match dir {
        "U" => Dir::North,
        "R" => Dir::East,
        "D" => Dir::South,
        "L" => Dir::West,
        other => bail!("unknown direction '{}'", other),
    };
    let len = len
        .parse::<u32>()
        .map(i64::from)
        .with_context(|| format!("bad length '{}'", len))?;

    let hex = color
        .strip_prefix("(#")
        .and_then(|c| c.strip_suffix(')'))
        .filter(|h| h.len() == 6 && h.is_ascii())
        .ok_or_else(|| anyhow!("bad colour '{}'", color))?;
    let hidden_len =
        i64::from_str_radix(&hex[..5], 16).with_context(|| format!("bad colour '{}'", color))?;
    let hidden_dir = match &hex[5..] {
        "0" => Dir::East,
        "1" => Dir::South,
        "2" => Dir::West,
        "3" => Dir::North,
        other => bail!("bad direction digit '{}' in colour", other),
    };

    Ok((
        Dig { dir, len },
        Dig {
            dir: hidden_dir,
            len: hidden_len,
        },
    ))
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let (plain, decoded): (Vec<Dig>, Vec<Dig>) = input
            .trim()
            .lines()
            .enumerate()
            .map(|(line_idx, line)| {
                parse_line(line.trim()).map_err(|e| anyhow!("(line {}) {}", line_idx + 1, e))
            })
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))?
            .into_iter()
            .unzip();

        if plain.is_empty() {
            return Err(ParseError::MissingData("empty dig plan".to_string()));
        }
        Ok(SharedData { plain, decoded })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        flood_fill_volume(&shared.plain).map(|v| v.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shoelace_volume(&shared.decoded).to_string())
    }
}

fn corners(plan: &[Dig]) -> Vec<(i64, i64)> {
    let mut pos = (0i64, 0i64);
    let mut corners = Vec::with_capacity(plan.len() + 1);
    corners.push(pos);
    for dig in plan {
        let (dr, dc) = dig.dir.offset();
        pos = (pos.0 + dr as i64 * dig.len, pos.1 + dc as i64 * dig.len);
        corners.push(pos);
    }
    corners
}

/// Draws the trench on a grid with a one-tile margin and floods the outside from a corner.
fn flood_fill_volume(plan: &[Dig]) -> Result<usize, SolveError> {
    let corners = corners(plan);
    let (min_r, max_r, min_c, max_c) = corners.iter().fold(
        (i64::MAX, i64::MIN, i64::MAX, i64::MIN),
        |(lo_r, hi_r, lo_c, hi_c), &(r, c)| (lo_r.min(r), hi_r.max(r), lo_c.min(c), hi_c.max(c)),
    );
    let height = usize::try_from(max_r - min_r + 3)
        .map_err(|e| SolveError::SolveFailed(Box::new(e)))?;
    let width = usize::try_from(max_c - min_c + 3)
        .map_err(|e| SolveError::SolveFailed(Box::new(e)))?;
    if height.saturating_mul(width) > 100_000_000 {
        return Err(SolveError::SolveFailed(
            anyhow!("trench spans {}x{} tiles, too large to draw", height, width).into(),
        ));
    }

    let mut lagoon = Grid::filled(height, width, b'.');
    // Shift so the minimum corner lands at (1, 1).
    let mut pos = Point::new((-min_r + 1) as usize, (-min_c + 1) as usize);
    lagoon[pos] = b'#';
    for dig in plan {
        for _ in 0..dig.len {
            pos = lagoon.step(pos, dig.dir).ok_or_else(|| {
                SolveError::SolveFailed(anyhow!("trench leaves the drawing at {}", pos).into())
            })?;
            lagoon[pos] = b'#';
        }
    }

    let mut frontier = RingQueue::with_capacity(2 * (height + width));
    let origin = Point::new(0, 0);
    lagoon[origin] = b'~';
    frontier.push(origin);
    while let Ok(p) = frontier.pop() {
        for dir in Dir::ALL {
            if let Some(next) = lagoon.step(p, dir)
                && lagoon[next] == b'.'
            {
                lagoon[next] = b'~';
                frontier.push(next);
            }
        }
    }
    debug!("day 18 lagoon:\n{}", lagoon.render());

    Ok(lagoon.count(|&c| c != b'~'))
}

/// Shoelace area of the corner polygon plus the outer half of the one-tile-wide border.
fn shoelace_volume(plan: &[Dig]) -> i64 {
    let corners = corners(plan);
    let twice_area: i64 = corners
        .windows(2)
        .map(|w| w[0].0 * w[1].1 - w[1].0 * w[0].1)
        .sum();
    let perimeter: i64 = plan.iter().map(|dig| dig.len).sum();
    twice_area.abs() / 2 + perimeter / 2 + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "\
R 6 (#70c710)
D 5 (#0dc571)
L 2 (#5713f0)
D 2 (#d2c081)
R 2 (#59c680)
D 2 (#411b91)
L 5 (#8ceee2)
U 2 (#caa173)
L 1 (#1b58a2)
U 2 (#caa171)
R 2 (#7807d2)
U 3 (#a77fa3)
L 2 (#015232)
U 2 (#7a21e3)
";

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "62");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "952408144115");
    }

    #[test]
    fn test_both_methods_agree_on_plain_plan() {
        let shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(shoelace_volume(&shared.plain), 62);
    }

    #[test]
    fn test_colour_decoding() {
        let (plain, decoded) = parse_line("R 6 (#70c710)").unwrap();
        assert_eq!(plain, Dig { dir: Dir::East, len: 6 });
        assert_eq!(decoded, Dig { dir: Dir::East, len: 461937 });

        let (_, decoded) = parse_line("D 5 (#0dc571)").unwrap();
        assert_eq!(decoded, Dig { dir: Dir::South, len: 56407 });
    }

    #[test]
    fn test_rejects_bad_lines() {
        let bad_lines = [
            "X 6 (#70c710)",
            "R six (#70c710)",
            "R -6 (#70c710)",
            "R 6 (#70c714)",
            "R 6 #70c710",
            "R 6",
        ];
        for bad in bad_lines {
            assert!(
                matches!(Solver::parse(bad), Err(ParseError::InvalidFormat(_))),
                "accepted {:?}",
                bad
            );
        }
        assert!(matches!(Solver::parse("\n"), Err(ParseError::MissingData(_))));
    }
}
