//! Rectangular grids read from puzzle input.

use std::fmt;
use std::ops::{Index, IndexMut};

use aoc_solver::ParseError;

/// Row/column position inside a [`Grid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Point {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Compass direction; north is towards row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dir {
    North,
    East,
    South,
    West,
}

impl Dir {
    pub const ALL: [Dir; 4] = [Dir::North, Dir::East, Dir::South, Dir::West];

    pub const fn opposite(self) -> Self {
        match self {
            Dir::North => Dir::South,
            Dir::East => Dir::West,
            Dir::South => Dir::North,
            Dir::West => Dir::East,
        }
    }

    pub const fn turn_left(self) -> Self {
        match self {
            Dir::North => Dir::West,
            Dir::West => Dir::South,
            Dir::South => Dir::East,
            Dir::East => Dir::North,
        }
    }

    pub const fn turn_right(self) -> Self {
        self.turn_left().opposite()
    }

    pub const fn is_vertical(self) -> bool {
        matches!(self, Dir::North | Dir::South)
    }

    /// `(d_row, d_col)` of one step.
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Dir::North => (-1, 0),
            Dir::East => (0, 1),
            Dir::South => (1, 0),
            Dir::West => (0, -1),
        }
    }
}

/// Row-major grid of cells.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Grid<T = u8> {
    cells: Vec<T>,
    width: usize,
    height: usize,
}

impl Grid<u8> {
    /// Parses one row per non-blank line, trimming surrounding whitespace.
    ///
    /// ```
    /// use aoc_2023::utils::grid::{Grid, Point};
    ///
    /// let grid = Grid::parse("#.\n.#\n").unwrap();
    /// assert_eq!((grid.height(), grid.width()), (2, 2));
    /// assert_eq!(grid[Point::new(1, 1)], b'#');
    /// assert!(Grid::parse("##\n#\n").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let mut cells = Vec::with_capacity(input.len());
        let mut width = None;
        let mut height = 0;

        for (line_idx, line) in input.trim().lines().map(str::trim).enumerate() {
            if line.is_empty() {
                return Err(ParseError::InvalidFormat(format!(
                    "(line {}) empty row inside grid",
                    line_idx + 1
                )));
            }
            match width {
                None => width = Some(line.len()),
                Some(w) if w != line.len() => {
                    return Err(ParseError::InvalidFormat(format!(
                        "(line {}) expected {} columns, got {}",
                        line_idx + 1,
                        w,
                        line.len()
                    )));
                }
                Some(_) => {}
            }
            cells.extend_from_slice(line.as_bytes());
            height += 1;
        }

        let width = width.ok_or_else(|| ParseError::MissingData("empty grid".to_string()))?;
        Ok(Self { cells, width, height })
    }

    /// Rows rendered as text, for debug logging.
    pub fn render(&self) -> String {
        self.cells
            .chunks(self.width)
            .map(|row| String::from_utf8_lossy(row).into_owned())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl<T: Clone> Grid<T> {
    pub fn filled(height: usize, width: usize, value: T) -> Self {
        Self {
            cells: vec![value; width * height],
            width,
            height,
        }
    }

    /// `copies` x `copies` repetitions of this grid.
    pub fn tiled(&self, copies: usize) -> Self {
        let width = self.width * copies;
        let height = self.height * copies;
        let mut cells = Vec::with_capacity(width * height);
        for row in 0..height {
            let src = self.row(row % self.height);
            for _ in 0..copies {
                cells.extend_from_slice(src);
            }
        }
        Self { cells, width, height }
    }
}

impl<T> Grid<T> {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, p: Point) -> Option<&T> {
        self.contains(p).then(|| &self.cells[p.row * self.width + p.col])
    }

    pub fn contains(&self, p: Point) -> bool {
        p.row < self.height && p.col < self.width
    }

    /// Neighbour of `p` in direction `dir`, or `None` at the border.
    pub fn step(&self, p: Point, dir: Dir) -> Option<Point> {
        let (dr, dc) = dir.offset();
        let row = p.row.checked_add_signed(dr)?;
        let col = p.col.checked_add_signed(dc)?;
        let next = Point::new(row, col);
        self.contains(next).then_some(next)
    }

    /// In-bounds orthogonal neighbours of `p`.
    pub fn neighbors(&self, p: Point) -> impl Iterator<Item = (Dir, Point)> + '_ {
        Dir::ALL
            .into_iter()
            .filter_map(move |dir| self.step(p, dir).map(|next| (dir, next)))
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + use<T> {
        let width = self.width;
        (0..self.height).flat_map(move |row| (0..width).map(move |col| Point::new(row, col)))
    }

    /// First point in row-major order whose cell matches.
    pub fn find(&self, mut pred: impl FnMut(&T) -> bool) -> Option<Point> {
        self.cells
            .iter()
            .position(|cell| pred(cell))
            .map(|idx| Point::new(idx / self.width, idx % self.width))
    }

    pub fn count(&self, mut pred: impl FnMut(&T) -> bool) -> usize {
        self.cells.iter().filter(|cell| pred(cell)).count()
    }

    pub fn row(&self, row: usize) -> &[T] {
        &self.cells[row * self.width..(row + 1) * self.width]
    }

    /// Raw row-major cells.
    pub fn cells(&self) -> &[T] {
        &self.cells
    }
}

impl<T> Index<Point> for Grid<T> {
    type Output = T;

    fn index(&self, p: Point) -> &T {
        assert!(self.contains(p), "point {} outside {}x{} grid", p, self.height, self.width);
        &self.cells[p.row * self.width + p.col]
    }
}

impl<T> IndexMut<Point> for Grid<T> {
    fn index_mut(&mut self, p: Point) -> &mut T {
        assert!(self.contains(p), "point {} outside {}x{} grid", p, self.height, self.width);
        &mut self.cells[p.row * self.width + p.col]
    }
}

impl<T: fmt::Debug> fmt::Debug for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("height", &self.height)
            .field("width", &self.width)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_and_indexes() {
        let grid = Grid::parse("  abc\n  def  \n\n").unwrap();
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid[Point::new(0, 2)], b'c');
        assert_eq!(grid.row(1), b"def");
        assert_eq!(grid.render(), "abc\ndef");
    }

    #[test]
    fn test_parse_rejects_ragged_and_empty() {
        assert!(matches!(
            Grid::parse("abc\nde"),
            Err(ParseError::InvalidFormat(msg)) if msg.contains("line 2")
        ));
        assert!(matches!(Grid::parse("  \n"), Err(ParseError::MissingData(_))));
    }

    #[test]
    fn test_step_stays_in_bounds() {
        let grid = Grid::filled(2, 3, 0u8);
        let corner = Point::new(0, 0);
        assert_eq!(grid.step(corner, Dir::North), None);
        assert_eq!(grid.step(corner, Dir::West), None);
        assert_eq!(grid.step(corner, Dir::East), Some(Point::new(0, 1)));
        assert_eq!(grid.step(Point::new(1, 2), Dir::South), None);

        let around: Vec<_> = grid.neighbors(Point::new(1, 1)).map(|(d, _)| d).collect();
        assert_eq!(around, vec![Dir::North, Dir::East, Dir::West]);
    }

    #[test]
    fn test_find_and_count() {
        let grid = Grid::parse("..#\n#S.\n").unwrap();
        assert_eq!(grid.find(|&c| c == b'S'), Some(Point::new(1, 1)));
        assert_eq!(grid.find(|&c| c == b'X'), None);
        assert_eq!(grid.count(|&c| c == b'#'), 2);
        assert_eq!(grid.points().count(), 6);
    }

    #[test]
    fn test_tiled_repeats_rows_and_columns() {
        let grid = Grid::parse("ab\ncd").unwrap();
        let tiled = grid.tiled(3);
        assert_eq!((tiled.height(), tiled.width()), (6, 6));
        assert_eq!(tiled.row(0), b"ababab");
        assert_eq!(tiled.row(5), b"cdcdcd");
        assert_eq!(tiled[Point::new(2, 4)], b'a');
        assert_eq!(tiled[Point::new(3, 4)], b'c');
        assert_eq!(tiled[Point::new(3, 5)], b'd');
    }

    #[test]
    fn test_dir_turns() {
        for dir in Dir::ALL {
            assert_eq!(dir.turn_left().turn_right(), dir);
            assert_eq!(dir.opposite().opposite(), dir);
            assert_ne!(dir.is_vertical(), dir.turn_left().is_vertical());
        }
        assert_eq!(Dir::North.turn_right(), Dir::East);
    }
}
