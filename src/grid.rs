//! Square-grid geometry: cells, facings, and 4-neighborhoods.
//!
//! Row 0 is the top row. NORTH decreases the row, EAST increases the column.

use std::fmt;

/// A grid coordinate `(row, col)`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn in_bounds(self, size: usize) -> bool {
        self.row < size && self.col < size
    }

    /// In-bounds 4-neighbors, in the order up, down, left, right.
    pub fn neighbors(self, size: usize) -> impl Iterator<Item = Cell> {
        let Cell { row, col } = self;
        let up = (row > 0).then(|| Cell::new(row - 1, col));
        let down = (row + 1 < size).then(|| Cell::new(row + 1, col));
        let left = (col > 0).then(|| Cell::new(row, col - 1));
        let right = (col + 1 < size).then(|| Cell::new(row, col + 1));
        [up, down, left, right].into_iter().flatten()
    }

    pub fn is_adjacent(self, other: Cell) -> bool {
        self.manhattan(other) == 1
    }

    pub fn manhattan(self, other: Cell) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// The cell one step away in `direction`, if it stays inside the grid.
    pub fn step(self, direction: Direction, size: usize) -> Option<Cell> {
        let next = match direction {
            Direction::North => Cell::new(self.row.checked_sub(1)?, self.col),
            Direction::South => Cell::new(self.row + 1, self.col),
            Direction::West => Cell::new(self.row, self.col.checked_sub(1)?),
            Direction::East => Cell::new(self.row, self.col + 1),
        };
        next.in_bounds(size).then_some(next)
    }

    /// Every cell of a `size × size` grid, row-major.
    pub fn all(size: usize) -> impl Iterator<Item = Cell> {
        (0..size).flat_map(move |row| (0..size).map(move |col| Cell::new(row, col)))
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Cell::new(row, col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One of the four cardinal facings.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::North, Direction::East, Direction::South, Direction::West];

    pub fn turn_left(self) -> Direction {
        match self {
            Direction::North => Direction::West,
            Direction::West => Direction::South,
            Direction::South => Direction::East,
            Direction::East => Direction::North,
        }
    }

    pub fn turn_right(self) -> Direction {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }

    /// The facing that leads from `from` to the adjacent cell `to`.
    ///
    /// Returns `None` unless the cells differ by exactly one unit in exactly
    /// one coordinate.
    pub fn between(from: Cell, to: Cell) -> Option<Direction> {
        if !from.is_adjacent(to) {
            return None;
        }
        Some(if to.row < from.row {
            Direction::North
        } else if to.row > from.row {
            Direction::South
        } else if to.col > from.col {
            Direction::East
        } else {
            Direction::West
        })
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "NORTH",
            Direction::East => "EAST",
            Direction::South => "SOUTH",
            Direction::West => "WEST",
        };
        write!(f, "{}", name)
    }
}
