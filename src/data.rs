use std::fmt::{self, Display, Formatter};

/// Linear index of a cell: `row * cols + col`.
pub type CellIdx = u16;

/// The largest number of cells a board can have so that every cell fits into `CellIdx`.
pub(crate) const MAX_CELLS: usize = CellIdx::max_value() as usize + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapCell {
    Empty,
    Wall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Right,
    Down,
    Left,
}

/// The order in which successors are generated.
///
/// Changing it doesn't change solution length, only which of the equally long solutions is found.
pub(crate) const DIRECTIONS: [Dir; 4] = [Dir::Right, Dir::Left, Dir::Up, Dir::Down];

impl Dir {
    /// Row and column delta.
    pub(crate) fn delta(self) -> (isize, isize) {
        match self {
            Dir::Up => (-1, 0),
            Dir::Right => (0, 1),
            Dir::Down => (1, 0),
            Dir::Left => (0, -1),
        }
    }

    /// The direction of a single step between two coordinates, `None` if they're not neighbors.
    pub(crate) fn between(from: (usize, usize), to: (usize, usize)) -> Option<Dir> {
        let dr = to.0 as isize - from.0 as isize;
        let dc = to.1 as isize - from.1 as isize;
        match (dr, dc) {
            (-1, 0) => Some(Dir::Up),
            (0, 1) => Some(Dir::Right),
            (1, 0) => Some(Dir::Down),
            (0, -1) => Some(Dir::Left),
            _ => None,
        }
    }

    pub(crate) fn from_char(c: char) -> Option<Dir> {
        match c.to_ascii_lowercase() {
            'u' => Some(Dir::Up),
            'r' => Some(Dir::Right),
            'd' => Some(Dir::Down),
            'l' => Some(Dir::Left),
            _ => None,
        }
    }
}

impl Display for Dir {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Dir::Up => write!(f, "u"),
            Dir::Right => write!(f, "r"),
            Dir::Down => write!(f, "d"),
            Dir::Left => write!(f, "l"),
        }
    }
}
