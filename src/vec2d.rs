use std::fmt::{self, Debug, Display, Formatter};
use std::ops::{Index, IndexMut};

use crate::data::CellIdx;

/// Row-major grid addressed by linear cell index.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct Vec2d<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T> Vec2d<T> {
    /// Pads all rows to the length of the longest one.
    pub(crate) fn from_rows(grid: Vec<Vec<T>>, pad: T) -> Self
    where
        T: Clone,
    {
        let rows = grid.len();
        let cols = grid.iter().map(Vec::len).max().unwrap_or(0);
        let mut data = Vec::with_capacity(rows * cols);
        for mut row in grid {
            row.resize(cols, pad.clone());
            data.extend(row);
        }
        Vec2d { data, rows, cols }
    }

    pub(crate) fn rows(&self) -> usize {
        self.rows
    }

    pub(crate) fn cols(&self) -> usize {
        self.cols
    }

    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }

    pub(crate) fn scratchpad<U: Clone + Default>(&self) -> Vec2d<U> {
        self.scratchpad_with_default(U::default())
    }

    pub(crate) fn scratchpad_with_default<U: Clone>(&self, default: U) -> Vec2d<U> {
        Vec2d {
            data: vec![default; self.data.len()],
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// All cell indices in row-major order.
    pub(crate) fn positions(&self) -> impl Iterator<Item = CellIdx> {
        // the board constructor guarantees len fits
        (0..self.data.len()).map(|i| i as CellIdx)
    }

    pub(crate) fn coords(&self, cell: CellIdx) -> (usize, usize) {
        let cell = usize::from(cell);
        (cell / self.cols, cell % self.cols)
    }

    pub(crate) fn cell_at(&self, r: usize, c: usize) -> CellIdx {
        (r * self.cols + c) as CellIdx
    }

    pub(crate) fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl Display for Vec2d<bool> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in self.data.chunks(self.cols.max(1)) {
            for &cell in row {
                write!(f, "{}", if cell { 1 } else { 0 })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Debug for Vec2d<bool> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl<T> Index<CellIdx> for Vec2d<T> {
    type Output = T;

    fn index(&self, index: CellIdx) -> &Self::Output {
        // unchecked indexing is only marginally faster (if at all) to justify unsafe
        &self.data[usize::from(index)]
    }
}

impl<T> IndexMut<CellIdx> for Vec2d<T> {
    fn index_mut(&mut self, index: CellIdx) -> &mut Self::Output {
        &mut self.data[usize::from(index)]
    }
}
