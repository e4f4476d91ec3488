use std::fmt::{self, Debug, Display, Formatter};

use crate::data::{CellIdx, Dir, MapCell};
use crate::state::State;
use crate::vec2d::Vec2d;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Contents {
    Empty,
    Box,
    Player,
}

/// The static part of a level - walls and goals. Never changes during solving.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    grid: Vec2d<MapCell>,
    goals: Vec2d<bool>,
}

impl Board {
    pub(crate) fn new(grid: Vec2d<MapCell>, goals: Vec2d<bool>) -> Self {
        assert_eq!(grid.len(), goals.len());
        Board { grid, goals }
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    pub fn cell_cnt(&self) -> usize {
        self.grid.len()
    }

    pub fn classify(&self, cell: CellIdx) -> MapCell {
        self.grid[cell]
    }

    pub fn in_bounds(&self, r: isize, c: isize) -> bool {
        r >= 0 && c >= 0 && (r as usize) < self.rows() && (c as usize) < self.cols()
    }

    pub fn is_goal(&self, cell: CellIdx) -> bool {
        self.goals[cell]
    }

    pub(crate) fn goal_cells(&self) -> impl Iterator<Item = CellIdx> + '_ {
        self.goals.positions().filter(move |&cell| self.goals[cell])
    }

    pub(crate) fn grid(&self) -> &Vec2d<MapCell> {
        &self.grid
    }

    pub(crate) fn coords(&self, cell: CellIdx) -> (usize, usize) {
        self.grid.coords(cell)
    }

    /// The neighbor of `cell` in direction `dir`, `None` when it would leave the board.
    ///
    /// Walls are not checked here.
    pub(crate) fn step(&self, cell: CellIdx, dir: Dir) -> Option<CellIdx> {
        let (r, c) = self.coords(cell);
        let (dr, dc) = dir.delta();
        let (nr, nc) = (r as isize + dr, c as isize + dc);
        if self.in_bounds(nr, nc) {
            Some(self.grid.cell_at(nr as usize, nc as usize))
        } else {
            None
        }
    }

    pub(crate) fn xsb_with_state<'a>(&'a self, state: &'a State) -> BoardFormatter<'a> {
        BoardFormatter {
            board: self,
            state: Some(state),
        }
    }

    fn write(&self, state: Option<&State>, f: &mut Formatter<'_>) -> fmt::Result {
        let mut contents = self.grid.scratchpad_with_default(Contents::Empty);
        if let Some(state) = state {
            for &b in &state.boxes {
                contents[b] = Contents::Box;
            }
            contents[state.player_pos] = Contents::Player;
        }

        for r in 0..self.rows() {
            // don't print trailing empty cells to match the input level strings
            let last = (0..self.cols()).rev().find(|&c| {
                let cell = self.grid.cell_at(r, c);
                self.grid[cell] != MapCell::Empty
                    || self.goals[cell]
                    || contents[cell] != Contents::Empty
            });

            if let Some(last) = last {
                for c in 0..=last {
                    let cell = self.grid.cell_at(r, c);
                    write!(f, "{}", Self::xsb_char(self.grid[cell], self.goals[cell], contents[cell]))?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }

    fn xsb_char(cell: MapCell, goal: bool, contents: Contents) -> char {
        match (cell, goal, contents) {
            (MapCell::Wall, _, Contents::Empty) => '#',
            (MapCell::Wall, _, _) => unreachable!("Something is inside a wall"),
            (MapCell::Empty, false, Contents::Empty) => ' ',
            (MapCell::Empty, false, Contents::Box) => '$',
            (MapCell::Empty, false, Contents::Player) => '@',
            (MapCell::Empty, true, Contents::Empty) => '.',
            (MapCell::Empty, true, Contents::Box) => '*',
            (MapCell::Empty, true, Contents::Player) => '+',
        }
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.write(None, f)
    }
}

impl Debug for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

pub(crate) struct BoardFormatter<'a> {
    board: &'a Board,
    state: Option<&'a State>,
}

impl Display for BoardFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.board.write(self.state, f)
    }
}
