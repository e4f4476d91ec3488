use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};

use crate::board::Board;
use crate::data::MapCell;
use crate::moves::{Move, Moves};
use crate::solution_formatter::SolutionFormatter;
use crate::state::State;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayErr {
    /// The move at this index walks into a wall, off the board, or pushes a box into something.
    Blocked(usize),
    /// The move at this index is marked as a push but isn't one or the other way around.
    PushMismatch(usize),
}

impl Display for ReplayErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            ReplayErr::Blocked(i) => write!(f, "Move {} is blocked", i),
            ReplayErr::PushMismatch(i) => write!(f, "Move {} has the wrong case", i),
        }
    }
}

impl Error for ReplayErr {}

#[derive(Clone, PartialEq, Eq)]
pub struct Level {
    pub board: Board,
    pub state: State,
}

impl Level {
    pub(crate) fn new(board: Board, state: State) -> Self {
        Level { board, state }
    }

    pub fn box_cnt(&self) -> usize {
        self.state.boxes.len()
    }

    pub fn is_solved(&self) -> bool {
        self.state.boxes.iter().all(|&b| self.board.is_goal(b))
    }

    /// All states visited by `moves` including the initial one.
    pub fn replay(&self, moves: &Moves) -> Result<Vec<State>, ReplayErr> {
        let mut states = vec![self.state.clone()];
        for (i, &mov) in moves.iter().enumerate() {
            let last = states.last().expect("Initial state is always present");
            let next = self.apply(last, mov, i)?;
            states.push(next);
        }
        Ok(states)
    }

    /// The level after performing `moves`.
    pub fn play(&self, moves: &Moves) -> Result<Level, ReplayErr> {
        let mut states = self.replay(moves)?;
        let state = states.pop().expect("Initial state is always present");
        Ok(Level::new(self.board.clone(), state))
    }

    pub fn format_solution<'a>(&'a self, moves: &'a Moves, include_steps: bool) -> SolutionFormatter<'a> {
        SolutionFormatter::new(self, moves, include_steps)
    }

    fn apply(&self, state: &State, mov: Move, index: usize) -> Result<State, ReplayErr> {
        let free = |cell| self.board.classify(cell) != MapCell::Wall;

        let new_player_pos = self
            .board
            .step(state.player_pos, mov.dir)
            .filter(|&cell| free(cell))
            .ok_or(ReplayErr::Blocked(index))?;

        let mut boxes = state.boxes.clone();
        let pushed = boxes.iter().position(|&b| b == new_player_pos);
        if pushed.is_some() != mov.is_push {
            return Err(ReplayErr::PushMismatch(index));
        }
        if let Some(box_index) = pushed {
            let push_dest = self
                .board
                .step(new_player_pos, mov.dir)
                .filter(|&cell| free(cell) && !state.boxes.contains(&cell))
                .ok_or(ReplayErr::Blocked(index))?;
            boxes[box_index] = push_dest;
        }
        Ok(State::new(new_player_pos, boxes))
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board.xsb_with_state(&self.state))
    }
}

impl Debug for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
