use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::board::Board;
use crate::data::{CellIdx, MapCell, MAX_CELLS};
use crate::level::Level;
use crate::state::State;
use crate::vec2d::Vec2d;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserErr {
    TooLarge,
    MultiplePlayers,
    NoPlayer,
}

impl Display for ParserErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            ParserErr::TooLarge => write!(f, "Map has more than {} cells", MAX_CELLS),
            ParserErr::MultiplePlayers => write!(f, "More than one player"),
            ParserErr::NoPlayer => write!(f, "No player"),
        }
    }
}

impl Error for ParserErr {}

impl FromStr for Level {
    type Err = ParserErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Parses the XSB format.
///
/// Only the basic alphabet is recognized, anything else is floor.
pub(crate) fn parse(level: &str) -> Result<Level, ParserErr> {
    // trim so we can specify levels using raw strings more easily
    let level = level.trim_matches('\n');

    let rows = level.lines().count();
    let cols = level.lines().map(|line| line.chars().count()).max().unwrap_or(0);
    if rows * cols > MAX_CELLS {
        return Err(ParserErr::TooLarge);
    }

    let mut grid = Vec::new();
    let mut goals = Vec::new();
    let mut boxes = Vec::new();
    let mut player_pos = None;

    for (r, line) in level.lines().enumerate() {
        let mut grid_row = Vec::new();
        let mut goal_row = Vec::new();
        for (c, cur_char) in line.chars().enumerate() {
            // rows are padded to `cols` later so this is the final index
            let pos = (r * cols + c) as CellIdx;

            let (tile, goal) = match cur_char {
                '#' => (MapCell::Wall, false),
                '@' | '+' => {
                    if player_pos.is_some() {
                        return Err(ParserErr::MultiplePlayers);
                    }
                    player_pos = Some(pos);
                    (MapCell::Empty, cur_char == '+')
                }
                '$' | '*' => {
                    boxes.push(pos);
                    (MapCell::Empty, cur_char == '*')
                }
                '.' => (MapCell::Empty, true),
                _ => (MapCell::Empty, false),
            };
            grid_row.push(tile);
            goal_row.push(goal);
        }
        grid.push(grid_row);
        goals.push(goal_row);
    }

    let player_pos = player_pos.ok_or(ParserErr::NoPlayer)?;
    let board = Board::new(
        Vec2d::from_rows(grid, MapCell::Empty),
        Vec2d::from_rows(goals, false),
    );
    Ok(Level::new(board, State::new(player_pos, boxes)))
}
