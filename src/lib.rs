// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
// Additional warnings that are allow by default (`rustc -W help`)
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused)]
// Clippy
#![warn(clippy::all)]

pub mod board;
pub mod config;
pub mod level;
pub mod moves;
pub mod solution_formatter;
pub mod solver;

mod data;
mod fs;
mod parser;
mod state;
mod vec2d;

use std::error::Error;

use crate::config::Mode;
use crate::level::Level;
use crate::solver::SolverOk;

pub use crate::data::{CellIdx, Dir, MapCell};
pub use crate::parser::ParserErr;
pub use crate::state::State;

pub trait LoadLevel {
    fn load_level(&self) -> Result<Level, Box<dyn Error>>;
}

impl LoadLevel for str {
    fn load_level(&self) -> Result<Level, Box<dyn Error>> {
        let level: Level = fs::read_file(self)?.parse()?;
        Ok(level)
    }
}

pub trait Solve {
    fn solve(&self, mode: Mode, print_status: bool) -> SolverOk;
}
