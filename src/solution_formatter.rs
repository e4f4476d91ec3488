use std::fmt::{self, Debug, Display, Formatter};

use crate::level::Level;
use crate::moves::Moves;

pub struct SolutionFormatter<'a> {
    level: &'a Level,
    moves: &'a Moves,
    include_steps: bool,
}

impl<'a> SolutionFormatter<'a> {
    pub(crate) fn new(level: &'a Level, moves: &'a Moves, include_steps: bool) -> Self {
        Self {
            level,
            moves,
            include_steps,
        }
    }
}

impl Display for SolutionFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let states = match self.level.replay(self.moves) {
            Ok(states) => states,
            Err(err) => return writeln!(f, "Invalid solution: {}", err),
        };

        let mut states = states.iter();
        let initial = states.next().expect("Initial state is always present");
        writeln!(f, "{}", self.level.board.xsb_with_state(initial))?;
        for (state, mov) in states.zip(self.moves) {
            if mov.is_push || self.include_steps {
                writeln!(f, "{}", self.level.board.xsb_with_state(state))?;
            }
        }
        Ok(())
    }
}

impl Debug for SolutionFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVEL: &str = r"
######
#@ $.#
######
";

    #[test]
    fn pushes_only() {
        let level: Level = LEVEL.parse().unwrap();
        let moves: Moves = "rR".parse().unwrap();
        let expected = "\
######
#@ $.#
######

######
#  @*#
######

";
        assert_eq!(level.format_solution(&moves, false).to_string(), expected);
    }

    #[test]
    fn all_steps() {
        let level: Level = LEVEL.parse().unwrap();
        let moves: Moves = "rR".parse().unwrap();
        let expected = "\
######
#@ $.#
######

######
# @$.#
######

######
#  @*#
######

";
        assert_eq!(level.format_solution(&moves, true).to_string(), expected);
    }

    #[test]
    fn invalid_solution() {
        let level: Level = LEVEL.parse().unwrap();
        let moves: Moves = "l".parse().unwrap();
        assert_eq!(
            level.format_solution(&moves, true).to_string(),
            "Invalid solution: Move 0 is blocked\n"
        );
    }
}
