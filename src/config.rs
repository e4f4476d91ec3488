use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// How the data-parallel parts of the solver are run.
///
/// Both modes explore exactly the same states and find exactly the same solution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Sequential,
    /// Live cell marking and hash table growth use the rayon thread pool.
    Parallel,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Sequential
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Mode::Sequential => write!(f, "sequential"),
            Mode::Parallel => write!(f, "parallel"),
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sequential" => Ok(Mode::Sequential),
            "parallel" => Ok(Mode::Parallel),
            _ => Err(format!("Unknown mode: {}", s)),
        }
    }
}
