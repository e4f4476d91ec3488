use std::fmt::{self, Debug, Display, Formatter};

use prettytable::format::consts::FORMAT_CLEAN;
use prettytable::{Cell, Row, Table};
use separator::Separatable;

/// Counts of states by search depth.
///
/// Created = all successors the move generator produced,
/// unique = those admitted into the table, duplicate = those rejected by it.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Stats {
    created_states: Vec<usize>,
    unique_states: Vec<usize>,
    duplicate_states: Vec<usize>,
}

impl Stats {
    pub(crate) fn new() -> Self {
        Stats::default()
    }

    pub fn total_created(&self) -> usize {
        self.created_states.iter().sum()
    }

    pub fn total_unique(&self) -> usize {
        self.unique_states.iter().sum()
    }

    pub fn total_duplicates(&self) -> usize {
        self.duplicate_states.iter().sum()
    }

    /// Number of depths the search reached, including depth 0.
    pub fn depths(&self) -> usize {
        self.created_states.len()
    }

    pub fn unique_at(&self, depth: usize) -> usize {
        self.unique_states.get(depth).cloned().unwrap_or(0)
    }

    pub(crate) fn add_created(&mut self, depth: usize) -> bool {
        Self::add(&mut self.created_states, depth)
    }

    pub(crate) fn add_unique(&mut self, depth: usize) -> bool {
        Self::add(&mut self.unique_states, depth)
    }

    pub(crate) fn add_duplicate(&mut self, depth: usize) -> bool {
        Self::add(&mut self.duplicate_states, depth)
    }

    /// Returns true when `depth` is reached for the first time.
    fn add(counts: &mut Vec<usize>, depth: usize) -> bool {
        let mut ret = false;

        // while because a depth can produce only duplicates
        while depth >= counts.len() {
            counts.push(0);
            ret = true;
        }
        counts[depth] += 1;
        ret
    }

    fn table(&self) -> Table {
        let mut table = Table::new();
        table.set_format(*FORMAT_CLEAN);
        table.set_titles(Row::new(
            ["Depth", "Created", "Unique", "Duplicates"]
                .iter()
                .map(|title| Cell::new(title))
                .collect(),
        ));
        for depth in 0..self.created_states.len() {
            let get = |counts: &Vec<usize>| counts.get(depth).cloned().unwrap_or(0);
            table.add_row(Row::new(vec![
                Cell::new(&format!("{}:", depth)),
                Cell::new(&get(&self.created_states).separated_string()),
                Cell::new(&get(&self.unique_states).separated_string()),
                Cell::new(&get(&self.duplicate_states).separated_string()),
            ]));
        }
        table
    }
}

impl Debug for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "created by depth: {:?}", self.created_states)?;
        writeln!(f, "unique by depth: {:?}", self.unique_states)?;
        writeln!(f, "duplicates by depth: {:?}", self.duplicate_states)?;
        writeln!(f, "total created: {}", self.total_created().separated_string())?;
        writeln!(f, "total unique: {}", self.total_unique().separated_string())?;
        writeln!(f, "total duplicates: {}", self.total_duplicates().separated_string())
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "States created total: {}", self.total_created().separated_string())?;
        writeln!(f, "Unique states total: {}", self.total_unique().separated_string())?;
        writeln!(f, "Duplicates total: {}", self.total_duplicates().separated_string())?;
        writeln!(f)?;
        write!(f, "{}", self.table())
    }
}
