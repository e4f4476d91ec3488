mod arena;
mod backtracking;
mod expand;
mod live;
mod stats;
mod table;

use std::fmt::{self, Debug, Formatter};

use log::{debug, info};
use separator::Separatable;

use crate::board::Board;
use crate::config::Mode;
use crate::data::DIRECTIONS;
use crate::level::Level;
use crate::moves::Moves;
use crate::state::State;
use crate::vec2d::Vec2d;
use crate::Solve;

use self::arena::{StateArena, StateId};
use self::backtracking::reconstruct_moves;
use self::expand::move_player;
use self::live::find_live_cells;
use self::table::StateTable;

pub use self::stats::Stats;

pub struct SolverOk {
    /// `None` means the level can't be solved, an empty sequence means it was solved already.
    pub moves: Option<Moves>,
    pub stats: Stats,
    pub mode: Mode,
}

impl SolverOk {
    fn new(moves: Option<Moves>, stats: Stats, mode: Mode) -> Self {
        Self { moves, stats, mode }
    }
}

impl Debug for SolverOk {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.moves {
            None => writeln!(f, "No solution")?,
            Some(ref moves) => writeln!(
                f,
                "{}: {} moves, {} pushes",
                self.mode,
                moves.move_cnt(),
                moves.push_cnt()
            )?,
        }
        write!(f, "{:?}", self.stats)
    }
}

impl Solve for Level {
    fn solve(&self, mode: Mode, print_status: bool) -> SolverOk {
        solve(self, mode, print_status)
    }
}

/// Everything about the level that doesn't change during the search.
#[derive(Debug)]
pub(crate) struct StaticData<'a> {
    pub(crate) board: &'a Board,
    pub(crate) live: &'a Vec2d<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchOutcome {
    Solved(StateId),
    Exhausted,
}

fn solve(level: &Level, mode: Mode, print_status: bool) -> SolverOk {
    debug!("Finding live cells ({})", mode);
    let live = find_live_cells(&level.board, mode);
    info!(
        "Board {}x{}, {} boxes, {} live cells",
        level.board.rows(),
        level.board.cols(),
        level.box_cnt(),
        live.as_slice().iter().filter(|&&l| l).count()
    );

    let sd = StaticData {
        board: &level.board,
        live: &live,
    };
    let mut search = Search::new(sd, level.box_cnt(), mode, print_status);
    let moves = match search.run(&level.state) {
        SearchOutcome::Solved(id) => {
            debug!("Solved, backtracking moves");
            Some(reconstruct_moves(&level.board, &search.arena, id))
        }
        SearchOutcome::Exhausted => None,
    };

    match moves {
        Some(ref moves) => info!(
            "Found solution with {} moves, {} pushes",
            moves.move_cnt(),
            moves.push_cnt()
        ),
        None => info!("No solution"),
    }
    SolverOk::new(moves, search.stats, mode)
}

/// One breadth-first search over a single level.
///
/// Every reached configuration lives in the arena and is owned either by the table
/// (admitted) or by the search loop for the short time before it's admitted or released.
#[derive(Debug)]
struct Search<'a> {
    sd: StaticData<'a>,
    arena: StateArena,
    table: StateTable,
    stats: Stats,
    print_status: bool,
}

impl<'a> Search<'a> {
    fn new(sd: StaticData<'a>, box_cnt: usize, mode: Mode, print_status: bool) -> Self {
        Search {
            sd,
            arena: StateArena::new(box_cnt),
            table: StateTable::new(mode),
            stats: Stats::new(),
            print_status,
        }
    }

    fn run(&mut self, initial: &State) -> SearchOutcome {
        let root = self.arena.alloc_root(initial);
        self.stats.add_created(0);
        self.stats.add_unique(0);
        self.table.insert_if_absent(&mut self.arena, root);
        if self.is_solved(root) {
            return SearchOutcome::Solved(root);
        }

        // Used as a stack - the newest state of a depth is expanded first.
        // Depths are still processed strictly in order so the first solution found is move-optimal.
        let mut frontier = vec![root];
        let mut depth = 0;
        while !frontier.is_empty() {
            depth += 1;
            let mut next_frontier = Vec::new();

            while let Some(cur) = frontier.pop() {
                for &dir in &DIRECTIONS {
                    let new = match move_player(&self.sd, &mut self.arena, cur, dir) {
                        Some(new) => new,
                        None => continue,
                    };
                    self.stats.add_created(depth);

                    if !self.table.insert_if_absent(&mut self.arena, new) {
                        self.stats.add_duplicate(depth);
                        self.arena.release(new);
                        continue;
                    }
                    self.stats.add_unique(depth);

                    if self.is_solved(new) {
                        self.report_depth(depth);
                        return SearchOutcome::Solved(new);
                    }
                    next_frontier.push(new);
                }
            }

            self.report_depth(depth);
            frontier = next_frontier;
        }

        SearchOutcome::Exhausted
    }

    fn is_solved(&self, id: StateId) -> bool {
        let board = self.sd.board;
        self.arena.boxes(id).iter().all(|&b| board.is_goal(b))
    }

    fn report_depth(&self, depth: usize) {
        let new_states = self.stats.unique_at(depth);
        let total = self.table.filled();
        if self.print_status {
            println!(
                "Depth {}: {} new states, {} total",
                depth,
                new_states.separated_string(),
                total.separated_string()
            );
        }
        debug!(
            "Depth {}: {} new states, {} total in {} buckets, {}/{} arena slots in {} blocks",
            depth,
            new_states,
            total,
            self.table.capacity(),
            self.arena.in_use(),
            self.arena.capacity(),
            self.arena.blocks()
        );
    }
}

#[cfg(test)]
mod tests {
    use fnv::FnvHashSet;

    use super::*;

    const SCENARIO: &str = r"
#######
#     #
#     #
#. #  #
#. $$ #
#.$$  #
#.#  @#
#######";

    const UNSOLVABLE: &str = r"
#####
#$  #
# @.#
#####";

    fn run_search(level: &Level, mode: Mode) -> (FnvHashSet<Vec<u16>>, SearchOutcome, Stats) {
        let live = find_live_cells(&level.board, mode);
        let sd = StaticData {
            board: &level.board,
            live: &live,
        };
        let mut search = Search::new(sd, level.box_cnt(), mode, false);
        let outcome = search.run(&level.state);

        // everything created but not admitted went back to the arena
        assert_eq!(search.arena.in_use(), search.table.filled());
        assert_eq!(search.stats.total_unique(), search.table.filled());
        assert_eq!(
            search.stats.total_created(),
            search.stats.total_unique() + search.stats.total_duplicates()
        );

        let mut seen = FnvHashSet::default();
        for id in search.table.states() {
            let boxes = search.arena.boxes(id);
            assert!(boxes.windows(2).all(|w| w[0] < w[1]), "Boxes not canonical: {:?}", boxes);
            assert!(seen.insert(search.arena.cells(id).to_vec()), "Duplicate state in table");
        }
        assert_eq!(seen.len(), search.table.filled());

        (seen, outcome, search.stats)
    }

    #[test]
    fn scenario() {
        let level: Level = SCENARIO.parse().unwrap();
        let solver_ok = level.solve(Mode::Sequential, false);
        let moves = solver_ok.moves.unwrap();
        assert_eq!(moves.to_string(), "ulULLulDDurrrddlULrruLLrrUruLLLulD");
        assert_eq!(moves.move_cnt(), 34);
        assert_eq!(moves.push_cnt(), 14);
        assert!(level.play(&moves).unwrap().is_solved());
    }

    #[test]
    fn parallel_finds_the_same_solution() {
        let level: Level = SCENARIO.parse().unwrap();
        let seq = level.solve(Mode::Sequential, false);
        let par = level.solve(Mode::Parallel, false);
        assert_eq!(seq.moves, par.moves);
        assert_eq!(seq.stats, par.stats);
        assert_eq!(par.mode, Mode::Parallel);
    }

    #[test]
    fn table_contents() {
        let level: Level = SCENARIO.parse().unwrap();
        let (seq, outcome, _) = run_search(&level, Mode::Sequential);
        match outcome {
            SearchOutcome::Solved(_) => {}
            SearchOutcome::Exhausted => panic!("Should be solvable"),
        }
        let (par, _, _) = run_search(&level, Mode::Parallel);
        assert_eq!(seq, par);
    }

    #[test]
    fn unsolvable() {
        let level: Level = UNSOLVABLE.parse().unwrap();
        let solver_ok = level.solve(Mode::Sequential, false);
        assert_eq!(solver_ok.moves, None);

        // the box never moves so only the player positions are explored
        let (states, outcome, stats) = run_search(&level, Mode::Sequential);
        assert_eq!(outcome, SearchOutcome::Exhausted);
        assert_eq!(states.len(), 5);
        assert_eq!(stats.total_unique(), 5);
        assert!(format!("{:?}", solver_ok).starts_with("No solution\n"));
    }

    #[test]
    fn already_solved() {
        let level: Level = r"
####
#@*#
####"
            .parse()
            .unwrap();
        let solver_ok = level.solve(Mode::Sequential, false);
        assert_eq!(solver_ok.moves, Some(Moves::default()));
        assert_eq!(solver_ok.stats.total_created(), 1);
        assert_eq!(solver_ok.stats.depths(), 1);
    }

    #[test]
    fn no_boxes() {
        let level: Level = "@ .".parse().unwrap();
        let solver_ok = level.solve(Mode::Sequential, false);
        assert_eq!(solver_ok.moves, Some(Moves::default()));
    }

    #[test]
    fn single_push() {
        let level: Level = r"
#####
#@$.#
#####"
            .parse()
            .unwrap();
        let solver_ok = level.solve(Mode::Sequential, false);
        assert_eq!(solver_ok.moves.unwrap().to_string(), "R");
        assert_eq!(solver_ok.stats.depths(), 2);
        assert_eq!(solver_ok.stats.total_unique(), 2);
    }

    #[test]
    fn independent_searches_in_parallel() {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                std::thread::spawn(|| {
                    let level: Level = SCENARIO.parse().unwrap();
                    level.solve(Mode::Parallel, false).moves.unwrap().to_string()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), "ulULLulDDurrrddlULrruLLrrUruLLLulD");
        }
    }

    #[test]
    #[ignore] // a few seconds in release, much longer in debug
    fn demo_board() {
        let level: Level = r"
#######################
#. #####......##...####
#....#.......$        #
#..#...#              #
#...##..$$            #
######.$$...$$$.#     #
#.#. #.#             @#
#######################"
            .parse()
            .unwrap();
        let solver_ok = level.solve(Mode::Parallel, false);
        let moves = solver_ok.moves.unwrap();
        assert_eq!(moves.to_string(), "llllllllURuLdLUUrUdllllDLrrddllULrUU");
        assert!(level.play(&moves).unwrap().is_solved());
    }
}
