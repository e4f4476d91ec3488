use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;

use crate::board::Board;
use crate::config::Mode;
use crate::data::{CellIdx, MapCell, DIRECTIONS};
use crate::vec2d::Vec2d;

/// Marks cells from which a box could still be pushed onto some goal.
///
/// Works backwards from every goal by pulling the box: the box can arrive at `cur` from
/// its neighbor `prev` only if the player had room to stand one more cell behind `prev`.
/// Pushing a box anywhere else is pointless.
#[inline(never)] // this is called only once and this way it's easier to see in callgrind
pub(crate) fn find_live_cells(board: &Board, mode: Mode) -> Vec2d<bool> {
    match mode {
        Mode::Sequential => {
            let mut live = board.grid().scratchpad();
            for goal in board.goal_cells() {
                mark_live(board, goal, &mut live);
            }
            live
        }
        Mode::Parallel => mark_live_parallel(board),
    }
}

fn mark_live(board: &Board, goal: CellIdx, live: &mut Vec2d<bool>) {
    let mut to_visit = vec![goal];
    while let Some(cur) = to_visit.pop() {
        if live[cur] {
            continue;
        }
        live[cur] = true;
        to_visit.extend(pull_sources(board, cur));
    }
}

/// One independent fill per goal.
///
/// The fills only ever set flags so the result is the same union no matter how they interleave.
/// Atomics are needed just to make the shared writes sound, `Relaxed` is enough.
/// A fill may stop at a cell another fill already marked because that fill explores
/// the rest of the region behind it.
fn mark_live_parallel(board: &Board) -> Vec2d<bool> {
    let flags: Vec<AtomicBool> = (0..board.cell_cnt()).map(|_| AtomicBool::new(false)).collect();
    let goals: Vec<_> = board.goal_cells().collect();

    goals.par_iter().for_each(|&goal| {
        let mut to_visit = vec![goal];
        while let Some(cur) = to_visit.pop() {
            if flags[usize::from(cur)].swap(true, Ordering::Relaxed) {
                continue;
            }
            to_visit.extend(pull_sources(board, cur));
        }
    });

    let mut live = board.grid().scratchpad();
    for (cell, flag) in board.grid().positions().zip(flags) {
        live[cell] = flag.into_inner();
    }
    live
}

/// Cells a box can be pushed from to end up at `cur`.
fn pull_sources(board: &Board, cur: CellIdx) -> impl Iterator<Item = CellIdx> + '_ {
    let free = move |cell: CellIdx| board.classify(cell) != MapCell::Wall;
    DIRECTIONS.iter().filter_map(move |&dir| {
        let prev = board.step(cur, dir)?;
        let player = board.step(prev, dir)?;
        if free(prev) && free(player) {
            Some(prev)
        } else {
            None
        }
    })
}
