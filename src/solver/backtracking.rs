use crate::board::Board;
use crate::data::Dir;
use crate::moves::{Move, Moves};

use super::arena::{StateArena, StateId};

// Terminology:
// move = changing player position by one cell
// push = a move that changes a box position
// step = a move that doesn't change a box position

/// Walks parent links from `final_state` back to the root and turns the chain into moves.
pub(crate) fn reconstruct_moves(board: &Board, arena: &StateArena, final_state: StateId) -> Moves {
    let states = backtrack_parents(arena, final_state);

    let mut moves = Moves::default();
    for pair in states.windows(2) {
        moves.add(move_between_states(board, arena, pair[0], pair[1]));
    }
    moves
}

/// Root first.
fn backtrack_parents(arena: &StateArena, final_state: StateId) -> Vec<StateId> {
    let mut states = vec![final_state];
    let mut cur = final_state;
    while let Some(parent) = arena.parent(cur) {
        states.push(parent);
        cur = parent;
    }
    states.reverse();
    states
}

/// The difference between them must be exactly one move.
fn move_between_states(board: &Board, arena: &StateArena, old: StateId, new: StateId) -> Move {
    let old_pos = arena.player_pos(old);
    let new_pos = arena.player_pos(new);
    let dir = Dir::between(board.coords(old_pos), board.coords(new_pos)).unwrap_or_else(|| {
        panic!(
            "Player moved from {:?} to {:?} in a single move",
            board.coords(old_pos),
            board.coords(new_pos)
        )
    });
    let is_push = arena.boxes(old).contains(&new_pos);
    Move::new(dir, is_push)
}
