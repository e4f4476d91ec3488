use crate::data::{CellIdx, Dir, MapCell};

use super::arena::{StateArena, StateId};
use super::StaticData;

/// Moves the player one cell in `dir`, pushing a box if there is one.
///
/// Returns `None` when the move is impossible or pushes a box onto a dead cell.
/// The new state is owned by the caller - it either goes into the table or back to the arena.
pub(crate) fn move_player(
    sd: &StaticData<'_>,
    arena: &mut StateArena,
    id: StateId,
    dir: Dir,
) -> Option<StateId> {
    let board = sd.board;
    let free = |cell: CellIdx| board.classify(cell) != MapCell::Wall;

    let new_player_pos = board.step(arena.player_pos(id), dir).filter(|&cell| free(cell))?;

    let boxes = arena.boxes(id);
    let push = match boxes.iter().position(|&b| b == new_player_pos) {
        None => None,
        Some(box_index) => {
            let push_dest = board.step(new_player_pos, dir).filter(|&cell| free(cell))?;
            if !sd.live[push_dest] || boxes.contains(&push_dest) {
                return None;
            }
            Some((box_index, push_dest))
        }
    };

    let new_id = arena.alloc_child(id);
    let cells = arena.cells_mut(new_id);
    cells[0] = new_player_pos;
    if let Some((box_index, push_dest)) = push {
        cells[1 + box_index] = push_dest;
        sort_boxes(&mut cells[1..]);
    }
    Some(new_id)
}

/// Only one box moved so one or two passes are usually enough.
fn sort_boxes(boxes: &mut [CellIdx]) {
    for end in (1..boxes.len()).rev() {
        let mut swapped = false;
        for i in 0..end {
            if boxes[i] > boxes[i + 1] {
                boxes.swap(i, i + 1);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::Mode;
    use crate::data::DIRECTIONS;
    use crate::level::Level;
    use crate::solver::live::find_live_cells;

    fn expand_all(level: &str) -> (Level, Vec<Option<String>>) {
        let level: Level = level.parse().unwrap();
        let live = find_live_cells(&level.board, Mode::Sequential);
        let sd = StaticData {
            board: &level.board,
            live: &live,
        };
        let mut arena = StateArena::new(level.box_cnt());
        let root = arena.alloc_root(&level.state);

        let results = DIRECTIONS
            .iter()
            .map(|&dir| {
                move_player(&sd, &mut arena, root, dir).map(|new| {
                    assert_eq!(arena.parent(new), Some(root));
                    let new_level = Level::new(level.board.clone(), arena.to_state(new));
                    new_level.to_string()
                })
            })
            .collect();
        (level, results)
    }

    #[test]
    fn sorting() {
        let mut boxes = [5, 1, 7, 9];
        sort_boxes(&mut boxes);
        assert_eq!(boxes, [1, 5, 7, 9]);

        let mut boxes = [1, 5, 7, 3];
        sort_boxes(&mut boxes);
        assert_eq!(boxes, [1, 3, 5, 7]);

        let mut boxes = [4, 3, 2, 1];
        sort_boxes(&mut boxes);
        assert_eq!(boxes, [1, 2, 3, 4]);

        let mut boxes: [CellIdx; 0] = [];
        sort_boxes(&mut boxes);

        let mut boxes = [42];
        sort_boxes(&mut boxes);
        assert_eq!(boxes, [42]);
    }

    #[test]
    fn steps_and_pushes() {
        // order is right, left, up, down
        let (_, results) = expand_all(
            r"
#######
#     #
# @$ .#
#     #
#######",
        );
        assert_eq!(
            results,
            vec![
                Some("#######\n#     #\n#  @$.#\n#     #\n#######\n".to_owned()),
                Some("#######\n#     #\n#@ $ .#\n#     #\n#######\n".to_owned()),
                Some("#######\n# @   #\n#  $ .#\n#     #\n#######\n".to_owned()),
                Some("#######\n#     #\n#  $ .#\n# @   #\n#######\n".to_owned()),
            ]
        );
    }

    #[test]
    fn blocked_moves() {
        let (_, results) = expand_all(
            r"
#####
#$ .#
#@$$#
#*. #
#####",
        );
        // right: box into box, left: wall, up: box into wall, down: box into wall
        assert_eq!(results, vec![None, None, None, None]);
    }

    #[test]
    fn pushing_onto_dead_cell() {
        let (_, results) = expand_all(
            r"
######
#@$  #
#   .#
######",
        );
        // the box would end up in the top row, it could never leave it
        assert_eq!(results[0], None);
        assert!(results[3].is_some());
    }

    #[test]
    fn pushing_keeps_boxes_sorted() {
        let level: Level = r"
#######
#  @  #
#  $  #
# $  .#
#.    #
#######"
            .parse()
            .unwrap();
        let live = find_live_cells(&level.board, Mode::Sequential);
        let sd = StaticData {
            board: &level.board,
            live: &live,
        };
        let mut arena = StateArena::new(level.box_cnt());
        let root = arena.alloc_root(&level.state);
        assert_eq!(arena.boxes(root), &[17, 23]);

        // the pushed box overtakes the other one in row-major order
        let down = move_player(&sd, &mut arena, root, Dir::Down).unwrap();
        assert_eq!(arena.player_pos(down), 17);
        assert_eq!(arena.boxes(down), &[23, 24]);
    }

    #[test]
    fn walking_off_the_map() {
        let (_, results) = expand_all("@ ");
        assert_eq!(results[0], Some(" @\n".to_owned()));
        assert_eq!(results[1], None);
        assert_eq!(results[2], None);
        assert_eq!(results[3], None);
    }
}
