use crate::data::CellIdx;

/// An owned configuration - where the player and the boxes are.
///
/// The solver keeps its states packed in an arena, this is only used at the edges:
/// the parsed initial configuration and replaying solutions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct State {
    pub(crate) player_pos: CellIdx,
    pub(crate) boxes: Vec<CellIdx>,
}

impl State {
    pub(crate) fn new(player_pos: CellIdx, mut boxes: Vec<CellIdx>) -> State {
        boxes.sort(); // sort to detect equal states when we reorder boxes
        State { player_pos, boxes }
    }

    pub fn player_pos(&self) -> CellIdx {
        self.player_pos
    }

    pub fn boxes(&self) -> &[CellIdx] {
        &self.boxes
    }
}
