use log::trace;

use crate::data::CellIdx;
use crate::state::State;

/// Number of slots in the first block, each next block is twice as large as the previous one.
const INITIAL_BLOCK_SIZE: usize = 64;

/// Handle to a state inside `StateArena`. Only meaningful for the arena that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct StateId(u32);

impl StateId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }

    pub(crate) fn from_index(index: usize) -> Self {
        debug_assert!(index < u32::max_value() as usize);
        StateId(index as u32)
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Slot {
    /// Computed on first use - `None` means not computed yet, every value is a valid hash.
    hash: Option<u32>,
    parent: Option<StateId>,
}

/// Fixed-stride storage for search states.
///
/// Each state is `stride` cell indices: the player followed by the boxes in ascending order.
/// Slots are handed out in blocks and recycled through a free list, nothing is returned
/// to the allocator until the whole arena is dropped. Running out of memory aborts.
#[derive(Debug)]
pub(crate) struct StateArena {
    stride: usize,
    cells: Vec<CellIdx>,
    slots: Vec<Slot>,
    free: Vec<StateId>,
    next_block_size: usize,
    blocks: usize,
}

impl StateArena {
    pub(crate) fn new(box_cnt: usize) -> Self {
        StateArena {
            stride: 1 + box_cnt,
            cells: Vec::new(),
            slots: Vec::new(),
            free: Vec::new(),
            next_block_size: INITIAL_BLOCK_SIZE,
            blocks: 0,
        }
    }

    /// Number of slots, both used and free.
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots currently handed out.
    pub(crate) fn in_use(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub(crate) fn blocks(&self) -> usize {
        self.blocks
    }

    pub(crate) fn alloc_root(&mut self, state: &State) -> StateId {
        assert_eq!(state.boxes.len() + 1, self.stride, "Wrong number of boxes");

        let id = self.alloc(None);
        let cells = self.cells_mut(id);
        cells[0] = state.player_pos;
        cells[1..].copy_from_slice(&state.boxes);
        id
    }

    /// Allocates a new state with the same contents as `parent` and links it to `parent`.
    pub(crate) fn alloc_child(&mut self, parent: StateId) -> StateId {
        let id = self.alloc(Some(parent));
        let src = parent.index() * self.stride;
        self.cells
            .copy_within(src..src + self.stride, id.index() * self.stride);
        id
    }

    /// Returns a state to the free list.
    ///
    /// Must only be called on states that haven't been admitted into the table,
    /// otherwise the table would point into reused memory.
    pub(crate) fn release(&mut self, id: StateId) {
        debug_assert!(id.index() < self.slots.len());
        self.free.push(id);
    }

    pub(crate) fn cells(&self, id: StateId) -> &[CellIdx] {
        let start = id.index() * self.stride;
        &self.cells[start..start + self.stride]
    }

    pub(crate) fn cells_mut(&mut self, id: StateId) -> &mut [CellIdx] {
        // contents are about to change so the cached hash is no longer valid
        self.slots[id.index()].hash = None;
        let start = id.index() * self.stride;
        &mut self.cells[start..start + self.stride]
    }

    pub(crate) fn player_pos(&self, id: StateId) -> CellIdx {
        self.cells(id)[0]
    }

    pub(crate) fn boxes(&self, id: StateId) -> &[CellIdx] {
        &self.cells(id)[1..]
    }

    pub(crate) fn parent(&self, id: StateId) -> Option<StateId> {
        self.slots[id.index()].parent
    }

    /// Hashes the state on first use and caches the result.
    pub(crate) fn hash(&mut self, id: StateId) -> u32 {
        if let Some(hash) = self.slots[id.index()].hash {
            return hash;
        }
        let hash = hash_cells(self.cells(id));
        self.slots[id.index()].hash = Some(hash);
        hash
    }

    /// The cached hash, `None` if it hasn't been computed yet.
    pub(crate) fn cached_hash(&self, id: StateId) -> Option<u32> {
        self.slots[id.index()].hash
    }

    #[cfg(test)]
    pub(crate) fn to_state(&self, id: StateId) -> State {
        State::new(self.player_pos(id), self.boxes(id).to_vec())
    }

    fn alloc(&mut self, parent: Option<StateId>) -> StateId {
        if self.free.is_empty() {
            self.add_block();
        }
        let id = self.free.pop().expect("A new block was just added");
        self.slots[id.index()] = Slot { hash: None, parent };
        id
    }

    fn add_block(&mut self) {
        let first = self.slots.len();
        let size = self.next_block_size;
        self.next_block_size *= 2;
        self.blocks += 1;
        trace!("Arena block {} with {} slots", self.blocks, size);

        self.slots.resize(first + size, Slot::default());
        self.cells.resize((first + size) * self.stride, 0);
        // reversed so slots are handed out in ascending order
        self.free
            .extend((first..first + size).rev().map(StateId::from_index));
    }
}

/// K&R style hash over the player and box positions.
pub(crate) fn hash_cells(cells: &[CellIdx]) -> u32 {
    cells
        .iter()
        .fold(0u32, |hash, &cell| u32::from(cell).wrapping_add(hash.wrapping_mul(31)))
}
