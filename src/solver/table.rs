use std::sync::atomic::{AtomicU32, Ordering};

use log::debug;
use rayon::prelude::*;

use crate::config::Mode;

use super::arena::{StateArena, StateId};

const INITIAL_CAPACITY: usize = 1024;

/// Marks the end of a chain.
const NIL: u32 = u32::max_value();

/// Separate chaining hash set of states living in a `StateArena`.
///
/// The table doesn't copy states, it only keeps the bucket heads and one chain link per state.
/// Links are indexed by `StateId` so they live next to the arena, not inside it.
/// Both are atomics only so the buckets can be redistributed from multiple threads
/// when the table grows, everything else takes `&mut self`.
#[derive(Debug)]
pub(crate) struct StateTable {
    buckets: Vec<AtomicU32>,
    links: Vec<AtomicU32>,
    filled: usize,
    fill_limit: usize,
    mode: Mode,
}

impl StateTable {
    pub(crate) fn new(mode: Mode) -> Self {
        StateTable {
            buckets: new_buckets(INITIAL_CAPACITY),
            links: Vec::new(),
            filled: 0,
            fill_limit: INITIAL_CAPACITY * 3 / 4,
            mode,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Number of states in the table.
    pub(crate) fn filled(&self) -> usize {
        self.filled
    }

    /// Finds a state with the same contents as `id`.
    pub(crate) fn lookup(&self, arena: &mut StateArena, id: StateId) -> Option<StateId> {
        let hash = arena.hash(id);
        let mut cur = self.buckets[self.bucket(hash)].load(Ordering::Relaxed);
        while cur != NIL {
            let other = StateId::from_index(cur as usize);
            // everything in the table has its hash computed already
            if arena.cached_hash(other) == Some(hash) && arena.cells(other) == arena.cells(id) {
                return Some(other);
            }
            cur = self.links[other.index()].load(Ordering::Relaxed);
        }
        None
    }

    /// Returns `false` for duplicates - the caller still owns them and should release them.
    pub(crate) fn insert_if_absent(&mut self, arena: &mut StateArena, id: StateId) -> bool {
        if self.lookup(arena, id).is_some() {
            return false;
        }

        if self.filled >= self.fill_limit {
            self.grow(arena);
        }
        self.filled += 1;

        if self.links.len() <= id.index() {
            let len = arena.capacity().max(id.index() + 1);
            self.links.resize_with(len, || AtomicU32::new(NIL));
        }

        let hash = arena.hash(id);
        let bucket = self.bucket(hash);
        let head = self.buckets[bucket].get_mut();
        *self.links[id.index()].get_mut() = *head;
        *head = id.index() as u32;
        true
    }

    /// All states in the table, in no particular order.
    #[cfg(test)]
    pub(crate) fn states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.buckets.iter().flat_map(move |head| {
            let mut cur = head.load(Ordering::Relaxed);
            std::iter::from_fn(move || {
                if cur == NIL {
                    return None;
                }
                let id = StateId::from_index(cur as usize);
                cur = self.links[id.index()].load(Ordering::Relaxed);
                Some(id)
            })
        })
    }

    fn bucket(&self, hash: u32) -> usize {
        hash as usize & (self.buckets.len() - 1)
    }

    /// Doubles the capacity and moves every chain node into its new bucket.
    fn grow(&mut self, arena: &StateArena) {
        let new_capacity = self.buckets.len() * 2;
        self.fill_limit *= 2;
        debug!(
            "Growing state table to {} buckets ({} states)",
            new_capacity, self.filled
        );

        let old_buckets = std::mem::replace(&mut self.buckets, new_buckets(new_capacity));
        let bits = new_capacity - 1;
        let mode = self.mode;
        match mode {
            Mode::Sequential => {
                for old_head in old_buckets {
                    let mut cur = old_head.into_inner();
                    while cur != NIL {
                        let link = self.links[cur as usize].get_mut();
                        let next = *link;
                        let bucket = rehash_bucket(arena, cur, bits);
                        let head = self.buckets[bucket].get_mut();
                        *link = *head;
                        *head = cur;
                        cur = next;
                    }
                }
            }
            Mode::Parallel => {
                // Each node belongs to exactly one old chain so only its worker touches its link,
                // but several old buckets can map to the same new one - hence the swap.
                let links = &self.links;
                let new_buckets = &self.buckets;
                old_buckets.par_iter().for_each(|old_head| {
                    let mut cur = old_head.load(Ordering::Relaxed);
                    while cur != NIL {
                        let link = &links[cur as usize];
                        let next = link.load(Ordering::Relaxed);
                        let bucket = rehash_bucket(arena, cur, bits);
                        let prev_head = new_buckets[bucket].swap(cur, Ordering::AcqRel);
                        link.store(prev_head, Ordering::Release);
                        cur = next;
                    }
                });
            }
        }
    }
}

fn new_buckets(capacity: usize) -> Vec<AtomicU32> {
    debug_assert!(capacity.is_power_of_two());
    (0..capacity).map(|_| AtomicU32::new(NIL)).collect()
}

fn rehash_bucket(arena: &StateArena, node: u32, bits: usize) -> usize {
    let hash = arena
        .cached_hash(StateId::from_index(node as usize))
        .expect("States in the table are always hashed");
    hash as usize & bits
}
