//! Per-action handler slot arrays.
//!
//! A slot array is a power-of-two length `Vec<HandlerId>` where 0 marks a
//! vacant slot (handler IDs start at 1, so 0 never collides). Appends go at a
//! trailing cursor so registration order is preserved; removal zeroes the slot
//! in place. The array doubles when the cursor reaches the last usable index
//! and halves with compaction when occupancy drops below roughly a quarter,
//! never going under its initial length.

use crate::registry::HandlerId;

/// Vacant-slot sentinel.
pub(crate) const VACANT: HandlerId = 0;

#[derive(Debug)]
pub(crate) struct SlotArray {
    slots: Vec<HandlerId>,
    /// Next trailing append position. Slots in `[0, cursor)` are occupied or
    /// were zeroed by removals; everything at and beyond `cursor` is vacant.
    cursor: usize,
    /// Count of occupied slots.
    live: usize,
    /// Shrink floor: the (power-of-two) initial length.
    min_len: usize,
}

impl SlotArray {
    pub(crate) fn new(initial_len: usize) -> Self {
        let len = initial_len.next_power_of_two().max(2);
        Self {
            slots: vec![VACANT; len],
            cursor: 0,
            live: 0,
            min_len: len,
        }
    }

    /// Append a handler ID, doubling the array first when the cursor would
    /// pass the last usable index.
    pub(crate) fn push(&mut self, id: HandlerId) {
        debug_assert_ne!(id, VACANT, "handler IDs start at 1");
        if self.cursor + 1 > self.slots.len() - 1 {
            self.slots.resize(self.slots.len() * 2, VACANT);
        }
        self.slots[self.cursor] = id;
        self.cursor += 1;
        self.live += 1;
    }

    /// Zero the slot holding `id`, then evaluate the shrink condition once
    /// against the post-removal occupancy. Returns false when `id` is absent.
    pub(crate) fn remove(&mut self, id: HandlerId) -> bool {
        let Some(pos) = self.slots[..self.cursor].iter().position(|&s| s == id) else {
            return false;
        };
        self.slots[pos] = VACANT;
        self.live -= 1;

        let half = self.slots.len() / 2;
        if self.live + self.live / 2 < half && half >= self.min_len {
            self.shrink_to(half);
        }
        true
    }

    /// Replace the array with a half-size copy, compacting live IDs into the
    /// low slots in their original relative order.
    fn shrink_to(&mut self, len: usize) {
        let mut compacted = vec![VACANT; len];
        let mut k = 0;
        for &slot in &self.slots[..self.cursor] {
            if slot != VACANT {
                compacted[k] = slot;
                k += 1;
            }
        }
        self.slots = compacted;
        self.cursor = k;
    }

    pub(crate) fn live(&self) -> usize {
        self.live
    }

    /// Current array length. Always a power of two.
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Occupied handler IDs in slot order.
    pub(crate) fn iter_live(&self) -> impl Iterator<Item = HandlerId> + '_ {
        self.slots[..self.cursor]
            .iter()
            .copied()
            .filter(|&id| id != VACANT)
    }
}
