//! Slot+generation table mapping `u64` array handles to owned arrays.
//!
//! A C caller only ever holds a `u64`. Destroying an array bumps its slot's
//! generation, so a second destroy (or any use after destroy) resolves to
//! `None` instead of reaching freed memory. Generations start at 1, which
//! keeps [`NULL_HANDLE`] out of the issued range and lets the API tell a
//! null handle apart from a stale one.

use std::fmt;

/// The handle value C callers use for "no array". Never issued.
pub const NULL_HANDLE: u64 = 0;

/// Handle encoding: upper 32 bits = slot index, lower 32 bits = generation.
fn encode(slot: u32, generation: u32) -> u64 {
    ((slot as u64) << 32) | (generation as u64)
}

fn decode(handle: u64) -> (u32, u32) {
    let slot = (handle >> 32) as u32;
    let generation = handle as u32;
    (slot, generation)
}

/// Why a handle failed to resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BadHandle {
    /// The caller passed [`NULL_HANDLE`].
    Null,
    /// Destroyed, or never issued by this table.
    Stale,
}

impl BadHandle {
    /// Classify a handle that the table did not resolve.
    pub fn of(handle: u64) -> Self {
        if handle == NULL_HANDLE {
            BadHandle::Null
        } else {
            BadHandle::Stale
        }
    }
}

impl fmt::Display for BadHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BadHandle::Null => write!(f, "null array handle"),
            BadHandle::Stale => write!(f, "stale or unknown array handle"),
        }
    }
}

struct Slot<T> {
    generation: u32,
    data: Option<T>,
}

/// Free-list backed handle table.
///
/// Freed slots are recycled with the next generation; a slot whose
/// generation would wrap back to 0 is retired for good.
pub(crate) struct HandleTable<T> {
    slots: Vec<Slot<T>>,
    free_list: Vec<u32>,
}

impl<T> HandleTable<T> {
    /// An empty table. `const` so it can back a `static`.
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Store `value` and return its handle. Never returns [`NULL_HANDLE`].
    pub fn insert(&mut self, value: T) -> u64 {
        if let Some(slot_idx) = self.free_list.pop() {
            let slot = &mut self.slots[slot_idx as usize];
            slot.data = Some(value);
            encode(slot_idx, slot.generation)
        } else {
            let slot_idx = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 1,
                data: Some(value),
            });
            encode(slot_idx, 1)
        }
    }

    /// The array behind `handle`.
    ///
    /// `None` for [`NULL_HANDLE`], a destroyed array, or a value this table
    /// never issued.
    pub fn get(&self, handle: u64) -> Option<&T> {
        let (slot_idx, generation) = decode(handle);
        let slot = self.slots.get(slot_idx as usize)?;
        if slot.generation != generation {
            return None;
        }
        slot.data.as_ref()
    }

    /// Mutable access to the array behind `handle`; `None` as for
    /// [`get`](Self::get).
    pub fn get_mut(&mut self, handle: u64) -> Option<&mut T> {
        let (slot_idx, generation) = decode(handle);
        let slot = self.slots.get_mut(slot_idx as usize)?;
        if slot.generation != generation {
            return None;
        }
        slot.data.as_mut()
    }

    /// Take the value out, invalidating `handle`.
    ///
    /// Returns `None` if the handle is already invalid, so removing twice is
    /// harmless. A slot whose generation wraps to 0 is retired instead of
    /// recycled, since generation 0 is never issued and a recycled slot
    /// would hand out `encode(slot, 0)`.
    pub fn remove(&mut self, handle: u64) -> Option<T> {
        let (slot_idx, generation) = decode(handle);
        let slot = self.slots.get_mut(slot_idx as usize)?;
        if slot.generation != generation {
            return None;
        }
        let value = slot.data.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        if slot.generation != 0 {
            self.free_list.push(slot_idx);
        }
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_get_round_trip() {
        let mut table = HandleTable::new();
        let h = table.insert(42i32);
        assert_eq!(table.get(h), Some(&42));
    }

    #[test]
    fn first_handle_is_not_null() {
        let mut table = HandleTable::new();
        let h = table.insert(());
        assert_ne!(h, NULL_HANDLE);
        assert_eq!(decode(h), (0, 1));
        assert_eq!(table.get(NULL_HANDLE), None);
    }

    #[test]
    fn bad_handles_are_classified() {
        let mut table = HandleTable::new();
        let h = table.insert(0u8);
        table.remove(h);
        assert_eq!(BadHandle::of(NULL_HANDLE), BadHandle::Null);
        assert_eq!(BadHandle::of(h), BadHandle::Stale);
        assert_eq!(BadHandle::Null.to_string(), "null array handle");
        assert_eq!(BadHandle::Stale.to_string(), "stale or unknown array handle");
    }

    #[test]
    fn get_mut_modifies_value() {
        let mut table = HandleTable::new();
        let h = table.insert(10i32);
        *table.get_mut(h).unwrap() = 20;
        assert_eq!(table.get(h), Some(&20));
    }

    #[test]
    fn double_remove_returns_none() {
        let mut table = HandleTable::new();
        let h = table.insert(1i32);
        assert_eq!(table.remove(h), Some(1));
        assert_eq!(table.remove(h), None);
        assert_eq!(table.get(h), None);
        assert_eq!(table.get_mut(h), None);
    }

    #[test]
    fn free_list_reuses_slots_with_new_generation() {
        let mut table = HandleTable::new();
        let h1 = table.insert(1i32);
        table.remove(h1);
        let h2 = table.insert(2i32);
        let (slot1, gen1) = decode(h1);
        let (slot2, gen2) = decode(h2);
        assert_eq!(slot1, slot2);
        assert_eq!(gen2, gen1 + 1);
        assert_eq!(table.get(h2), Some(&2));
        assert_eq!(table.get(h1), None);
    }

    #[test]
    fn wrapped_generation_retires_slot() {
        let mut table = HandleTable::new();
        let h = table.insert(1i32);
        table.remove(h);

        table.slots[0].generation = u32::MAX;
        let h2 = table.insert(2i32);
        assert_eq!(decode(h2), (0, u32::MAX));

        // Generation wraps to 0: the slot must not come back.
        table.remove(h2);
        assert_eq!(table.slots[0].generation, 0);
        assert!(!table.free_list.contains(&0));
        assert_eq!(table.get(NULL_HANDLE), None);

        let h3 = table.insert(3i32);
        let (slot3, _) = decode(h3);
        assert_ne!(slot3, 0, "retired slot must not be reused");
    }
}
