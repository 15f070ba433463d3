//! Write-once open-addressing table.
//!
//! The hashed representation behind [`FrozenHashMap`](super::FrozenHashMap)
//! and [`FrozenHashSet`](super::FrozenHashSet). The table is populated once
//! from a deduplicated entry list and never touched again.
//!
//! # No-Tombstone Invariant
//!
//! Lookup probes linearly from the smeared hash of the key and stops at the
//! **first empty slot**. That termination rule is correct only because this
//! table is write-once: entries are never removed, so a probe chain can
//! never be broken by a tombstone. If removal support is ever added, every
//! probe loop in this file must be rewritten; do not relax this quietly.

use std::borrow::Borrow;
use std::hash::Hash;

use super::policy::{self, DEFAULT_LOAD_FACTOR};

#[cfg(debug_assertions)]
const DEDUPLICATED_INPUT_PANIC_MESSAGE: &str =
    "open-addressing table input must be deduplicated before construction";

/// A fixed-capacity, linearly probed slot array.
///
/// Capacity is always a power of two (at least 2), so `index & mask` wraps
/// the probe sequence. Each slot holds at most one entry. Iteration order
/// is table-scan order, which is deterministic for a given build.
#[derive(Clone, Debug)]
pub(crate) struct OpenTable<K, V> {
    slots: Box<[Option<(K, V)>]>,
    mask: usize,
    len: usize,
}

impl<K: Hash + Eq, V> OpenTable<K, V> {
    /// Builds a table from entries that are already deduplicated.
    ///
    /// Duplicate detection is the builder's job, not the table's; in debug
    /// builds a duplicate key trips an assertion while probing.
    ///
    /// Expected O(n); degrades to O(n²) under adversarial hash collisions,
    /// an accepted trade-off for a read-optimized immutable table.
    pub(crate) fn from_entries(entries: Vec<(K, V)>) -> Self {
        let capacity = policy::closed_table_size(entries.len(), DEFAULT_LOAD_FACTOR);
        let mask = capacity - 1;
        let mut slots: Vec<Option<(K, V)>> = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);

        let len = entries.len();
        for entry in entries {
            let mut index = (policy::smear(policy::hash_code(&entry.0)) as usize) & mask;
            loop {
                match &slots[index] {
                    None => {
                        slots[index] = Some(entry);
                        break;
                    }
                    Some(occupant) => {
                        #[cfg(debug_assertions)]
                        debug_assert!(
                            occupant.0 != entry.0,
                            "{DEDUPLICATED_INPUT_PANIC_MESSAGE}"
                        );
                        let _ = occupant;
                        index = (index + 1) & mask;
                    }
                }
            }
        }

        Self {
            slots: slots.into_boxed_slice(),
            mask,
            len,
        }
    }

    /// Probes for the entry stored under `key`.
    ///
    /// Starts at `smear(hash(key)) & mask` and walks forward, wrapping.
    /// Returns on the first key-equal slot, or `None` at the first empty
    /// slot (valid only under the no-tombstone invariant above).
    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut index = (policy::smear(policy::hash_code(key)) as usize) & self.mask;
        loop {
            match &self.slots[index] {
                None => return None,
                Some(entry) if entry.0.borrow() == key => return Some(entry),
                Some(_) => index = (index + 1) & self.mask,
            }
        }
    }
}

impl<K, V> OpenTable<K, V> {
    #[inline]
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// The raw slot array, in table-scan order. Used by iterators and the
    /// collection cursors.
    #[inline]
    pub(crate) const fn slots(&self) -> &[Option<(K, V)>] {
        &self.slots
    }
}

// =============================================================================
// Tests
// =============================================================================
