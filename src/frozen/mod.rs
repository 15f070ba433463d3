//! Frozen (immutable-after-construction) hash collections.
//!
//! This module provides hash collections that are built exactly once and
//! never change afterwards:
//!
//! - [`FrozenHashMap`]: immutable hash map over a write-once open-addressing
//!   table
//! - [`FrozenHashSet`]: immutable hash set, a thin wrapper around
//!   `FrozenHashMap<T, ()>`
//!
//! # Construction Pipeline
//!
//! A [`FrozenHashMapBuilder`] (or [`FrozenHashSetBuilder`]) accumulates raw
//! entries in a staging buffer. `build()` deduplicates them, picks a
//! representation, and freezes the result:
//!
//! - 0 entries: an empty representation, no allocation
//! - 1 entry: a singleton representation, no table
//! - otherwise: a linearly-probed open-addressing table sized by the hash
//!   policy in [`policy`]
//!
//! Builders are reusable: `build()` borrows the builder, so it may be called
//! repeatedly, and further `add` calls keep producing successors. Cloned
//! builders share their staging buffer copy-on-write, so a clone costs
//! nothing until one side mutates.
//!
//! # Examples
//!
//! ## `FrozenHashSet`
//!
//! ```rust
//! use congeal::frozen::FrozenHashSet;
//!
//! let set: FrozenHashSet<i32> = [1, 2, 2, 3].into_iter().collect();
//!
//! assert_eq!(set.len(), 3);
//! assert!(set.contains(&2));
//! assert!(!set.contains(&4));
//! ```
//!
//! ## `FrozenHashMap`
//!
//! ```rust
//! use congeal::frozen::FrozenHashMap;
//!
//! let mut builder = FrozenHashMap::builder();
//! builder.add("one", 1).add("two", 2).add("one", 100);
//! let map = builder.build();
//!
//! // Duplicate keys collapse: the last value wins.
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("one"), Some(&100));
//! ```
//!
//! # Equality and Hashing Contract
//!
//! Keys and elements must uphold `a == b` implies `hash(a) == hash(b)`.
//! The engine cannot detect a violation; it silently corrupts membership
//! results. This is a caller obligation, exactly as with the standard
//! library's hash collections.

pub mod policy;

mod table;

mod hashmap;
mod hashset;

pub use hashmap::FrozenHashMap;
pub use hashmap::FrozenHashMapBuilder;
pub use hashmap::FrozenHashMapIntoIterator;
pub use hashmap::FrozenHashMapIterator;
pub use hashmap::MapEntryListView;
pub use hashset::FrozenHashSet;
pub use hashset::FrozenHashSetBuilder;
pub use hashset::FrozenHashSetIntoIterator;
pub use hashset::FrozenHashSetIterator;
pub use hashset::SetListView;

#[cfg(feature = "cursor")]
pub use hashmap::FrozenHashMapCursor;
#[cfg(feature = "cursor")]
pub use hashset::FrozenHashSetCursor;
