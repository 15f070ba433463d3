//! Frozen (immutable) hash map.
//!
//! This module provides [`FrozenHashMap`], an immutable hash map built once
//! through [`FrozenHashMapBuilder`] and backed by a write-once
//! open-addressing table.
//!
//! # Overview
//!
//! - O(1) expected `get` / `contains_key`
//! - O(1) `len` and `is_empty`
//! - O(1) `clone` for the hashed representation (the table is shared)
//! - deterministic iteration: singleton order for tiny maps, table-scan
//!   order otherwise
//!
//! A map with zero or one entries never allocates a table at all.
//!
//! # Examples
//!
//! ```rust
//! use congeal::frozen::FrozenHashMap;
//!
//! let mut builder = FrozenHashMap::builder();
//! builder.add("one", 1).add("two", 2);
//! let map = builder.build();
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("one"), Some(&1));
//!
//! // The builder stays usable; each build is independent.
//! builder.add("three", 3);
//! let larger = builder.build();
//! assert_eq!(map.len(), 2);
//! assert_eq!(larger.len(), 3);
//! ```
//!
//! # Duplicate Keys
//!
//! `build()` collapses duplicate keys deterministically: the entry keeps
//! the position (and key) of the **first** occurrence, and the value of the
//! **last** occurrence (last-write-wins).

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;

use smallvec::SmallVec;

use super::policy::{self, DEFAULT_LOAD_FACTOR, MAX_TABLE_SIZE};
use super::table::OpenTable;
use crate::ReferenceCounter;

#[cfg(feature = "cursor")]
use crate::cursor::{Characteristics, Cursor};

/// Entries kept inline in a builder's staging buffer before it spills to
/// the heap.
pub(crate) const INLINE_STAGING_CAPACITY: usize = 8;

// =============================================================================
// FrozenHashMap Definition
// =============================================================================

/// Internal representation, selected by `build()` from the deduplicated
/// entry count.
#[derive(Clone)]
enum MapInner<K, V> {
    Empty,
    Singleton((K, V)),
    Hashed(ReferenceCounter<OpenTable<K, V>>),
}

/// A frozen (immutable) hash map over a write-once open-addressing table.
///
/// `FrozenHashMap` is constructed exactly once, through a builder, a
/// factory, or `FromIterator`, and never changes afterwards. There is no
/// insert, no remove, and no mutable view of the backing storage; the
/// unsupported-mutation contract is enforced at the type level rather than
/// at runtime.
///
/// # Time Complexity
///
/// | Operation       | Complexity      |
/// |-----------------|-----------------|
/// | `get`           | O(1) expected   |
/// | `contains_key`  | O(1) expected   |
/// | `len`           | O(1)            |
/// | `iter`          | O(capacity)     |
/// | `clone`         | O(1) (hashed)   |
///
/// # Examples
///
/// ```rust
/// use congeal::frozen::FrozenHashMap;
///
/// let map = FrozenHashMap::singleton("answer", 42);
/// assert_eq!(map.get("answer"), Some(&42));
/// assert_eq!(map.get("question"), None);
/// ```
#[derive(Clone)]
pub struct FrozenHashMap<K, V> {
    inner: MapInner<K, V>,
}

impl<K, V> FrozenHashMap<K, V> {
    /// Creates an empty map. Allocates nothing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use congeal::frozen::FrozenHashMap;
    ///
    /// let map: FrozenHashMap<String, i32> = FrozenHashMap::new();
    /// assert!(map.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: MapInner::Empty,
        }
    }

    /// Returns the number of entries in the map.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.inner {
            MapInner::Empty => 0,
            MapInner::Singleton(_) => 1,
            MapInner::Hashed(table) => table.len(),
        }
    }

    /// Returns `true` if the map contains no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self.inner, MapInner::Empty)
    }

    /// Returns an iterator over the entries.
    ///
    /// Order is deterministic for a given map: singleton order for the
    /// small representations, table-scan order for the hashed one.
    #[must_use]
    pub fn iter(&self) -> FrozenHashMapIterator<'_, K, V> {
        let inner = match &self.inner {
            MapInner::Empty => IteratorInner::Empty,
            MapInner::Singleton(entry) => IteratorInner::Singleton(Some(entry)),
            MapInner::Hashed(table) => IteratorInner::Scan(table.slots().iter()),
        };
        FrozenHashMapIterator {
            inner,
            remaining: self.len(),
        }
    }

    /// Returns an iterator over the keys, in iteration order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over the values, in iteration order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }

    /// Returns an order-preserving, indexable view of the entries.
    ///
    /// The view borrows the map's backing storage; nothing is copied. See
    /// [`MapEntryListView`] for the cost model.
    #[inline]
    #[must_use]
    pub const fn entries_list(&self) -> MapEntryListView<'_, K, V> {
        MapEntryListView { map: self }
    }
}

impl<K: Hash + Eq, V> FrozenHashMap<K, V> {
    /// Creates a map containing a single entry. Allocates no table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use congeal::frozen::FrozenHashMap;
    ///
    /// let map = FrozenHashMap::singleton(1, "one");
    /// assert_eq!(map.len(), 1);
    /// ```
    #[inline]
    #[must_use]
    pub const fn singleton(key: K, value: V) -> Self {
        Self {
            inner: MapInner::Singleton((key, value)),
        }
    }

    /// Returns a reference to the value stored under `key`.
    ///
    /// The key may be any borrowed form of the map's key type, with `Hash`
    /// and `Eq` agreeing between the forms.
    ///
    /// # Complexity
    ///
    /// O(1) expected
    ///
    /// # Examples
    ///
    /// ```rust
    /// use congeal::frozen::FrozenHashMap;
    ///
    /// let map: FrozenHashMap<String, i32> =
    ///     [("one".to_string(), 1), ("two".to_string(), 2)].into_iter().collect();
    ///
    /// // Lookup by &str, no allocation
    /// assert_eq!(map.get("one"), Some(&1));
    /// assert_eq!(map.get("three"), None);
    /// ```
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match &self.inner {
            MapInner::Empty => None,
            MapInner::Singleton(entry) => {
                if entry.0.borrow() == key {
                    Some(&entry.1)
                } else {
                    None
                }
            }
            MapInner::Hashed(table) => table.get(key).map(|entry| &entry.1),
        }
    }

    /// Returns `true` if the map contains an entry for `key`.
    #[inline]
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }
}

impl<K: Clone + Hash + Eq, V: Clone> FrozenHashMap<K, V> {
    /// Creates a builder with the default staging capacity.
    #[inline]
    #[must_use]
    pub fn builder() -> FrozenHashMapBuilder<K, V> {
        FrozenHashMapBuilder::new()
    }

    /// Creates a builder sized for `expected_entries`.
    ///
    /// The hint sizes both the staging buffer and the initial
    /// deduplication table; it is a performance hint only and never a
    /// limit.
    #[inline]
    #[must_use]
    pub fn with_capacity_builder(expected_entries: usize) -> FrozenHashMapBuilder<K, V> {
        FrozenHashMapBuilder::with_capacity(expected_entries)
    }
}

#[cfg(feature = "cursor")]
impl<K, V> FrozenHashMap<K, V> {
    /// Returns a splittable cursor over the entries.
    ///
    /// The cursor reports DISTINCT, NONNULL and ORDERED, plus SIZED while
    /// it has not been split; split halves fall back to slot-count upper
    /// bounds for their size estimates.
    #[must_use]
    pub fn cursor(&self) -> FrozenHashMapCursor<'_, K, V> {
        let inner = match &self.inner {
            MapInner::Empty => MapCursorInner::Empty,
            MapInner::Singleton(entry) => MapCursorInner::Singleton(entry),
            MapInner::Hashed(table) => MapCursorInner::Scan(table.slots()),
        };
        FrozenHashMapCursor {
            inner,
            exact: Some(self.len()),
        }
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V> Default for FrozenHashMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, V: PartialEq> PartialEq for FrozenHashMap<K, V> {
    /// Structural equality over entry membership, independent of internal
    /// layout: two maps with the same entries are equal even when their
    /// tables were built in different orders or at different capacities.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<K: Hash + Eq, V: Eq> Eq for FrozenHashMap<K, V> {}

impl<K: Hash, V: Hash> Hash for FrozenHashMap<K, V> {
    /// Order-independent hash over the entry set, consistent with the
    /// layout-independent equality above.
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut sum = 0u64;
        for entry in self.iter() {
            sum = sum.wrapping_add(policy::hash64(&entry));
        }
        state.write_usize(self.len());
        state.write_u64(sum);
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for FrozenHashMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for FrozenHashMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("{")?;
        for (position, (key, value)) in self.iter().enumerate() {
            if position > 0 {
                formatter.write_str(", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        formatter.write_str("}")
    }
}

impl<K: Clone + Hash + Eq, V: Clone> FromIterator<(K, V)> for FrozenHashMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut builder = FrozenHashMapBuilder::new();
        builder.extend(iter);
        builder.build()
    }
}

impl<'a, K, V> IntoIterator for &'a FrozenHashMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = FrozenHashMapIterator<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Clone, V: Clone> IntoIterator for FrozenHashMap<K, V> {
    type Item = (K, V);
    type IntoIter = FrozenHashMapIntoIterator<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        let entries: Vec<(K, V)> = self
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        FrozenHashMapIntoIterator {
            inner: entries.into_iter(),
        }
    }
}

// =============================================================================
// Iterators
// =============================================================================

enum IteratorInner<'a, K, V> {
    Empty,
    Singleton(Option<&'a (K, V)>),
    Scan(std::slice::Iter<'a, Option<(K, V)>>),
}

/// Borrowing iterator over a [`FrozenHashMap`]'s entries.
pub struct FrozenHashMapIterator<'a, K, V> {
    inner: IteratorInner<'a, K, V>,
    remaining: usize,
}

impl<'a, K, V> Iterator for FrozenHashMapIterator<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            IteratorInner::Empty => None,
            IteratorInner::Singleton(entry) => entry.take().map(|entry| {
                self.remaining -= 1;
                (&entry.0, &entry.1)
            }),
            IteratorInner::Scan(slots) => {
                for slot in slots.by_ref() {
                    if let Some(entry) = slot {
                        self.remaining -= 1;
                        return Some((&entry.0, &entry.1));
                    }
                }
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for FrozenHashMapIterator<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

/// Owning iterator over a [`FrozenHashMap`]'s entries.
pub struct FrozenHashMapIntoIterator<K, V> {
    inner: std::vec::IntoIter<(K, V)>,
}

impl<K, V> Iterator for FrozenHashMapIntoIterator<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for FrozenHashMapIntoIterator<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

// =============================================================================
// Entry List View
// =============================================================================

/// An order-preserving view of a map's entries, without copying.
///
/// The view exposes the map's (deterministic) iteration order as an
/// indexed sequence. `get` walks the backing representation, so it is O(1)
/// for the singleton representation but O(capacity) for a hashed map; use
/// [`MapEntryListView::iter`] for full traversals.
pub struct MapEntryListView<'a, K, V> {
    map: &'a FrozenHashMap<K, V>,
}

impl<'a, K, V> MapEntryListView<'a, K, V> {
    /// Number of entries in the view.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the view is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the entry at `position` in iteration order.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<(&'a K, &'a V)> {
        self.map.iter().nth(position)
    }

    /// Iterates the view in order.
    #[must_use]
    pub fn iter(&self) -> FrozenHashMapIterator<'a, K, V> {
        self.map.iter()
    }
}

impl<'a, K, V> IntoIterator for &MapEntryListView<'a, K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = FrozenHashMapIterator<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for MapEntryListView<'_, K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

// =============================================================================
// Cursor
// =============================================================================

#[cfg(feature = "cursor")]
enum MapCursorInner<'a, K, V> {
    Empty,
    Singleton(&'a (K, V)),
    Scan(&'a [Option<(K, V)>]),
}

/// Splittable cursor over a [`FrozenHashMap`]'s entries.
///
/// Splitting halves the remaining slot range; both halves become
/// independent cursors over disjoint entry ranges, suitable for fork-join
/// traversal. After a split, exact sizing is lost and the size estimate
/// becomes a slot-count upper bound.
#[cfg(feature = "cursor")]
pub struct FrozenHashMapCursor<'a, K, V> {
    inner: MapCursorInner<'a, K, V>,
    /// Exact remaining count; `None` once the cursor has been split.
    exact: Option<usize>,
}

#[cfg(feature = "cursor")]
impl<'a, K, V> Cursor for FrozenHashMapCursor<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn try_advance(&mut self, mut visit: impl FnMut(Self::Item)) -> bool {
        match &mut self.inner {
            MapCursorInner::Empty => false,
            MapCursorInner::Singleton(entry) => {
                let entry = *entry;
                self.inner = MapCursorInner::Empty;
                if let Some(count) = self.exact.as_mut() {
                    *count -= 1;
                }
                visit((&entry.0, &entry.1));
                true
            }
            MapCursorInner::Scan(slots) => {
                while let Some((first, rest)) = slots.split_first() {
                    *slots = rest;
                    if let Some(entry) = first {
                        if let Some(count) = self.exact.as_mut() {
                            *count -= 1;
                        }
                        visit((&entry.0, &entry.1));
                        return true;
                    }
                }
                false
            }
        }
    }

    fn try_split(&mut self) -> Option<Self> {
        match &mut self.inner {
            MapCursorInner::Scan(slots) if slots.len() >= 2 => {
                let middle = slots.len() / 2;
                let (front, back) = slots.split_at(middle);
                *slots = back;
                self.exact = None;
                Some(Self {
                    inner: MapCursorInner::Scan(front),
                    exact: None,
                })
            }
            _ => None,
        }
    }

    fn estimated_remaining(&self) -> u64 {
        self.exact.map_or_else(
            || match &self.inner {
                MapCursorInner::Empty => 0,
                MapCursorInner::Singleton(_) => 1,
                MapCursorInner::Scan(slots) => slots.len() as u64,
            },
            |count| count as u64,
        )
    }

    fn characteristics(&self) -> Characteristics {
        let base = Characteristics::DISTINCT
            .with(Characteristics::NONNULL)
            .with(Characteristics::ORDERED);
        if self.exact.is_some() {
            base.with(Characteristics::SIZED)
        } else {
            base
        }
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builder for [`FrozenHashMap`].
///
/// Accumulates entries in a staging buffer (inline for the first
/// few entries, heap-backed afterwards, growing
/// geometrically and never shrinking). `build()` deduplicates the staged
/// entries and freezes a map; the builder itself stays usable, so a single
/// builder can produce a whole family of independent maps.
///
/// # Copy-on-Write Staging
///
/// Cloning a builder shares the staging buffer. The buffer is copied
/// lazily, on the next `add` of whichever side mutates first, never at
/// `build()` time, so a builder that is cloned (or discarded after one
/// build) pays nothing.
///
/// # Concurrency
///
/// Builders are single-owner: concurrent `add` calls are not supported and
/// not guarded against. This is a documented caller obligation.
///
/// # Examples
///
/// ```rust
/// use congeal::frozen::FrozenHashMap;
///
/// let mut builder = FrozenHashMap::builder();
/// builder.add(1, "one").add(2, "two");
///
/// let first = builder.build();
/// let second = builder.build();
/// assert_eq!(first, second);
/// ```
#[derive(Clone)]
pub struct FrozenHashMapBuilder<K, V> {
    staging: ReferenceCounter<SmallVec<[(K, V); INLINE_STAGING_CAPACITY]>>,
    expected_entries: usize,
}

impl<K: Clone + Hash + Eq, V: Clone> FrozenHashMapBuilder<K, V> {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            staging: ReferenceCounter::new(SmallVec::new()),
            expected_entries: INLINE_STAGING_CAPACITY,
        }
    }

    /// Creates a builder expecting roughly `expected_entries` distinct
    /// entries. A low hint only costs an extra deduplication-table rebuild
    /// or two; a high hint only costs memory.
    #[must_use]
    pub fn with_capacity(expected_entries: usize) -> Self {
        Self {
            staging: ReferenceCounter::new(SmallVec::with_capacity(expected_entries)),
            expected_entries: expected_entries.max(2),
        }
    }

    /// Number of staged (not yet deduplicated) entries.
    #[inline]
    #[must_use]
    pub fn staged_len(&self) -> usize {
        self.staging.len()
    }

    /// Stages one entry.
    ///
    /// If the staging buffer is currently shared with a clone of this
    /// builder, it is copied now: copy-on-next-mutation, so `build()` and
    /// `clone()` themselves stay allocation-free.
    pub fn add(&mut self, key: K, value: V) -> &mut Self {
        ReferenceCounter::make_mut(&mut self.staging).push((key, value));
        self
    }

    /// Stages every entry from `entries`.
    pub fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, entries: I) -> &mut Self {
        ReferenceCounter::make_mut(&mut self.staging).extend(entries);
        self
    }

    /// Deduplicates the staged entries and freezes a map.
    ///
    /// Duplicate keys keep the first occurrence's position and key, with
    /// the last staged value (last-write-wins). Zero or one distinct
    /// entries produce the table-free fast-path representations.
    ///
    /// `build()` borrows the builder: call it as many times as needed;
    /// every produced map is independent of the builder and of its
    /// siblings.
    #[must_use]
    pub fn build(&self) -> FrozenHashMap<K, V> {
        let mut distinct = self.deduplicate();
        match distinct.len() {
            0 => FrozenHashMap::new(),
            1 => {
                let (key, value) = distinct.remove(0);
                FrozenHashMap::singleton(key, value)
            }
            _ => FrozenHashMap {
                inner: MapInner::Hashed(ReferenceCounter::new(OpenTable::from_entries(distinct))),
            },
        }
    }

    /// Collapses duplicate keys using an index probe table over the
    /// distinct-entry list.
    ///
    /// The probe table starts at the builder's expected capacity and is
    /// rebuilt at doubled capacity whenever an insert would push it over
    /// the load factor, before that insert completes.
    fn deduplicate(&self) -> Vec<(K, V)> {
        let staging = &*self.staging;
        let mut distinct: Vec<(K, V)> = Vec::with_capacity(staging.len());
        let mut capacity = policy::closed_table_size(self.expected_entries, DEFAULT_LOAD_FACTOR);
        let mut index_table: Vec<Option<usize>> = vec![None; capacity];

        for (key, value) in staging {
            if policy::needs_resizing(distinct.len() + 1, capacity, DEFAULT_LOAD_FACTOR) {
                capacity = (capacity << 1).min(MAX_TABLE_SIZE);
                index_table = rebuild_index_table(&distinct, capacity);
            }

            let mask = capacity - 1;
            let mut index = (policy::smear(policy::hash_code(key)) as usize) & mask;
            loop {
                match index_table[index] {
                    None => {
                        index_table[index] = Some(distinct.len());
                        distinct.push((key.clone(), value.clone()));
                        break;
                    }
                    Some(position) if distinct[position].0 == *key => {
                        // Last write wins; the position (and key) of the
                        // first occurrence are kept.
                        distinct[position].1 = value.clone();
                        break;
                    }
                    Some(_) => index = (index + 1) & mask,
                }
            }
        }

        distinct
    }
}

fn rebuild_index_table<K: Hash, V>(distinct: &[(K, V)], capacity: usize) -> Vec<Option<usize>> {
    let mask = capacity - 1;
    let mut index_table: Vec<Option<usize>> = vec![None; capacity];
    for (position, (key, _)) in distinct.iter().enumerate() {
        let mut index = (policy::smear(policy::hash_code(key)) as usize) & mask;
        while index_table[index].is_some() {
            index = (index + 1) & mask;
        }
        index_table[index] = Some(position);
    }
    index_table
}

impl<K: Clone + Hash + Eq, V: Clone> Default for FrozenHashMapBuilder<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K: serde::Serialize, V: serde::Serialize> serde::Serialize for FrozenHashMap<K, V> {
    /// Serializes the logical entries only; the table layout is never
    /// persisted.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
struct FrozenHashMapVisitor<K, V> {
    marker: std::marker::PhantomData<(K, V)>,
}

#[cfg(feature = "serde")]
impl<K, V> FrozenHashMapVisitor<K, V> {
    const fn new() -> Self {
        Self {
            marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::de::Visitor<'de> for FrozenHashMapVisitor<K, V>
where
    K: serde::Deserialize<'de> + Clone + Hash + Eq,
    V: serde::Deserialize<'de> + Clone,
{
    type Value = FrozenHashMap<K, V>;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut builder = match access.size_hint() {
            Some(expected) => FrozenHashMapBuilder::with_capacity(expected),
            None => FrozenHashMapBuilder::new(),
        };
        while let Some((key, value)) = access.next_entry()? {
            builder.add(key, value);
        }
        Ok(builder.build())
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::Deserialize<'de> for FrozenHashMap<K, V>
where
    K: serde::Deserialize<'de> + Clone + Hash + Eq,
    V: serde::Deserialize<'de> + Clone,
{
    /// Reconstructs an equivalent map from its logical entries; the
    /// rebuilt table layout is free to differ from the original's.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(FrozenHashMapVisitor::new())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // =========================================================================
    // Construction and fast paths
    // =========================================================================

    #[rstest]
    fn test_new_creates_empty() {
        let map: FrozenHashMap<i32, i32> = FrozenHashMap::new();
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
        assert_eq!(map.get(&1), None);
    }

    #[rstest]
    fn test_singleton() {
        let map = FrozenHashMap::singleton("key", 42);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("key"), Some(&42));
        assert_eq!(map.get("other"), None);
    }

    #[rstest]
    fn test_builder_empty_build_uses_empty_representation() {
        let builder: FrozenHashMapBuilder<i32, i32> = FrozenHashMap::builder();
        let map = builder.build();
        assert!(map.is_empty());
        assert!(matches!(map.inner, MapInner::Empty));
    }

    #[rstest]
    fn test_builder_single_entry_skips_table() {
        let mut builder = FrozenHashMap::builder();
        builder.add(1, "one");
        let map = builder.build();
        assert!(matches!(map.inner, MapInner::Singleton(_)));
        assert_eq!(map.get(&1), Some(&"one"));
    }

    #[rstest]
    fn test_builder_duplicates_collapsing_to_one_skip_table() {
        let mut builder = FrozenHashMap::builder();
        builder.add(7, "a").add(7, "b").add(7, "c");
        let map = builder.build();
        assert!(matches!(map.inner, MapInner::Singleton(_)));
        assert_eq!(map.get(&7), Some(&"c"));
    }

    // =========================================================================
    // Deduplication
    // =========================================================================

    #[rstest]
    fn test_last_write_wins() {
        let mut builder = FrozenHashMap::builder();
        builder.add("k", 1).add("other", 10).add("k", 2);
        let map = builder.build();

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("k"), Some(&2));
    }

    #[rstest]
    fn test_duplicate_key_keeps_first_position() {
        let mut builder = FrozenHashMap::builder();
        builder.add("a", 1).add("b", 2).add("a", 3);
        let map = builder.build();

        // The entry for "a" keeps its first-occurrence position in the
        // deduplicated order fed to the table, with the last value.
        let entries: Vec<(&&str, &i32)> = map.iter().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(map.get("a"), Some(&3));
        assert_eq!(map.get("b"), Some(&2));
    }

    #[rstest]
    fn test_dedup_resizes_past_capacity_hint() {
        // Hint of 2 forces the dedup index table to rebuild repeatedly.
        let mut builder = FrozenHashMap::with_capacity_builder(2);
        for key in 0..100 {
            builder.add(key, key * 10);
        }
        let map = builder.build();
        assert_eq!(map.len(), 100);
        for key in 0..100 {
            assert_eq!(map.get(&key), Some(&(key * 10)));
        }
    }

    // =========================================================================
    // Builder reuse and copy-on-write
    // =========================================================================

    #[rstest]
    fn test_build_is_repeatable_and_independent() {
        let mut builder = FrozenHashMap::builder();
        builder.add(1, "one").add(2, "two");

        let first = builder.build();
        let second = builder.build();

        assert_eq!(first, second);

        builder.add(3, "three");
        let third = builder.build();

        assert_eq!(first.len(), 2);
        assert_eq!(third.len(), 3);
    }

    #[rstest]
    fn test_cloned_builders_do_not_alias() {
        let mut original = FrozenHashMap::builder();
        original.add(1, "one");

        let mut forked = original.clone();
        forked.add(2, "two");
        original.add(3, "three");

        let from_original = original.build();
        let from_forked = forked.build();

        assert_eq!(from_original.len(), 2);
        assert!(from_original.contains_key(&3));
        assert!(!from_original.contains_key(&2));

        assert_eq!(from_forked.len(), 2);
        assert!(from_forked.contains_key(&2));
        assert!(!from_forked.contains_key(&3));
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    #[rstest]
    fn test_get_over_hashed_representation() {
        let map: FrozenHashMap<i32, i32> = (0..500).map(|i| (i, i * i)).collect();
        assert_eq!(map.len(), 500);
        for key in 0..500 {
            assert_eq!(map.get(&key), Some(&(key * key)));
        }
        assert_eq!(map.get(&500), None);
        assert_eq!(map.get(&-1), None);
    }

    #[rstest]
    fn test_get_by_borrowed_key() {
        let map: FrozenHashMap<String, i32> = [("alpha".to_string(), 1)].into_iter().collect();
        assert_eq!(map.get("alpha"), Some(&1));
        assert!(!map.contains_key("beta"));
    }

    // =========================================================================
    // Iteration
    // =========================================================================

    #[rstest]
    fn test_iteration_is_deterministic_and_complete() {
        let map: FrozenHashMap<i32, i32> = (0..50).map(|i| (i, -i)).collect();

        let first_pass: Vec<(&i32, &i32)> = map.iter().collect();
        let second_pass: Vec<(&i32, &i32)> = map.iter().collect();
        assert_eq!(first_pass, second_pass);
        assert_eq!(first_pass.len(), 50);
    }

    #[rstest]
    fn test_iterator_is_exact_size() {
        let map: FrozenHashMap<i32, i32> = (0..10).map(|i| (i, i)).collect();
        let mut iterator = map.iter();
        assert_eq!(iterator.len(), 10);
        iterator.next();
        assert_eq!(iterator.len(), 9);
    }

    #[rstest]
    fn test_into_iterator_owns_entries() {
        let map: FrozenHashMap<i32, String> =
            [(1, "one".to_string()), (2, "two".to_string())].into_iter().collect();
        let mut owned: Vec<(i32, String)> = map.into_iter().collect();
        owned.sort();
        assert_eq!(owned, vec![(1, "one".to_string()), (2, "two".to_string())]);
    }

    #[rstest]
    fn test_keys_and_values() {
        let map: FrozenHashMap<i32, i32> = [(1, 10), (2, 20)].into_iter().collect();
        let mut keys: Vec<i32> = map.keys().copied().collect();
        let mut values: Vec<i32> = map.values().copied().collect();
        keys.sort_unstable();
        values.sort_unstable();
        assert_eq!(keys, vec![1, 2]);
        assert_eq!(values, vec![10, 20]);
    }

    // =========================================================================
    // Equality and hashing
    // =========================================================================

    #[rstest]
    fn test_equality_is_layout_independent() {
        // Same entries staged in different orders with different capacity
        // hints: tables differ, maps must not.
        let mut forward = FrozenHashMap::with_capacity_builder(64);
        let mut backward = FrozenHashMap::with_capacity_builder(2);
        for key in 0..40 {
            forward.add(key, key * 2);
        }
        for key in (0..40).rev() {
            backward.add(key, key * 2);
        }

        assert_eq!(forward.build(), backward.build());
    }

    #[rstest]
    fn test_hash_is_layout_independent() {
        use std::collections::hash_map::DefaultHasher;

        fn hash_of<T: Hash>(value: &T) -> u64 {
            let mut hasher = DefaultHasher::new();
            value.hash(&mut hasher);
            hasher.finish()
        }

        let forward: FrozenHashMap<i32, i32> = (0..30).map(|i| (i, i)).collect();
        let backward: FrozenHashMap<i32, i32> = (0..30).rev().map(|i| (i, i)).collect();

        assert_eq!(hash_of(&forward), hash_of(&backward));
    }

    #[rstest]
    fn test_inequality_on_differing_values() {
        let left: FrozenHashMap<i32, i32> = [(1, 1)].into_iter().collect();
        let right: FrozenHashMap<i32, i32> = [(1, 2)].into_iter().collect();
        assert_ne!(left, right);
    }

    // =========================================================================
    // Entry list view
    // =========================================================================

    #[rstest]
    fn test_entries_list_matches_iteration_order() {
        let map: FrozenHashMap<i32, i32> = (0..20).map(|i| (i, i)).collect();
        let view = map.entries_list();

        assert_eq!(view.len(), 20);
        let by_index: Vec<(&i32, &i32)> = (0..view.len()).map(|i| view.get(i).unwrap()).collect();
        let by_iteration: Vec<(&i32, &i32)> = map.iter().collect();
        assert_eq!(by_index, by_iteration);
        assert_eq!(view.get(20), None);
    }

    // =========================================================================
    // Display / Debug
    // =========================================================================

    #[rstest]
    fn test_display_empty_map() {
        let map: FrozenHashMap<i32, i32> = FrozenHashMap::new();
        assert_eq!(format!("{map}"), "{}");
    }

    #[rstest]
    fn test_display_singleton_map() {
        let map = FrozenHashMap::singleton(1, "one");
        assert_eq!(format!("{map}"), "{1: one}");
    }
}
