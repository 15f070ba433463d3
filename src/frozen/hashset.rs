//! Frozen (immutable) hash set.
//!
//! This module provides [`FrozenHashSet`], an immutable hash set that uses
//! [`FrozenHashMap`] internally: a set is a map from its elements to `()`.
//!
//! # Overview
//!
//! - O(1) expected `contains`
//! - O(1) `len` and `is_empty`
//! - built once via [`FrozenHashSetBuilder`]; never mutated afterwards
//! - iteration order is deterministic for a given set (array order for the
//!   table-free fast paths, table-scan order for the hashed representation)
//!
//! # Examples
//!
//! ```rust
//! use congeal::frozen::FrozenHashSet;
//!
//! let mut builder = FrozenHashSet::builder();
//! builder.add(1).add(2).add(2).add(3);
//! let set = builder.build();
//!
//! assert_eq!(set.len(), 3);
//! assert!(set.contains(&2));
//! assert!(!set.contains(&4));
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;

use super::hashmap::{
    FrozenHashMap, FrozenHashMapBuilder, FrozenHashMapIntoIterator, FrozenHashMapIterator,
};

#[cfg(feature = "cursor")]
use super::hashmap::FrozenHashMapCursor;
#[cfg(feature = "cursor")]
use crate::cursor::{Characteristics, Cursor};

// =============================================================================
// FrozenHashSet Definition
// =============================================================================

/// A frozen (immutable) hash set backed by [`FrozenHashMap`].
///
/// Deduplication happens at `build()`: equal elements collapse to the
/// first occurrence. Zero- and one-element sets use table-free
/// representations.
///
/// # Time Complexity
///
/// | Operation  | Complexity    |
/// |------------|---------------|
/// | `contains` | O(1) expected |
/// | `len`      | O(1)          |
/// | `iter`     | O(capacity)   |
/// | `clone`    | O(1) (hashed) |
///
/// # Examples
///
/// ```rust
/// use congeal::frozen::FrozenHashSet;
///
/// let set = FrozenHashSet::singleton(42);
/// assert!(set.contains(&42));
/// assert!(!set.contains(&0));
/// ```
#[derive(Clone)]
pub struct FrozenHashSet<T> {
    inner: FrozenHashMap<T, ()>,
}

impl<T> FrozenHashSet<T> {
    /// Creates an empty set. Allocates nothing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use congeal::frozen::FrozenHashSet;
    ///
    /// let set: FrozenHashSet<i32> = FrozenHashSet::new();
    /// assert!(set.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: FrozenHashMap::new(),
        }
    }

    /// Returns the number of elements in the set.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if the set contains no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns an iterator over the elements, in the set's deterministic
    /// iteration order.
    #[must_use]
    pub fn iter(&self) -> FrozenHashSetIterator<'_, T> {
        FrozenHashSetIterator {
            inner: self.inner.iter(),
        }
    }

    /// Returns an order-preserving, indexable view of the elements.
    ///
    /// The view borrows the set's backing storage; nothing is copied. See
    /// [`SetListView`] for the cost model.
    #[inline]
    #[must_use]
    pub const fn as_list(&self) -> SetListView<'_, T> {
        SetListView { set: self }
    }
}

impl<T: Hash + Eq> FrozenHashSet<T> {
    /// Creates a set containing a single element. Allocates no table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use congeal::frozen::FrozenHashSet;
    ///
    /// let set = FrozenHashSet::singleton(42);
    /// assert_eq!(set.len(), 1);
    /// ```
    #[inline]
    #[must_use]
    pub const fn singleton(element: T) -> Self {
        Self {
            inner: FrozenHashMap::singleton(element, ()),
        }
    }

    /// Returns `true` if the set contains `element`.
    ///
    /// The element may be any borrowed form of the set's element type,
    /// with `Hash` and `Eq` agreeing between the forms.
    ///
    /// # Complexity
    ///
    /// O(1) expected
    ///
    /// # Examples
    ///
    /// ```rust
    /// use congeal::frozen::FrozenHashSet;
    ///
    /// let set: FrozenHashSet<String> =
    ///     ["hello".to_string(), "world".to_string()].into_iter().collect();
    ///
    /// // Lookup by &str, no allocation
    /// assert!(set.contains("hello"));
    /// assert!(!set.contains("other"));
    /// ```
    #[inline]
    #[must_use]
    pub fn contains<Q>(&self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.contains_key(element)
    }
}

impl<T: Clone + Hash + Eq> FrozenHashSet<T> {
    /// Creates a builder with the default staging capacity.
    #[inline]
    #[must_use]
    pub fn builder() -> FrozenHashSetBuilder<T> {
        FrozenHashSetBuilder::new()
    }

    /// Creates a builder sized for `expected_elements`. A performance hint
    /// only, never a limit.
    #[inline]
    #[must_use]
    pub fn with_capacity_builder(expected_elements: usize) -> FrozenHashSetBuilder<T> {
        FrozenHashSetBuilder::with_capacity(expected_elements)
    }
}

#[cfg(feature = "cursor")]
impl<T> FrozenHashSet<T> {
    /// Returns a splittable cursor over the elements.
    ///
    /// Reports DISTINCT, NONNULL and ORDERED, plus SIZED while unsplit;
    /// see [`FrozenHashSetCursor`].
    #[must_use]
    pub fn cursor(&self) -> FrozenHashSetCursor<'_, T> {
        FrozenHashSetCursor {
            inner: self.inner.cursor(),
        }
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for FrozenHashSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Hash + Eq> PartialEq for FrozenHashSet<T> {
    /// Structural equality over element membership, independent of
    /// internal layout.
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T: Hash + Eq> Eq for FrozenHashSet<T> {}

impl<T: Hash> Hash for FrozenHashSet<T> {
    /// Order-independent hash over the element set.
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for FrozenHashSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for FrozenHashSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("{")?;
        for (position, element) in self.iter().enumerate() {
            if position > 0 {
                formatter.write_str(", ")?;
            }
            write!(formatter, "{element}")?;
        }
        formatter.write_str("}")
    }
}

impl<T: Clone + Hash + Eq> FromIterator<T> for FrozenHashSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut builder = FrozenHashSetBuilder::new();
        builder.extend(iter);
        builder.build()
    }
}

impl<'a, T> IntoIterator for &'a FrozenHashSet<T> {
    type Item = &'a T;
    type IntoIter = FrozenHashSetIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Clone> IntoIterator for FrozenHashSet<T> {
    type Item = T;
    type IntoIter = FrozenHashSetIntoIterator<T>;

    fn into_iter(self) -> Self::IntoIter {
        FrozenHashSetIntoIterator {
            inner: self.inner.into_iter(),
        }
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Borrowing iterator over a [`FrozenHashSet`]'s elements.
pub struct FrozenHashSetIterator<'a, T> {
    inner: FrozenHashMapIterator<'a, T, ()>,
}

impl<'a, T> Iterator for FrozenHashSetIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(element, ())| element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for FrozenHashSetIterator<'_, T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

/// Owning iterator over a [`FrozenHashSet`]'s elements.
pub struct FrozenHashSetIntoIterator<T> {
    inner: FrozenHashMapIntoIterator<T, ()>,
}

impl<T> Iterator for FrozenHashSetIntoIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(element, ())| element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for FrozenHashSetIntoIterator<T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

// =============================================================================
// List View
// =============================================================================

/// An order-preserving view of a set's elements, without copying.
///
/// `get` walks the backing representation: O(1) for the singleton
/// representation, O(capacity) for a hashed set. Use [`SetListView::iter`]
/// for full traversals.
pub struct SetListView<'a, T> {
    set: &'a FrozenHashSet<T>,
}

impl<'a, T> SetListView<'a, T> {
    /// Number of elements in the view.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.set.len()
    }

    /// Returns `true` if the view is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Returns the element at `position` in iteration order.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&'a T> {
        self.set.iter().nth(position)
    }

    /// Iterates the view in order.
    #[must_use]
    pub fn iter(&self) -> FrozenHashSetIterator<'a, T> {
        self.set.iter()
    }
}

impl<'a, T> IntoIterator for &SetListView<'a, T> {
    type Item = &'a T;
    type IntoIter = FrozenHashSetIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for SetListView<'_, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

// =============================================================================
// Cursor
// =============================================================================

/// Splittable cursor over a [`FrozenHashSet`]'s elements.
///
/// Wraps the underlying map cursor; splitting and sizing behave exactly as
/// for [`FrozenHashMapCursor`].
#[cfg(feature = "cursor")]
pub struct FrozenHashSetCursor<'a, T> {
    inner: FrozenHashMapCursor<'a, T, ()>,
}

#[cfg(feature = "cursor")]
impl<'a, T> Cursor for FrozenHashSetCursor<'a, T> {
    type Item = &'a T;

    fn try_advance(&mut self, mut visit: impl FnMut(Self::Item)) -> bool {
        self.inner.try_advance(|(element, ())| visit(element))
    }

    fn try_split(&mut self) -> Option<Self> {
        self.inner.try_split().map(|inner| Self { inner })
    }

    fn estimated_remaining(&self) -> u64 {
        self.inner.estimated_remaining()
    }

    fn characteristics(&self) -> Characteristics {
        self.inner.characteristics()
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builder for [`FrozenHashSet`].
///
/// A thin wrapper over [`FrozenHashMapBuilder`] staging `(element, ())`
/// entries, with the same copy-on-write staging buffer and reusable
/// `build()`. Duplicate elements collapse to the first occurrence.
///
/// Builders are single-owner: concurrent `add` calls are not supported and
/// not guarded against.
///
/// # Examples
///
/// ```rust
/// use congeal::frozen::FrozenHashSet;
///
/// let mut builder = FrozenHashSet::builder();
/// builder.add("a").add("a").add("b");
/// let set = builder.build();
///
/// assert_eq!(set.len(), 2);
/// ```
#[derive(Clone)]
pub struct FrozenHashSetBuilder<T> {
    inner: FrozenHashMapBuilder<T, ()>,
}

impl<T: Clone + Hash + Eq> FrozenHashSetBuilder<T> {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: FrozenHashMapBuilder::new(),
        }
    }

    /// Creates a builder expecting roughly `expected_elements` distinct
    /// elements.
    #[must_use]
    pub fn with_capacity(expected_elements: usize) -> Self {
        Self {
            inner: FrozenHashMapBuilder::with_capacity(expected_elements),
        }
    }

    /// Number of staged (not yet deduplicated) elements.
    #[inline]
    #[must_use]
    pub fn staged_len(&self) -> usize {
        self.inner.staged_len()
    }

    /// Stages one element.
    pub fn add(&mut self, element: T) -> &mut Self {
        self.inner.add(element, ());
        self
    }

    /// Stages every element from `elements`.
    pub fn extend<I: IntoIterator<Item = T>>(&mut self, elements: I) -> &mut Self {
        self.inner
            .extend(elements.into_iter().map(|element| (element, ())));
        self
    }

    /// Deduplicates the staged elements and freezes a set.
    ///
    /// Equal elements collapse to the first occurrence. May be called
    /// repeatedly; every produced set is independent.
    #[must_use]
    pub fn build(&self) -> FrozenHashSet<T> {
        FrozenHashSet {
            inner: self.inner.build(),
        }
    }
}

impl<T: Clone + Hash + Eq> Default for FrozenHashSetBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for FrozenHashSet<T> {
    /// Serializes the logical elements only; table layout is never
    /// persisted.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
struct FrozenHashSetVisitor<T> {
    marker: std::marker::PhantomData<T>,
}

#[cfg(feature = "serde")]
impl<T> FrozenHashSetVisitor<T> {
    const fn new() -> Self {
        Self {
            marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::de::Visitor<'de> for FrozenHashSetVisitor<T>
where
    T: serde::Deserialize<'de> + Clone + Hash + Eq,
{
    type Value = FrozenHashSet<T>;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut builder = match seq.size_hint() {
            Some(expected) => FrozenHashSetBuilder::with_capacity(expected),
            None => FrozenHashSetBuilder::new(),
        };
        while let Some(element) = seq.next_element()? {
            builder.add(element);
        }
        Ok(builder.build())
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for FrozenHashSet<T>
where
    T: serde::Deserialize<'de> + Clone + Hash + Eq,
{
    /// Reconstructs an equivalent set from its logical elements.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(FrozenHashSetVisitor::new())
    }
}

// =============================================================================
// Tests
// =============================================================================


#[cfg(all(test, feature = "cursor"))]
mod cursor_tests {
    use super::*;
    use crate::cursor::drain;
    use rstest::rstest;

    #[rstest]
    fn test_cursor_traversal_matches_iteration() {
        let set: FrozenHashSet<i32> = (0..64).collect();
        let cursed: Vec<i32> = drain(set.cursor()).into_iter().copied().collect();
        let iterated: Vec<i32> = set.iter().copied().collect();
        assert_eq!(cursed, iterated);
    }

    #[rstest]
    fn test_cursor_split_concatenation_preserves_order() {
        let set: FrozenHashSet<i32> = (0..64).collect();

        let unsplit: Vec<i32> = drain(set.cursor()).into_iter().copied().collect();

        let mut back = set.cursor();
        let front = back.try_split().expect("large cursor must split");
        let mut combined: Vec<i32> = drain(front).into_iter().copied().collect();
        combined.extend(drain(back).into_iter().copied());

        assert_eq!(combined, unsplit);
    }
}
