//! Splittable traversal cursors and lazy combinators.
//!
//! A [`Cursor`] is an in-progress traversal of a sequence that can be
//! decomposed for parallel consumption: [`Cursor::try_split`] carves off
//! the earlier half of the remaining elements as an independent cursor,
//! and neither half shares mutable state with the other afterwards. The
//! intended concurrency model is fork-join over immutable snapshots: no
//! locks, no blocking, no cancellation.
//!
//! Combinators wrap cursors lazily, without materializing intermediate
//! containers:
//!
//! - [`IndexedCursor`]: produces `function(i)` over an index range
//! - [`SliceCursor`]: borrows a slice, the canonical index-range splitter
//! - [`Mapped`]: transforms each element of a source cursor
//! - [`Filtered`]: keeps elements accepted by a predicate
//! - [`FlatMapped`]: flattens per-element inner cursors
//!
//! Every cursor advertises a [`Characteristics`] set describing the
//! guarantees downstream consumers may rely on. Combinators strip the
//! guarantees they cannot preserve and reject the ones they can never
//! provide; requesting an impossible combination is a caller-contract
//! violation and panics at construction.
//!
//! # Example
//!
//! ```rust
//! use congeal::cursor::{drain, Cursor, Filtered, SliceCursor};
//!
//! let values = [1, 2, 3, 4, 5, 6];
//! let evens = Filtered::new(SliceCursor::new(&values), |value: &&i32| **value % 2 == 0);
//!
//! assert_eq!(drain(evens), vec![&2, &4, &6]);
//! ```

use std::fmt;

mod filtered;
mod flat_mapped;
mod indexed;
mod mapped;
mod slice;

pub use filtered::Filtered;
pub use flat_mapped::FlatMapped;
pub use indexed::{Comparator, IndexedCursor};
pub use mapped::Mapped;
pub use slice::SliceCursor;

/// Size estimate for cursors whose remaining element count is unknowable
/// without traversal.
///
/// None of the cursors in this crate report it: every built-in source
/// knows at least a slot- or slice-count bound, and even [`Filtered`]
/// reports its source's bound. It is part of the
/// [`Cursor::estimated_remaining`] contract for implementations over
/// sources with no usable bound at all.
pub const REMAINING_UNKNOWN: u64 = u64::MAX;

pub(crate) const FLAT_MAP_CHARACTERISTICS_PANIC_MESSAGE: &str =
    "a flat-mapped cursor cannot guarantee SUBSIZED or SORTED";

pub(crate) const COMPARATOR_REQUIRES_SORTED_PANIC_MESSAGE: &str =
    "a comparator requires the SORTED characteristic";

// =============================================================================
// Characteristics
// =============================================================================

/// Named capability flags a cursor advertises to its consumers.
///
/// A replacement for a duck-typed characteristics bitset: flags are a
/// closed, named set, and combinator constructors check combinations
/// explicitly instead of masking silently.
///
/// | Flag       | Guarantee                                               |
/// |------------|---------------------------------------------------------|
/// | `ORDERED`  | a defined encounter order exists and is preserved       |
/// | `DISTINCT` | no two produced elements are equal                      |
/// | `SORTED`   | encounter order follows a comparator (or natural order) |
/// | `SIZED`    | `estimated_remaining` is exact before traversal         |
/// | `SUBSIZED` | every split half is itself SIZED                        |
/// | `NONNULL`  | no produced element is an absent-value sentinel         |
///
/// `NONNULL` is trivially satisfied by Rust's type system for the
/// collections in this crate; it is retained because combinators strip and
/// propagate it, and sources built over foreign sequences may not provide
/// it.
///
/// # Examples
///
/// ```rust
/// use congeal::cursor::Characteristics;
///
/// let flags = Characteristics::ORDERED | Characteristics::SIZED;
/// assert!(flags.contains(Characteristics::ORDERED));
/// assert!(!flags.contains(Characteristics::DISTINCT));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct Characteristics(u8);

impl Characteristics {
    /// No guarantees.
    pub const NONE: Self = Self(0);
    /// A defined encounter order exists and is preserved.
    pub const ORDERED: Self = Self(1);
    /// No two produced elements are equal.
    pub const DISTINCT: Self = Self(1 << 1);
    /// Encounter order follows a comparator (or natural ordering).
    pub const SORTED: Self = Self(1 << 2);
    /// The remaining-size estimate is exact before traversal.
    pub const SIZED: Self = Self(1 << 3);
    /// Every split half is itself SIZED.
    pub const SUBSIZED: Self = Self(1 << 4);
    /// No produced element is an absent-value sentinel.
    pub const NONNULL: Self = Self(1 << 5);

    /// Returns `true` when every flag in `other` is present in `self`.
    #[inline]
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Union of two flag sets.
    #[inline]
    #[must_use]
    pub const fn with(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// `self` with every flag in `other` removed.
    #[inline]
    #[must_use]
    pub const fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Intersection of two flag sets.
    #[inline]
    #[must_use]
    pub const fn intersect(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Returns `true` when no flag is set.
    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for Characteristics {
    type Output = Self;

    fn bitor(self, other: Self) -> Self {
        self.with(other)
    }
}

impl std::ops::BitOrAssign for Characteristics {
    fn bitor_assign(&mut self, other: Self) {
        *self = self.with(other);
    }
}

impl std::ops::BitAnd for Characteristics {
    type Output = Self;

    fn bitand(self, other: Self) -> Self {
        self.intersect(other)
    }
}

impl fmt::Debug for Characteristics {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = formatter.debug_set();
        for (flag, name) in [
            (Self::ORDERED, "ORDERED"),
            (Self::DISTINCT, "DISTINCT"),
            (Self::SORTED, "SORTED"),
            (Self::SIZED, "SIZED"),
            (Self::SUBSIZED, "SUBSIZED"),
            (Self::NONNULL, "NONNULL"),
        ] {
            if self.contains(flag) {
                list.entry(&name);
            }
        }
        list.finish()
    }
}

// =============================================================================
// Cursor Trait
// =============================================================================

/// A splittable, in-progress traversal of a sequence.
///
/// All operations are synchronous and bounded by the input size; none
/// block or suspend. Cursors are single-owner and not internally
/// synchronized; the concurrency story is splitting into disjoint halves
/// and traversing each on its own thread.
pub trait Cursor {
    /// The element type produced by this cursor.
    type Item;

    /// Advances past at most one element.
    ///
    /// If an element remains, `visit` is invoked with it exactly once and
    /// `true` is returned; otherwise returns `false` without invoking
    /// `visit`.
    fn try_advance(&mut self, visit: impl FnMut(Self::Item)) -> bool;

    /// Visits every remaining element in encounter order.
    fn advance_all(&mut self, mut visit: impl FnMut(Self::Item)) {
        while self.try_advance(&mut visit) {}
    }

    /// Attempts to carve off the **earlier** half of the remaining
    /// elements as an independent cursor.
    ///
    /// On success, `self` retains only the later portion and forfeits
    /// ownership of the range handed away; traversing the returned cursor
    /// and then `self` produces exactly the sequence an unsplit traversal
    /// would have. Returns `None` when the remaining range cannot be
    /// split further.
    fn try_split(&mut self) -> Option<Self>
    where
        Self: Sized;

    /// Estimated count of remaining elements.
    ///
    /// Exact when [`Characteristics::SIZED`] is advertised; otherwise a
    /// best-effort upper bound, with [`REMAINING_UNKNOWN`] meaning no
    /// bound is known.
    fn estimated_remaining(&self) -> u64;

    /// The guarantees this cursor provides to consumers.
    fn characteristics(&self) -> Characteristics;
}

/// Traverses `cursor` to exhaustion and collects the produced elements.
///
/// A convenience for tests and small consumers; production traversals
/// normally use [`Cursor::advance_all`] directly to avoid the
/// intermediate allocation.
pub fn drain<C: Cursor>(mut cursor: C) -> Vec<C::Item> {
    let mut collected = Vec::new();
    cursor.advance_all(|element| collected.push(element));
    collected
}

// =============================================================================
// Tests
// =============================================================================
