//! Cursor over a computed index range.

use std::cmp::Ordering;
use std::fmt;

use super::{Characteristics, Cursor, COMPARATOR_REQUIRES_SORTED_PANIC_MESSAGE};
use crate::ReferenceCounter;

/// Comparator attached to a SORTED cursor.
pub type Comparator<T> = dyn Fn(&T, &T) -> Ordering;

// =============================================================================
// Index Range Splitter
// =============================================================================

/// The half-open index range `[start, end)` behind an [`IndexedCursor`].
///
/// Splitting hands away the front half; both halves keep exact lengths.
#[derive(Clone, Copy, Debug)]
struct IndexRange {
    start: usize,
    end: usize,
}

impl IndexRange {
    const fn new(length: usize) -> Self {
        Self {
            start: 0,
            end: length,
        }
    }

    fn next(&mut self) -> Option<usize> {
        if self.start < self.end {
            let index = self.start;
            self.start += 1;
            Some(index)
        } else {
            None
        }
    }

    fn split(&mut self) -> Option<Self> {
        let remaining = self.end - self.start;
        if remaining < 2 {
            return None;
        }
        let middle = self.start + remaining / 2;
        let front = Self {
            start: self.start,
            end: middle,
        };
        self.start = middle;
        Some(front)
    }

    const fn remaining(&self) -> usize {
        self.end - self.start
    }
}

// =============================================================================
// IndexedCursor
// =============================================================================

/// A cursor producing `function(i)` for every `i` in `[0, length)`.
///
/// Splitting delegates to the underlying index range, so halves stay
/// exactly sized; the generator function is shared between halves.
///
/// Always advertises ORDERED, SIZED and SUBSIZED. Callers may declare
/// extra characteristics they can vouch for; declaring SORTED allows a
/// comparator to be attached, and [`IndexedCursor::comparator`] panics
/// when SORTED was not declared; asking for an ordering the cursor never
/// promised is a contract violation.
///
/// # Examples
///
/// ```rust
/// use congeal::cursor::{drain, IndexedCursor};
///
/// let squares = IndexedCursor::new(4, |i| i * i);
/// assert_eq!(drain(squares), vec![0, 1, 4, 9]);
/// ```
pub struct IndexedCursor<T, F> {
    range: IndexRange,
    function: ReferenceCounter<F>,
    characteristics: Characteristics,
    comparator: Option<ReferenceCounter<Comparator<T>>>,
}

impl<T, F: Fn(usize) -> T> IndexedCursor<T, F> {
    const BASE_CHARACTERISTICS: Characteristics = Characteristics::ORDERED
        .with(Characteristics::SIZED)
        .with(Characteristics::SUBSIZED);

    /// Creates a cursor producing `function(0) .. function(length - 1)`.
    #[must_use]
    pub fn new(length: usize, function: F) -> Self {
        Self {
            range: IndexRange::new(length),
            function: ReferenceCounter::new(function),
            characteristics: Self::BASE_CHARACTERISTICS,
            comparator: None,
        }
    }

    /// As [`IndexedCursor::new`], declaring `extra` characteristics the
    /// caller can vouch for on top of the base ORDERED|SIZED|SUBSIZED.
    #[must_use]
    pub fn with_characteristics(length: usize, function: F, extra: Characteristics) -> Self {
        Self {
            range: IndexRange::new(length),
            function: ReferenceCounter::new(function),
            characteristics: Self::BASE_CHARACTERISTICS.with(extra),
            comparator: None,
        }
    }

    /// As [`IndexedCursor::with_characteristics`], attaching the
    /// comparator that witnesses the declared sort order.
    ///
    /// # Panics
    ///
    /// Panics when `extra` does not include
    /// [`Characteristics::SORTED`]; a comparator without a sortedness
    /// guarantee is a caller-contract violation.
    #[must_use]
    pub fn with_comparator(
        length: usize,
        function: F,
        extra: Characteristics,
        comparator: impl Fn(&T, &T) -> Ordering + 'static,
    ) -> Self {
        assert!(
            extra.contains(Characteristics::SORTED),
            "{COMPARATOR_REQUIRES_SORTED_PANIC_MESSAGE}"
        );
        Self {
            range: IndexRange::new(length),
            function: ReferenceCounter::new(function),
            characteristics: Self::BASE_CHARACTERISTICS.with(extra),
            comparator: Some(ReferenceCounter::new(comparator)),
        }
    }

    /// Returns the comparator witnessing this cursor's sort order, or
    /// `None` when the order is the element type's natural ordering.
    ///
    /// # Panics
    ///
    /// Panics when this cursor does not advertise
    /// [`Characteristics::SORTED`].
    #[must_use]
    pub fn comparator(&self) -> Option<&Comparator<T>> {
        assert!(
            self.characteristics.contains(Characteristics::SORTED),
            "{COMPARATOR_REQUIRES_SORTED_PANIC_MESSAGE}"
        );
        self.comparator.as_deref()
    }
}

impl<T, F: Fn(usize) -> T> Cursor for IndexedCursor<T, F> {
    type Item = T;

    fn try_advance(&mut self, mut visit: impl FnMut(T)) -> bool {
        let Some(index) = self.range.next() else {
            return false;
        };
        let function: &F = &self.function;
        visit(function(index));
        true
    }

    fn try_split(&mut self) -> Option<Self> {
        self.range.split().map(|front| Self {
            range: front,
            function: self.function.clone(),
            characteristics: self.characteristics,
            comparator: self.comparator.clone(),
        })
    }

    fn estimated_remaining(&self) -> u64 {
        self.range.remaining() as u64
    }

    fn characteristics(&self) -> Characteristics {
        self.characteristics
    }
}

impl<T, F> fmt::Debug for IndexedCursor<T, F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("IndexedCursor")
            .field("range", &self.range)
            .field("characteristics", &self.characteristics)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Tests
// =============================================================================
