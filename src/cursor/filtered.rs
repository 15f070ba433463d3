//! Lazily filtered cursor.

use std::fmt;

use super::{Characteristics, Cursor};
use crate::ReferenceCounter;

/// A cursor producing only the source elements accepted by a predicate.
///
/// `try_advance` pulls from the source into a one-element lookahead cell
/// until the predicate accepts an element or the source is exhausted;
/// nothing is buffered across calls. Splitting halves the source and
/// wraps each half independently, sharing the predicate.
///
/// Characteristics: DISTINCT, NONNULL, ORDERED and SORTED survive
/// filtering (dropping elements breaks none of them); SIZED and SUBSIZED
/// never do, because filtering changes cardinality unpredictably. The
/// size estimate is therefore only a **best-effort upper bound**: it
/// reports the source's remaining estimate, which halves heuristically as
/// the source is split, and can only shrink toward the true count by
/// traversing.
///
/// # Examples
///
/// ```rust
/// use congeal::cursor::{drain, Filtered, SliceCursor};
///
/// let values = [1, 2, 3, 4, 5, 6];
/// let evens = Filtered::new(SliceCursor::new(&values), |value: &&i32| **value % 2 == 0);
/// assert_eq!(drain(evens), vec![&2, &4, &6]);
/// ```
pub struct Filtered<S, P> {
    source: S,
    predicate: ReferenceCounter<P>,
}

const FILTERED_RETAINED: Characteristics = Characteristics::DISTINCT
    .with(Characteristics::NONNULL)
    .with(Characteristics::ORDERED)
    .with(Characteristics::SORTED);

impl<S: Cursor, P: Fn(&S::Item) -> bool> Filtered<S, P> {
    /// Wraps `source`, keeping only elements for which `predicate`
    /// returns `true`.
    #[must_use]
    pub fn new(source: S, predicate: P) -> Self {
        Self {
            source,
            predicate: ReferenceCounter::new(predicate),
        }
    }
}

impl<S: Cursor, P: Fn(&S::Item) -> bool> Cursor for Filtered<S, P> {
    type Item = S::Item;

    fn try_advance(&mut self, mut visit: impl FnMut(S::Item)) -> bool {
        let predicate: &P = &self.predicate;
        loop {
            let mut lookahead = None;
            let pulled = self.source.try_advance(|element| {
                if predicate(&element) {
                    lookahead = Some(element);
                }
            });
            if let Some(element) = lookahead {
                visit(element);
                return true;
            }
            if !pulled {
                return false;
            }
        }
    }

    fn try_split(&mut self) -> Option<Self> {
        self.source.try_split().map(|front| Self {
            source: front,
            predicate: self.predicate.clone(),
        })
    }

    /// Best-effort upper bound: the source's remaining estimate, not the
    /// (unknowable) count of accepted elements.
    fn estimated_remaining(&self) -> u64 {
        self.source.estimated_remaining()
    }

    fn characteristics(&self) -> Characteristics {
        self.source.characteristics().intersect(FILTERED_RETAINED)
    }
}

impl<S: fmt::Debug, P> fmt::Debug for Filtered<S, P> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Filtered")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Tests
// =============================================================================
