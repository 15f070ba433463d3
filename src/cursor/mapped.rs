//! Lazily mapped cursor.

use std::fmt;

use super::{Characteristics, Cursor};
use crate::ReferenceCounter;

/// A cursor applying a transform to each element of a source cursor.
///
/// The transform runs lazily as elements are visited; no intermediate
/// container is materialized. Splitting delegates to the source and wraps
/// both halves, sharing the transform.
///
/// Characteristics: ORDERED, SIZED and SUBSIZED survive the transform;
/// DISTINCT, NONNULL and SORTED are stripped, because an arbitrary
/// transform preserves none of them (it may merge distinct inputs,
/// produce sentinels, or reorder by value).
///
/// # Examples
///
/// ```rust
/// use congeal::cursor::{drain, Mapped, SliceCursor};
///
/// let values = [1, 2, 3];
/// let doubled = Mapped::new(SliceCursor::new(&values), |value: &i32| value * 2);
/// assert_eq!(drain(doubled), vec![2, 4, 6]);
/// ```
pub struct Mapped<S, F> {
    source: S,
    transform: ReferenceCounter<F>,
}

const MAPPED_RETAINED: Characteristics = Characteristics::ORDERED
    .with(Characteristics::SIZED)
    .with(Characteristics::SUBSIZED);

impl<S: Cursor, T, F: Fn(S::Item) -> T> Mapped<S, F> {
    /// Wraps `source`, producing `transform(element)` for each of its
    /// elements.
    #[must_use]
    pub fn new(source: S, transform: F) -> Self {
        Self {
            source,
            transform: ReferenceCounter::new(transform),
        }
    }
}

impl<S: Cursor, T, F: Fn(S::Item) -> T> Cursor for Mapped<S, F> {
    type Item = T;

    fn try_advance(&mut self, mut visit: impl FnMut(T)) -> bool {
        let transform: &F = &self.transform;
        self.source.try_advance(|element| visit(transform(element)))
    }

    fn try_split(&mut self) -> Option<Self> {
        self.source.try_split().map(|front| Self {
            source: front,
            transform: self.transform.clone(),
        })
    }

    fn estimated_remaining(&self) -> u64 {
        self.source.estimated_remaining()
    }

    fn characteristics(&self) -> Characteristics {
        self.source.characteristics().intersect(MAPPED_RETAINED)
    }
}

impl<S: fmt::Debug, F> fmt::Debug for Mapped<S, F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Mapped")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Tests
// =============================================================================
