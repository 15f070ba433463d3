//! Lazily flattened cursor.

use std::fmt;

use super::{Characteristics, Cursor, FLAT_MAP_CHARACTERISTICS_PANIC_MESSAGE};
use crate::ReferenceCounter;

/// A cursor flattening a per-element inner cursor produced by a transform.
///
/// The cursor drains a current inner cursor (the *prefix*) first; when it
/// runs dry, the next source element is pulled and transformed into a
/// replacement prefix, repeating until an element is produced or both are
/// exhausted.
///
/// Characteristics are declared by the caller, because the wrapper cannot
/// infer what survives flattening; SUBSIZED and SORTED are rejected at
/// construction; flattening makes exact sub-sizing and total ordering
/// unrepresentable, so requesting them is a caller-contract violation.
///
/// Splitting prefers splitting the source: the outstanding prefix travels
/// with the earlier half, which keeps the encounter order intact. When
/// the source cannot split further, the prefix itself is handed off
/// wholesale as the split result.
///
/// # Examples
///
/// ```rust
/// use congeal::cursor::{drain, Characteristics, FlatMapped, SliceCursor};
///
/// let groups: Vec<Vec<i32>> = vec![vec![1, 2], vec![], vec![3]];
/// let flattened = FlatMapped::new(
///     SliceCursor::new(&groups),
///     |group: &Vec<i32>| SliceCursor::new(group),
///     Characteristics::ORDERED,
/// );
///
/// assert_eq!(drain(flattened), vec![&1, &2, &3]);
/// ```
pub struct FlatMapped<S, C, F> {
    /// `None` only for a split half that exists to drain a handed-off
    /// prefix.
    source: Option<S>,
    prefix: Option<C>,
    transform: ReferenceCounter<F>,
    characteristics: Characteristics,
}

impl<S: Cursor, C: Cursor, F: Fn(S::Item) -> C> FlatMapped<S, C, F> {
    /// Wraps `source`, flattening the inner cursor `transform` produces
    /// for each source element.
    ///
    /// `characteristics` declares the guarantees of the flattened
    /// sequence, as vouched for by the caller.
    ///
    /// # Panics
    ///
    /// Panics when `characteristics` includes
    /// [`Characteristics::SUBSIZED`] or [`Characteristics::SORTED`].
    #[must_use]
    pub fn new(source: S, transform: F, characteristics: Characteristics) -> Self {
        assert!(
            !characteristics.contains(Characteristics::SUBSIZED)
                && !characteristics.contains(Characteristics::SORTED),
            "{FLAT_MAP_CHARACTERISTICS_PANIC_MESSAGE}"
        );
        Self {
            source: Some(source),
            prefix: None,
            transform: ReferenceCounter::new(transform),
            characteristics,
        }
    }
}

impl<S: Cursor, C: Cursor, F: Fn(S::Item) -> C> Cursor for FlatMapped<S, C, F> {
    type Item = C::Item;

    fn try_advance(&mut self, mut visit: impl FnMut(C::Item)) -> bool {
        loop {
            if let Some(inner) = self.prefix.as_mut() {
                if inner.try_advance(&mut visit) {
                    return true;
                }
                self.prefix = None;
            }

            let Some(source) = self.source.as_mut() else {
                return false;
            };
            let transform: &F = &self.transform;
            let mut replacement = None;
            if !source.try_advance(|element| replacement = Some(transform(element))) {
                return false;
            }
            self.prefix = replacement;
        }
    }

    fn try_split(&mut self) -> Option<Self> {
        if let Some(source) = self.source.as_mut() {
            if let Some(front) = source.try_split() {
                // The outstanding prefix precedes everything in the
                // source, so it travels with the earlier half.
                return Some(Self {
                    source: Some(front),
                    prefix: self.prefix.take(),
                    transform: self.transform.clone(),
                    characteristics: self.characteristics,
                });
            }
        }
        // Fall back to handing off the current prefix wholesale.
        self.prefix.take().map(|inner| Self {
            source: None,
            prefix: Some(inner),
            transform: self.transform.clone(),
            characteristics: self.characteristics,
        })
    }

    fn estimated_remaining(&self) -> u64 {
        let prefix = self
            .prefix
            .as_ref()
            .map_or(0, Cursor::estimated_remaining);
        let source = self
            .source
            .as_ref()
            .map_or(0, Cursor::estimated_remaining);
        prefix.saturating_add(source)
    }

    fn characteristics(&self) -> Characteristics {
        self.characteristics
    }
}

impl<S: fmt::Debug, C, F> fmt::Debug for FlatMapped<S, C, F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("FlatMapped")
            .field("source", &self.source)
            .field("characteristics", &self.characteristics)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Tests
// =============================================================================
