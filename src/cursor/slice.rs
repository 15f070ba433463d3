//! Cursor over a borrowed slice.

use super::{Characteristics, Cursor};

/// A cursor over a borrowed slice, yielding `&T` in slice order.
///
/// The canonical index-range splitter: splitting hands away the front half
/// of the remaining slice, so both halves are plain subslices with exact
/// lengths. Advertises ORDERED, SIZED, SUBSIZED and NONNULL, plus any
/// extra characteristics declared by the caller.
///
/// # Examples
///
/// ```rust
/// use congeal::cursor::{drain, Cursor, SliceCursor};
///
/// let values = [1, 2, 3, 4];
/// let mut back = SliceCursor::new(&values);
/// let front = back.try_split().unwrap();
///
/// let mut combined = drain(front);
/// combined.extend(drain(back));
/// assert_eq!(combined, vec![&1, &2, &3, &4]);
/// ```
#[derive(Clone, Debug)]
pub struct SliceCursor<'a, T> {
    slice: &'a [T],
    characteristics: Characteristics,
}

impl<'a, T> SliceCursor<'a, T> {
    const BASE_CHARACTERISTICS: Characteristics = Characteristics::ORDERED
        .with(Characteristics::SIZED)
        .with(Characteristics::SUBSIZED)
        .with(Characteristics::NONNULL);

    /// Creates a cursor over `slice`.
    #[must_use]
    pub const fn new(slice: &'a [T]) -> Self {
        Self {
            slice,
            characteristics: Self::BASE_CHARACTERISTICS,
        }
    }

    /// Creates a cursor over `slice` declaring `extra` characteristics on
    /// top of the base set, for callers that know more about the data
    /// (for example DISTINCT for deduplicated input, or SORTED for a
    /// slice in natural order).
    #[must_use]
    pub const fn with_characteristics(slice: &'a [T], extra: Characteristics) -> Self {
        Self {
            slice,
            characteristics: Self::BASE_CHARACTERISTICS.with(extra),
        }
    }
}

impl<'a, T> Cursor for SliceCursor<'a, T> {
    type Item = &'a T;

    fn try_advance(&mut self, mut visit: impl FnMut(Self::Item)) -> bool {
        if let Some((first, rest)) = self.slice.split_first() {
            self.slice = rest;
            visit(first);
            true
        } else {
            false
        }
    }

    fn try_split(&mut self) -> Option<Self> {
        if self.slice.len() < 2 {
            return None;
        }
        let middle = self.slice.len() / 2;
        let (front, back) = self.slice.split_at(middle);
        self.slice = back;
        Some(Self {
            slice: front,
            characteristics: self.characteristics,
        })
    }

    fn estimated_remaining(&self) -> u64 {
        self.slice.len() as u64
    }

    fn characteristics(&self) -> Characteristics {
        self.characteristics
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::drain;
    use rstest::rstest;

    #[rstest]
    fn test_traverses_in_slice_order() {
        let values = [5, 6, 7];
        assert_eq!(drain(SliceCursor::new(&values)), vec![&5, &6, &7]);
    }

    #[rstest]
    fn test_empty_slice_never_advances() {
        let values: [i32; 0] = [];
        let mut cursor = SliceCursor::new(&values);
        assert!(!cursor.try_advance(|_| panic!("must not visit")));
        assert!(cursor.try_split().is_none());
        assert_eq!(cursor.estimated_remaining(), 0);
    }

    #[rstest]
    fn test_single_element_does_not_split() {
        let values = [1];
        let mut cursor = SliceCursor::new(&values);
        assert!(cursor.try_split().is_none());
        assert_eq!(drain(cursor), vec![&1]);
    }

    #[rstest]
    fn test_split_halves_are_exact_and_disjoint() {
        let values = [1, 2, 3, 4, 5];
        let mut back = SliceCursor::new(&values);
        let front = back.try_split().expect("must split");

        assert_eq!(front.estimated_remaining(), 2);
        assert_eq!(back.estimated_remaining(), 3);
        assert_eq!(drain(front), vec![&1, &2]);
        assert_eq!(drain(back), vec![&3, &4, &5]);
    }

    #[rstest]
    fn test_base_characteristics() {
        let values = [1, 2];
        let cursor = SliceCursor::new(&values);
        let flags = cursor.characteristics();
        assert!(flags.contains(Characteristics::ORDERED));
        assert!(flags.contains(Characteristics::SIZED));
        assert!(flags.contains(Characteristics::SUBSIZED));
        assert!(flags.contains(Characteristics::NONNULL));
        assert!(!flags.contains(Characteristics::SORTED));
    }

    #[rstest]
    fn test_extra_characteristics_are_preserved() {
        let values = [1, 2, 3];
        let cursor = SliceCursor::with_characteristics(&values, Characteristics::SORTED);
        assert!(cursor.characteristics().contains(Characteristics::SORTED));
    }

    #[rstest]
    fn test_repeated_splits_preserve_sequence() {
        let values: Vec<i32> = (0..33).collect();
        let mut cursors = vec![SliceCursor::new(&values)];

        // Split every cursor as far as it will go.
        loop {
            let mut next = Vec::new();
            let mut split_any = false;
            for mut cursor in cursors {
                if let Some(front) = cursor.try_split() {
                    split_any = true;
                    next.push(front);
                }
                next.push(cursor);
            }
            cursors = next;
            if !split_any {
                break;
            }
        }

        let mut combined = Vec::new();
        for cursor in cursors {
            combined.extend(drain(cursor).into_iter().copied());
        }
        assert_eq!(combined, (0..33).collect::<Vec<_>>());
    }
}
