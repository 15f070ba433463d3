//! # congeal
//!
//! Immutable hash collections built on a write-once open-addressing table,
//! plus a framework of splittable, lazily-combined traversal cursors.
//!
//! ## Overview
//!
//! This library provides collections that are frozen at construction time:
//!
//! - **Frozen Collections**: [`FrozenHashSet`] and [`FrozenHashMap`], built
//!   once through a builder and immutable afterwards
//! - **Hash Policy**: deterministic bit-diffusion ("smear") and
//!   power-of-two table sizing shared by every hashed representation
//! - **Cursors**: splittable traversal handles ([`Cursor`]) with lazy
//!   map / filter / flat-map combinators suitable for fork-join traversal
//!
//! Unlike persistent collections, nothing here supports update-in-place or
//! structural sharing across versions. A builder accumulates entries, the
//! finished collection never changes, and traversal may be decomposed into
//! independent halves without synchronization.
//!
//! ## Feature Flags
//!
//! - `frozen`: the immutable collections (default)
//! - `cursor`: the cursor combinator framework (default)
//! - `arc`: use `Arc` instead of `Rc` internally, so split cursors can be
//!   handed to other threads
//! - `serde`: serialize collections as plain element/entry sequences
//! - `fxhash` / `ahash`: swap the deterministic key hasher
//! - `full`: enable all features
//!
//! ## Example
//!
//! ```rust
//! use congeal::prelude::*;
//!
//! let mut builder = FrozenHashSet::builder();
//! builder.add(1).add(2).add(2).add(3);
//! let set = builder.build();
//!
//! assert_eq!(set.len(), 3);
//! assert!(set.contains(&2));
//! ```
//!
//! [`FrozenHashSet`]: frozen::FrozenHashSet
//! [`FrozenHashMap`]: frozen::FrozenHashMap
//! [`Cursor`]: cursor::Cursor

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`, allowing
/// split cursors (which share their transform/predicate closures) to cross
/// thread boundaries.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use congeal::prelude::*;
/// ```
pub mod prelude {

    #[cfg(feature = "frozen")]
    pub use crate::frozen::*;

    #[cfg(feature = "cursor")]
    pub use crate::cursor::*;
}

#[cfg(feature = "frozen")]
pub mod frozen;

#[cfg(feature = "cursor")]
pub mod cursor;

#[cfg(test)]
mod tests {
    use super::ReferenceCounter;
    use rstest::rstest;

    #[rstest]
    fn test_reference_counter_copy_on_write() {
        let mut original: ReferenceCounter<Vec<i32>> = ReferenceCounter::new(vec![1, 2]);
        let aliased = original.clone();

        ReferenceCounter::make_mut(&mut original).push(3);

        assert_eq!(*original, vec![1, 2, 3]);
        assert_eq!(*aliased, vec![1, 2]);
    }
}
