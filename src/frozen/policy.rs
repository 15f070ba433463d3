//! Hash policy: bit diffusion and table sizing.
//!
//! Every hashed representation in this crate derives its table geometry
//! from the same three decisions, kept here as pure functions:
//!
//! - [`smear`]: diffuse a raw 32-bit hash code before it seeds a probe,
//!   defeating clustering from low-quality hash functions (for example
//!   sequential integers)
//! - [`closed_table_size`]: pick the smallest power-of-two capacity that
//!   keeps the table under its load factor
//! - [`needs_resizing`]: decide whether an incremental insert must rebuild
//!   at a doubled capacity first
//!
//! All functions are deterministic, allocation-free, and never fail. When
//! growth would pass [`MAX_TABLE_SIZE`], sizing clamps there instead of
//! wrapping, trading load-factor fidelity for availability.

use std::hash::{Hash, Hasher};

use static_assertions::const_assert;

// =============================================================================
// Key Hasher Selection
// =============================================================================

#[cfg(feature = "fxhash")]
pub(crate) type KeyHasher = rustc_hash::FxHasher;

#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
pub(crate) type KeyHasher = ahash::AHasher;

#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
pub(crate) type KeyHasher = std::collections::hash_map::DefaultHasher;

// =============================================================================
// Constants
// =============================================================================

/// Largest table capacity the policy will ever select.
///
/// Growth requests past this point clamp here rather than wrapping; the
/// table then runs over its load factor, which degrades probe lengths but
/// keeps construction available.
pub const MAX_TABLE_SIZE: usize = 1 << 30;

/// Target maximum ratio of stored entries to table capacity.
pub const DEFAULT_LOAD_FACTOR: f64 = 0.7;

const_assert!(MAX_TABLE_SIZE.is_power_of_two());
const_assert!(MAX_TABLE_SIZE >= 2);

const SMEAR_MULTIPLIER_ONE: u32 = 0xcc9e_2d51;
const SMEAR_MULTIPLIER_TWO: u32 = 0x1b87_3593;
const SMEAR_ROTATION: u32 = 15;

// =============================================================================
// Pure Policy Functions
// =============================================================================

/// Diffuses a raw 32-bit hash code.
///
/// Multiply, rotate left by 15, multiply again, all wrapping. Spreads
/// entropy into the low-order bits that are later masked into a table
/// index, so that poor hash codes (sequential integers, pointers) do not
/// collapse into a handful of probe chains.
///
/// Deterministic and pure: `smear(x) == smear(x)` always.
///
/// # Examples
///
/// ```rust
/// use congeal::frozen::policy::smear;
///
/// assert_eq!(smear(42), smear(42));
/// assert_ne!(smear(1), smear(2));
/// ```
#[inline]
#[must_use]
pub const fn smear(hash: u32) -> u32 {
    SMEAR_MULTIPLIER_TWO.wrapping_mul(
        hash.wrapping_mul(SMEAR_MULTIPLIER_ONE)
            .rotate_left(SMEAR_ROTATION),
    )
}

/// Returns the smallest power-of-two capacity `C` such that
/// `expected_entries <= load_factor * C`.
///
/// `expected_entries` is clamped to a minimum of 2, and the result is
/// clamped to [`MAX_TABLE_SIZE`]; growth that would overflow returns the
/// maximum instead of wrapping.
///
/// Monotonically non-decreasing in `expected_entries`.
///
/// # Examples
///
/// ```rust
/// use congeal::frozen::policy::closed_table_size;
///
/// // The minimum expectation of 2 already forces a doubling: 2 > 0.7 * 2.
/// assert_eq!(closed_table_size(0, 0.7), 4);
/// assert_eq!(closed_table_size(3, 0.7), 8);
/// assert_eq!(closed_table_size(5, 0.7), 8);
/// assert_eq!(closed_table_size(6, 0.7), 16);
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)] // entry counts are far below 2^52
pub fn closed_table_size(expected_entries: usize, load_factor: f64) -> usize {
    let expected = expected_entries.max(2);
    if expected >= MAX_TABLE_SIZE {
        return MAX_TABLE_SIZE;
    }

    let mut capacity = expected.next_power_of_two();
    while (expected as f64) > load_factor * (capacity as f64) {
        if capacity >= MAX_TABLE_SIZE {
            return MAX_TABLE_SIZE;
        }
        capacity <<= 1;
    }
    capacity.min(MAX_TABLE_SIZE)
}

/// Returns `true` when a table of `capacity` slots holding `len` entries
/// is over its load factor and still has room to grow.
///
/// Once capacity has reached [`MAX_TABLE_SIZE`] this always returns
/// `false`: the table is allowed to exceed its load factor rather than
/// fail.
#[inline]
#[must_use]
#[allow(clippy::cast_precision_loss)] // entry counts are far below 2^52
pub fn needs_resizing(len: usize, capacity: usize, load_factor: f64) -> bool {
    (len as f64) > load_factor * (capacity as f64) && capacity < MAX_TABLE_SIZE
}

// =============================================================================
// Key Hashing
// =============================================================================

/// Hashes a key with the crate's deterministic hasher.
///
/// The hasher has no per-instance random state, so the same key produces
/// the same code for the lifetime of the process. Both the probe seed and
/// the collections' order-independent `Hash` implementations rely on this.
pub(crate) fn hash64<K: Hash + ?Sized>(key: &K) -> u64 {
    let mut hasher = KeyHasher::default();
    key.hash(&mut hasher);
    hasher.finish()
}

/// Truncates [`hash64`] to the 32-bit code consumed by [`smear`].
#[allow(clippy::cast_possible_truncation)] // deliberate: smear operates on 32 bits
pub(crate) fn hash_code<K: Hash + ?Sized>(key: &K) -> u32 {
    hash64(key) as u32
}

// =============================================================================
// Tests
// =============================================================================
