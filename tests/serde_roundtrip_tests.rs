#![cfg(feature = "frozen")]
//! Serialization tests for the frozen collections.
//!
//! Sets serialize as JSON arrays and maps as JSON objects, matching the
//! formats of their standard-library counterparts; deserialization runs
//! through the builders, so duplicate inputs collapse the same way
//! staged duplicates do.

use congeal::frozen::{FrozenHashMap, FrozenHashSet};
use rstest::rstest;

// =============================================================================
// Set Serialization
// =============================================================================

#[rstest]
fn test_empty_set_serializes_to_empty_array() {
    let set: FrozenHashSet<i32> = FrozenHashSet::new();
    let json = serde_json::to_string(&set).unwrap();
    assert_eq!(json, "[]");
}

#[rstest]
fn test_singleton_set_serializes_to_single_element_array() {
    let set = FrozenHashSet::singleton(7);
    let json = serde_json::to_string(&set).unwrap();
    assert_eq!(json, "[7]");
}

#[rstest]
fn test_set_round_trips_through_json() {
    let original: FrozenHashSet<String> = ["apple", "banana", "cherry"]
        .into_iter()
        .map(String::from)
        .collect();

    let json = serde_json::to_string(&original).unwrap();
    let restored: FrozenHashSet<String> = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, original);
}

#[rstest]
fn test_set_deserialization_collapses_duplicates() {
    let restored: FrozenHashSet<i32> = serde_json::from_str("[1, 2, 2, 3, 1]").unwrap();
    let expected: FrozenHashSet<i32> = [1, 2, 3].into_iter().collect();
    assert_eq!(restored, expected);
}

// =============================================================================
// Map Serialization
// =============================================================================

#[rstest]
fn test_empty_map_serializes_to_empty_object() {
    let map: FrozenHashMap<String, i32> = FrozenHashMap::new();
    let json = serde_json::to_string(&map).unwrap();
    assert_eq!(json, "{}");
}

#[rstest]
fn test_singleton_map_serializes_to_single_entry_object() {
    let map = FrozenHashMap::singleton(String::from("answer"), 42);
    let json = serde_json::to_string(&map).unwrap();
    assert_eq!(json, r#"{"answer":42}"#);
}

#[rstest]
fn test_map_round_trips_through_json() {
    let original: FrozenHashMap<String, i32> = [("one", 1), ("two", 2), ("three", 3)]
        .into_iter()
        .map(|(key, value)| (String::from(key), value))
        .collect();

    let json = serde_json::to_string(&original).unwrap();
    let restored: FrozenHashMap<String, i32> = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, original);
}

#[rstest]
fn test_map_deserialization_keeps_last_duplicate_value() {
    let restored: FrozenHashMap<String, i32> =
        serde_json::from_str(r#"{"key": 1, "key": 2}"#).unwrap();

    assert_eq!(restored.len(), 1);
    assert_eq!(restored.get("key"), Some(&2));
}

#[rstest]
fn test_larger_map_survives_round_trip() {
    let original: FrozenHashMap<String, u64> =
        (0..100).map(|index| (format!("key-{index}"), index)).collect();

    let json = serde_json::to_string(&original).unwrap();
    let restored: FrozenHashMap<String, u64> = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, original);
    for index in 0..100u64 {
        assert_eq!(restored.get(format!("key-{index}").as_str()), Some(&index));
    }
}
