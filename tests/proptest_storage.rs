//! Property-based tests for the facade's round-trip and count guarantees.

use std::collections::BTreeMap;

use local_kv::LocalStorage;
use proptest::prelude::*;
use serde_json::Value;

/// Arbitrary JSON documents. Floats are left out because not every `f64`
/// survives text formatting bit-for-bit.
fn json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        any::<u64>().prop_map(Value::from),
        ".*".prop_map(Value::String),
    ];

    leaf.prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(Value::Array),
            prop::collection::btree_map(".*", inner, 0..8)
                .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn set_then_get_round_trips(key in ".*", value in json_value()) {
        let mut storage = LocalStorage::volatile();
        prop_assert!(storage.set(&key, &value));

        // JSON null reads back as a miss
        let expected = if value.is_null() { None } else { Some(value) };
        prop_assert_eq!(storage.get::<Value>(&key), expected);
    }

    #[test]
    fn typed_values_round_trip(
        key in "[a-z]{1,12}",
        value in prop::collection::btree_map("[a-z]{0,8}", prop::collection::vec(any::<i32>(), 0..6), 0..6),
    ) {
        let mut storage = LocalStorage::volatile();
        prop_assert!(storage.set(&key, &value));
        prop_assert_eq!(storage.get::<BTreeMap<String, Vec<i32>>>(&key), Some(value));
    }

    #[test]
    fn length_counts_distinct_keys(keys in prop::collection::btree_set("[a-z0-9]{1,10}", 0..32)) {
        let mut storage = LocalStorage::volatile();
        for key in &keys {
            prop_assert!(storage.set(key, key));
        }
        prop_assert_eq!(storage.len(), keys.len());

        // Rewriting existing keys does not change the count
        for key in &keys {
            prop_assert!(storage.set(key, &0));
        }
        prop_assert_eq!(storage.len(), keys.len());

        prop_assert!(storage.clear());
        prop_assert_eq!(storage.len(), 0);
    }

    #[test]
    fn removing_absent_keys_is_harmless(
        present in prop::collection::btree_set("[a-m]{1,6}", 0..16),
        absent in prop::collection::vec("[n-z]{1,6}", 0..16),
    ) {
        let mut storage = LocalStorage::volatile();
        for key in &present {
            prop_assert!(storage.set(key, "v"));
        }

        for key in &absent {
            prop_assert!(storage.remove(key));
        }
        prop_assert_eq!(storage.len(), present.len());
    }
}
