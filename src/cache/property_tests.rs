//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check store semantics against a simple model.

use proptest::prelude::*;
use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;
use tokio::time::Instant;

use crate::cache::CacheStore;

// == Strategies ==
/// Generates URL-like keys, including near-duplicates that must stay distinct
fn key_strategy() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just("https://pokeapi.co/api/v2/"), Just("https://example.com/")],
        "[a-z]{1,8}",
        prop_oneof![Just(""), Just("/"), Just("?offset=20&limit=20")],
    )
        .prop_map(|(base, path, suffix)| format!("{base}{path}{suffix}"))
}

/// Generates arbitrary binary payloads
fn payload_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..256)
}

#[derive(Debug, Clone)]
enum CacheOp {
    Put { key: String, payload: Vec<u8> },
    Get { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), payload_strategy())
            .prop_map(|(key, payload)| CacheOp::Put { key, payload }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Put immediately followed by Get returns the exact payload.
    #[test]
    fn prop_roundtrip(key in key_strategy(), payload in payload_strategy()) {
        let mut store = CacheStore::new();

        store.put(key.clone(), Bytes::from(payload.clone()));

        prop_assert_eq!(store.get(&key), Some(Bytes::from(payload)));
    }

    // A key that was never written is never found.
    #[test]
    fn prop_miss_for_unwritten_key(
        written in prop::collection::vec((key_strategy(), payload_strategy()), 0..20),
        lookup in key_strategy(),
    ) {
        let mut store = CacheStore::new();
        for (key, payload) in &written {
            store.put(key.clone(), Bytes::from(payload.clone()));
        }

        let was_written = written.iter().any(|(key, _)| key == &lookup);
        prop_assert_eq!(store.get(&lookup).is_some(), was_written);
    }

    // The second of two puts to the same key wins.
    #[test]
    fn prop_overwrite(
        key in key_strategy(),
        first in payload_strategy(),
        second in payload_strategy(),
    ) {
        let mut store = CacheStore::new();

        store.put(key.clone(), Bytes::from(first));
        store.put(key.clone(), Bytes::from(second.clone()));

        prop_assert_eq!(store.get(&key), Some(Bytes::from(second)));
        prop_assert_eq!(store.len(), 1);
    }

    // Any interleaving of puts and gets matches a plain map model.
    #[test]
    fn prop_matches_model(ops in prop::collection::vec(cache_op_strategy(), 1..50)) {
        let mut store = CacheStore::new();
        let mut model: HashMap<String, Vec<u8>> = HashMap::new();

        for op in ops {
            match op {
                CacheOp::Put { key, payload } => {
                    store.put(key.clone(), Bytes::from(payload.clone()));
                    model.insert(key, payload);
                }
                CacheOp::Get { key } => {
                    let expected = model.get(&key).cloned().map(Bytes::from);
                    prop_assert_eq!(store.get(&key), expected);
                }
            }
        }

        prop_assert_eq!(store.len(), model.len());
    }

    // A sweep removes exactly the entries created strictly before the cutoff.
    #[test]
    fn prop_reap_removes_exactly_older_entries(
        ages in prop::collection::vec((key_strategy(), 0u64..100), 1..30),
        cutoff_offset in 0u64..100,
    ) {
        let base = Instant::now();
        let cutoff = base + Duration::from_millis(cutoff_offset);
        let mut store = CacheStore::new();
        let mut model: HashMap<String, u64> = HashMap::new();

        for (key, offset) in &ages {
            store.put_at(
                key.clone(),
                Bytes::from_static(b"data"),
                base + Duration::from_millis(*offset),
            );
            model.insert(key.clone(), *offset);
        }

        let mut reaped = store.reap(cutoff);
        reaped.sort();

        let mut expected: Vec<String> = model
            .iter()
            .filter(|(_, offset)| **offset < cutoff_offset)
            .map(|(key, _)| key.clone())
            .collect();
        expected.sort();

        prop_assert_eq!(reaped, expected);
        for (key, offset) in &model {
            prop_assert_eq!(store.get(key).is_some(), *offset >= cutoff_offset);
        }
    }
}
