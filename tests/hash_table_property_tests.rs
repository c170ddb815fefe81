//! Property-based testing for the open-addressing hash table
//!
//! Validates round-trip, load-factor and probing properties across every hash
//! function and probing strategy using proptest.

use proptest::prelude::*;
use std::collections::{HashMap, VecDeque};
use openhash::HashTableConfig;
use openhash::hash_map::{
    DigitAnalysisHash, HashFunction, OpenHashTable, ProbeStrategy, SquaredDeviation,
};

// =============================================================================
// PROPERTY TEST GENERATORS
// =============================================================================

fn hash_function_strategy() -> impl Strategy<Value = HashFunction> {
    prop_oneof![
        Just(HashFunction::Division),
        Just(HashFunction::Fold),
        Just(HashFunction::Multiplicative),
        Just(HashFunction::Fnv1),
    ]
}

fn probe_strategy() -> impl Strategy<Value = ProbeStrategy> {
    prop_oneof![
        Just(ProbeStrategy::Linear),
        Just(ProbeStrategy::Quadratic),
        Just(ProbeStrategy::DoubleHashing),
    ]
}

/// Sequences of table operations over a small key space so that updates,
/// removals and tombstone reuse all happen
#[derive(Debug, Clone)]
enum TableOp {
    Insert(i64, u32),
    Remove(i64),
    Get(i64),
}

fn table_ops_strategy() -> impl Strategy<Value = Vec<TableOp>> {
    let key = prop_oneof![-300i64..300, any::<i64>()];
    prop::collection::vec(
        prop_oneof![
            3 => (key.clone(), any::<u32>()).prop_map(|(k, v)| TableOp::Insert(k, v)),
            2 => key.clone().prop_map(TableOp::Remove),
            1 => key.prop_map(TableOp::Get),
        ],
        0..600,
    )
}

fn assert_table_shape<V>(table: &OpenHashTable<V>) -> Result<(), TestCaseError> {
    prop_assert!(table.capacity().is_power_of_two());
    prop_assert!(table.capacity() >= 32);
    prop_assert!(table.len() <= table.capacity());
    prop_assert_eq!(
        table.entries().iter().filter(|e| e.is_occupied()).count(),
        table.len()
    );
    prop_assert_eq!(
        table.entries().iter().filter(|e| e.is_deleted()).count(),
        table.deleted_count()
    );
    Ok(())
}

// =============================================================================
// HASH TABLE PROPERTY TESTS
// =============================================================================

proptest! {
    #[test]
    fn prop_insert_then_get_round_trip(
        keys in prop::collection::hash_set(any::<i64>(), 0..400),
        hash in hash_function_strategy(),
        strategy in probe_strategy(),
    ) {
        let mut table = OpenHashTable::with_strategy(32, hash, strategy).unwrap();

        for &key in &keys {
            let outcome = table.insert(key, key.wrapping_mul(3)).unwrap();
            prop_assert!(outcome.previous.is_none());
            prop_assert_eq!(table.get(key), Some(&key.wrapping_mul(3)));
        }

        prop_assert_eq!(table.len(), keys.len());
        for &key in &keys {
            prop_assert_eq!(table.get(key), Some(&key.wrapping_mul(3)));
        }
        assert_table_shape(&table)?;
    }

    #[test]
    fn prop_removed_keys_are_gone(
        keys in prop::collection::hash_set(-10_000i64..10_000, 1..300),
        hash in hash_function_strategy(),
        strategy in probe_strategy(),
    ) {
        let mut table = OpenHashTable::with_strategy(32, hash, strategy).unwrap();
        for &key in &keys {
            table.insert(key, ()).unwrap();
        }

        let (removed, kept): (Vec<i64>, Vec<i64>) = keys.iter().partition(|&&k| k % 2 == 0);
        for &key in &removed {
            prop_assert_eq!(table.remove(key), Some(()));
        }

        for &key in &removed {
            prop_assert_eq!(table.get(key), None);
            let slot = table.search(key);
            prop_assert!(slot.map_or(true, |entry| !entry.is_occupied()));
        }
        for &key in &kept {
            prop_assert!(table.contains_key(key));
        }
        prop_assert_eq!(table.len(), kept.len());
    }

    #[test]
    fn prop_matches_std_hash_map(
        ops in table_ops_strategy(),
        hash in hash_function_strategy(),
        strategy in probe_strategy(),
    ) {
        let mut table = OpenHashTable::with_strategy(32, hash, strategy).unwrap();
        let mut model = HashMap::new();

        for op in ops {
            match op {
                TableOp::Insert(key, value) => {
                    let outcome = table.insert(key, value).unwrap();
                    prop_assert_eq!(outcome.previous, model.insert(key, value));
                }
                TableOp::Remove(key) => {
                    prop_assert_eq!(table.remove(key), model.remove(&key));
                }
                TableOp::Get(key) => {
                    prop_assert_eq!(table.get(key), model.get(&key));
                }
            }
            prop_assert_eq!(table.len(), model.len());
        }

        assert_table_shape(&table)?;
        let mut live: Vec<(i64, u32)> = table.iter().map(|(k, v)| (k, *v)).collect();
        let mut expected: Vec<(i64, u32)> = model.into_iter().collect();
        live.sort_unstable();
        expected.sort_unstable();
        prop_assert_eq!(live, expected);
    }

    #[test]
    fn prop_load_factor_after_growth(
        count in 1usize..2000,
        hash in hash_function_strategy(),
        strategy in probe_strategy(),
    ) {
        let mut table = OpenHashTable::with_strategy(32, hash, strategy).unwrap();
        let mut capacity = table.capacity();

        for key in 0..count as i64 {
            table.insert(key * 1_000_003, key).unwrap();
            if table.capacity() > capacity {
                // growth happens before the insert, at more than half full
                prop_assert!(table.load_factor() <= 0.5);
                capacity = table.capacity();
            }
        }
        assert_table_shape(&table)?;
    }

    #[test]
    fn prop_dense_quadratic_churn_never_fails(
        keys in prop::collection::vec(0i64..100_000, 0..1500),
        hash in hash_function_strategy(),
    ) {
        let config = HashTableConfig::builder()
            .initial_capacity(64)
            .max_load_factor(0.9)
            .min_load_factor(0.1)
            .probe_strategy(ProbeStrategy::Quadratic)
            .build()
            .unwrap();
        let mut table = OpenHashTable::with_config(config, hash).unwrap();
        let mut live = VecDeque::new();

        for key in keys {
            if live.contains(&key) {
                continue;
            }
            if live.len() >= 57 {
                let oldest = live.pop_front().unwrap();
                prop_assert_eq!(table.remove(oldest), Some(oldest));
            }
            prop_assert!(table.insert(key, key).is_ok());
            live.push_back(key);
        }

        prop_assert_eq!(table.len(), live.len());
        for &key in &live {
            prop_assert_eq!(table.get(key), Some(&key));
        }
        assert_table_shape(&table)?;
    }

    #[test]
    fn prop_idempotent_update(
        key in any::<i64>(),
        first in any::<u32>(),
        second in any::<u32>(),
        hash in hash_function_strategy(),
    ) {
        let mut table = OpenHashTable::with_strategy(32, hash, ProbeStrategy::Quadratic).unwrap();
        table.insert(key, first).unwrap();
        let outcome = table.insert(key, second).unwrap();

        prop_assert_eq!(outcome.previous, Some(first));
        prop_assert_eq!(table.len(), 1);
        prop_assert_eq!(table.get(key), Some(&second));
    }

    #[test]
    fn prop_hashes_stay_in_range(
        key in any::<i64>(),
        exponent in 0u32..24,
        hash in hash_function_strategy(),
    ) {
        let table_size = 1usize << exponent;
        prop_assert!(hash.bucket(key, table_size) < table_size);
        prop_assert_eq!(hash.bucket(key, table_size), hash.bucket(key & i64::MAX, table_size));
    }

    #[test]
    fn prop_double_hashing_visits_every_bucket(
        key in any::<i64>(),
        exponent in 5u32..12,
        hash in hash_function_strategy(),
    ) {
        let capacity = 1usize << exponent;
        let mut seen = vec![false; capacity];
        for k in 0..capacity {
            seen[ProbeStrategy::DoubleHashing.probe(key, k, capacity, &hash)] = true;
        }
        prop_assert!(seen.iter().all(|&visited| visited));
    }

    #[test]
    fn prop_linear_visits_every_bucket(
        key in any::<i64>(),
        exponent in 5u32..12,
    ) {
        let capacity = 1usize << exponent;
        let mut seen = vec![false; capacity];
        for k in 0..capacity {
            seen[ProbeStrategy::Linear.probe(key, k, capacity, &HashFunction::Fnv1)] = true;
        }
        prop_assert!(seen.iter().all(|&visited| visited));
    }

    #[test]
    fn prop_shrink_preserves_keys(
        keys in prop::collection::hash_set(any::<i64>(), 200..400),
        keep in 0usize..20,
        strategy in probe_strategy(),
    ) {
        let mut table = OpenHashTable::with_strategy(32, HashFunction::Fnv1, strategy).unwrap();
        for &key in &keys {
            table.insert(key, key).unwrap();
        }

        let keys: Vec<i64> = keys.into_iter().collect();
        for &key in &keys[keep..] {
            table.remove(key);
        }

        let before = table.capacity();
        if table.shrink(0.125).unwrap() {
            prop_assert!(table.capacity() < before);
        }
        prop_assert!(table.load_factor() <= 0.5);
        for &key in &keys[..keep] {
            prop_assert_eq!(table.get(key), Some(&key));
        }
        assert_table_shape(&table)?;
    }

    #[test]
    fn prop_digit_analysis_table_round_trip(
        keys in prop::collection::hash_set(0i64..10_000_000, 1..300),
    ) {
        let sample: Vec<i64> = keys.iter().copied().collect();
        let hash = HashFunction::DigitAnalysis(DigitAnalysisHash::from_keyset(&sample, &SquaredDeviation));
        let mut table = OpenHashTable::with_strategy(64, hash, ProbeStrategy::DoubleHashing).unwrap();

        for &key in &sample {
            table.insert(key, key).unwrap();
        }
        for &key in &sample {
            prop_assert_eq!(table.get(key), Some(&key));
        }
    }
}

// =============================================================================
// SCENARIO TESTS
// =============================================================================

#[test]
fn test_scenario_from_fold_hash() {
    let mut table = OpenHashTable::new(128, HashFunction::Fold, 2).unwrap();
    let pairs = [(-512i64, 7), (128, 8), (256, 12), (91, 80), (22, 45), (1000, 55)];
    for (key, value) in pairs {
        table.insert(key, value).unwrap();
    }

    assert_eq!(table.len(), 6);
    assert_eq!(table.load_factor(), 0.046875);
    for (key, value) in pairs {
        assert_eq!(table.get(key), Some(&value));
    }
}

#[test]
fn test_probe_stats_track_collisions() {
    let mut table = OpenHashTable::new(1024, HashFunction::Division, 1).unwrap();
    // every key lands on bucket 0 and chains linearly
    for i in 0..10i64 {
        table.insert(i * 1024, i).unwrap();
    }

    let stats = table.probe_stats();
    assert_eq!(stats.inserts, 10);
    assert_eq!(stats.max_probes, 10);
    assert_eq!(stats.collisions(), 45);
    assert_eq!(stats.average_probes(), 5.5);
}
