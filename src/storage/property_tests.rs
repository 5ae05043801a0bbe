//! Property-Based Tests for Storage Module
//!
//! Uses proptest to check the engine against a plain HashMap model.

use proptest::prelude::*;
use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::storage::{KvStore, RecencyList};

// == Strategies ==
/// Generates keys from a small alphabet so operations collide often
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-e]{1,2}"
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,32}"
}

#[derive(Debug, Clone)]
enum StoreOp {
    Set { key: String, value: String },
    Get { key: String },
    Delete { key: String },
    EvictFront,
}

fn store_op_strategy() -> impl Strategy<Value = StoreOp> {
    prop_oneof![
        3 => (key_strategy(), value_strategy())
            .prop_map(|(key, value)| StoreOp::Set { key, value }),
        2 => key_strategy().prop_map(|key| StoreOp::Get { key }),
        2 => key_strategy().prop_map(|key| StoreOp::Delete { key }),
        1 => Just(StoreOp::EvictFront),
    ]
}

#[derive(Debug, Clone)]
enum ListOp {
    Push,
    MoveToBack(usize),
    Remove(usize),
}

fn list_op_strategy() -> impl Strategy<Value = ListOp> {
    prop_oneof![
        Just(ListOp::Push),
        (0usize..16).prop_map(ListOp::MoveToBack),
        (0usize..16).prop_map(ListOp::Remove),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Set followed by Get returns the stored value.
    #[test]
    fn prop_roundtrip_storage(key in key_strategy(), value in value_strategy()) {
        let store = KvStore::new();

        store.set(&key, value.clone()).unwrap();

        prop_assert_eq!(store.get(&key).unwrap(), Some(value));
    }

    // Delete followed by Get reports the key as absent.
    #[test]
    fn prop_delete_removes_entry(key in key_strategy(), value in value_strategy()) {
        let store = KvStore::new();

        store.set(&key, value).unwrap();
        prop_assert!(store.delete(&key).unwrap());

        prop_assert_eq!(store.get(&key).unwrap(), None);
    }

    // Any interleaving of operations leaves the engine agreeing with a model
    // map, with map and recency list in lock-step.
    #[test]
    fn prop_matches_model(ops in prop::collection::vec(store_op_strategy(), 1..80)) {
        let store = KvStore::new();
        let mut model: HashMap<String, String> = HashMap::new();
        // Keys in write order, oldest first.
        let mut order: Vec<String> = Vec::new();

        for op in ops {
            match op {
                StoreOp::Set { key, value } => {
                    store.set(&key, value.clone()).unwrap();
                    order.retain(|k| k != &key);
                    order.push(key.clone());
                    model.insert(key, value);
                }
                StoreOp::Get { key } => {
                    prop_assert_eq!(store.get(&key).unwrap(), model.get(&key).cloned());
                }
                StoreOp::Delete { key } => {
                    let existed = store.delete(&key).unwrap();
                    prop_assert_eq!(existed, model.remove(&key).is_some());
                    order.retain(|k| k != &key);
                }
                StoreOp::EvictFront => {
                    let cutoff = Instant::now() + Duration::from_secs(60);
                    let evicted = store.delete_front_if_older(cutoff).unwrap();
                    prop_assert_eq!(evicted, !order.is_empty());
                    if evicted {
                        let oldest = order.remove(0);
                        prop_assert!(!store.contains_key(&oldest).unwrap());
                        model.remove(&oldest);
                    }
                }
            }
            prop_assert_eq!(store.len().unwrap(), model.len());
        }

        store.assert_consistent();
        for (key, value) in &model {
            prop_assert_eq!(store.get(key).unwrap(), Some(value.clone()));
        }
    }

    // The recency list behaves like a Vec with retain/push semantics.
    #[test]
    fn prop_recency_list_matches_vec(ops in prop::collection::vec(list_op_strategy(), 1..100)) {
        let mut list = RecencyList::new();
        let mut model: Vec<(crate::storage::SlotId, String)> = Vec::new();
        let mut counter = 0usize;

        for op in ops {
            match op {
                ListOp::Push => {
                    let key = format!("k{counter}");
                    counter += 1;
                    let slot = list.push_back(key.clone());
                    model.push((slot, key));
                }
                ListOp::MoveToBack(index) if !model.is_empty() => {
                    let entry = model.remove(index % model.len());
                    prop_assert!(list.move_to_back(entry.0));
                    model.push(entry);
                }
                ListOp::Remove(index) if !model.is_empty() => {
                    let (slot, key) = model.remove(index % model.len());
                    prop_assert_eq!(list.remove(slot), Some(key));
                }
                _ => {}
            }

            let expected: Vec<&str> = model.iter().map(|(_, k)| k.as_str()).collect();
            let actual: Vec<&str> = list.iter().collect();
            prop_assert_eq!(actual, expected);
            prop_assert_eq!(list.len(), model.len());
        }
    }
}
