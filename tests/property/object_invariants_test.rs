// tests/property/object_invariants_test.rs

//! Property-based tests for the balanced-tree object
//! Tests that ordering, balance and size survive arbitrary insert/remove sequences

use crate::test_helpers::{assert_healthy, keys};
use proptest::prelude::*;
use std::collections::BTreeMap;
use treedoc::{Object, Value};

#[derive(Debug, Clone)]
enum Op {
    Insert(String, i32),
    Remove(String),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    // A small key space makes updates and removals of present keys common.
    let key = "[a-h]{1,2}";
    prop_oneof![
        3 => (key, any::<i32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        2 => key.prop_map(Op::Remove),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 200,
        max_shrink_iters: 1000,
        ..ProptestConfig::default()
    })]

    #[test]
    fn test_object_matches_ordered_map_model(ops in prop::collection::vec(op_strategy(), 1..=200)) {
        let mut object = Object::new();
        let mut model: BTreeMap<String, i32> = BTreeMap::new();

        for op in &ops {
            match op {
                Op::Insert(key, n) => {
                    let created = object.insert(key, &Value::from(*n)).unwrap();
                    prop_assert_eq!(created, model.insert(key.clone(), *n).is_none());
                }
                Op::Remove(key) => {
                    let removed = object.remove(key);
                    match model.remove(key) {
                        Some(n) => prop_assert_eq!(removed.unwrap(), Value::from(n)),
                        None => prop_assert!(removed.is_err()),
                    }
                }
            }
            prop_assert_eq!(object.len(), model.len());
            if let Err(violation) = object.check_invariants() {
                return Err(TestCaseError::fail(format!("after {op:?}: {violation}")));
            }
        }

        assert_healthy(&object);
        let expected: Vec<String> = model.keys().cloned().collect();
        prop_assert_eq!(keys(&object), expected);
        for (key, n) in &model {
            prop_assert_eq!(object.get(key), Some(&Value::from(*n)));
        }
    }

    #[test]
    fn test_insert_is_idempotent(entries in prop::collection::hash_map("[a-z]{1,8}", any::<bool>(), 0..=64)) {
        let mut once = Object::new();
        let mut twice = Object::new();
        for (key, flag) in &entries {
            once.insert(key, &Value::from(*flag)).unwrap();
            twice.insert(key, &Value::from(*flag)).unwrap();
            prop_assert!(!twice.insert(key, &Value::from(*flag)).unwrap());
        }
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(twice.len(), entries.len());
        assert_healthy(&twice);
    }

    #[test]
    fn test_copy_is_independent_of_original(
        initial in prop::collection::btree_set("[a-z]{1,4}", 1..=64),
        extra in prop::collection::vec("[a-z]{1,4}", 1..=16),
    ) {
        let mut original = Object::new();
        for key in &initial {
            original.insert(key, &Value::from(key.as_str())).unwrap();
        }
        let snapshot = keys(&original);

        let mut copy = original.try_clone().unwrap();
        prop_assert_eq!(&copy, &original);
        assert_healthy(&copy);

        for key in &extra {
            copy.insert(key, &Value::from(0)).unwrap();
        }
        for key in &initial {
            let _ = copy.remove(key);
        }

        prop_assert_eq!(keys(&original), snapshot);
        for key in &initial {
            prop_assert_eq!(original.get(key), Some(&Value::from(key.as_str())));
        }
        assert_healthy(&original);
        assert_healthy(&copy);
    }
}
