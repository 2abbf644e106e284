// tests/property/array_test.rs

//! Property-based tests for the dynamic array
//! Tests growth, ordering and the single-variant sort precondition

use crate::test_helpers::{number_array, numbers};
use proptest::prelude::*;
use std::collections::VecDeque;
use treedoc::core::storage::array::DEFAULT_CAPACITY;
use treedoc::{Array, DocError, Value};

#[derive(Debug, Clone)]
enum Op {
    PushBack(i32),
    PushFront(i32),
    PopBack,
    PopFront,
    RemoveAt(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => any::<i32>().prop_map(Op::PushBack),
        3 => any::<i32>().prop_map(Op::PushFront),
        1 => Just(Op::PopBack),
        1 => Just(Op::PopFront),
        1 => (0usize..40).prop_map(Op::RemoveAt),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 200,
        max_shrink_iters: 1000,
        ..ProptestConfig::default()
    })]

    #[test]
    fn test_array_matches_deque_model(ops in prop::collection::vec(op_strategy(), 1..=150)) {
        let mut array = Array::new();
        let mut model: VecDeque<i32> = VecDeque::new();
        let mut last_capacity = array.capacity();

        for op in &ops {
            match *op {
                Op::PushBack(n) => {
                    array.push_back(&Value::from(n)).unwrap();
                    model.push_back(n);
                }
                Op::PushFront(n) => {
                    array.push_front(&Value::from(n)).unwrap();
                    model.push_front(n);
                }
                Op::PopBack => match model.pop_back() {
                    Some(n) => prop_assert_eq!(array.pop_back().unwrap(), Value::from(n)),
                    None => prop_assert_eq!(array.pop_back(), Err(DocError::NotFound)),
                },
                Op::PopFront => match model.pop_front() {
                    Some(n) => prop_assert_eq!(array.pop_front().unwrap(), Value::from(n)),
                    None => prop_assert_eq!(array.pop_front(), Err(DocError::NotFound)),
                },
                Op::RemoveAt(index) => {
                    if index < model.len() {
                        model.remove(index);
                        prop_assert!(array.remove_at(index).is_ok());
                    } else {
                        prop_assert_eq!(array.remove_at(index), Err(DocError::NotFound));
                    }
                }
            }

            // Capacity only grows, by doubling, and always covers the length.
            let capacity = array.capacity();
            prop_assert!(capacity >= array.len());
            prop_assert!(capacity == last_capacity || capacity == last_capacity * 2);
            prop_assert!((capacity / DEFAULT_CAPACITY).is_power_of_two());
            last_capacity = capacity;
        }

        let expected: Vec<f64> = model.iter().map(|n| f64::from(*n)).collect();
        prop_assert_eq!(numbers(&array), expected);
    }

    #[test]
    fn test_sort_orders_numbers(values in prop::collection::vec(-1.0e6f64..1.0e6, 0..=100)) {
        let mut array = number_array(&values);
        array.sort().unwrap();
        let sorted = numbers(&array);
        prop_assert_eq!(sorted.len(), values.len());
        for pair in sorted.windows(2) {
            prop_assert!(pair[0] <= pair[1] + f64::EPSILON);
        }
    }

    #[test]
    fn test_sort_rejects_mixed_variants_without_changes(
        values in prop::collection::vec(any::<i32>(), 1..=50),
        word in "[a-z]{1,5}",
        word_first in any::<bool>(),
    ) {
        let mut array = Array::new();
        for n in &values {
            array.push_back(&Value::from(*n)).unwrap();
        }
        if word_first {
            array.push_front(&Value::from(word.as_str())).unwrap();
        } else {
            array.push_back(&Value::from(word.as_str())).unwrap();
        }
        let before = array.try_clone().unwrap();

        prop_assert_eq!(array.sort(), Err(DocError::Unsupported));
        prop_assert_eq!(&array, &before);
    }
}
