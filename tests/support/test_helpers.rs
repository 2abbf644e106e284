// tests/support/test_helpers.rs

//! Shared builders and probes for the test suites.

#![allow(dead_code)]

use treedoc::{Array, Object, Value};

/// Builds an object by inserting `pairs` in the given order.
pub fn object_from_pairs(pairs: &[(&str, Value)]) -> Object {
    let mut object = Object::new();
    for (key, value) in pairs {
        object.insert(key, value).unwrap();
    }
    object
}

/// Builds an array by pushing `values` to the back in order.
pub fn array_of(values: &[Value]) -> Array {
    let mut array = Array::new();
    for value in values {
        array.push_back(value).unwrap();
    }
    array
}

/// Builds an array of numbers.
pub fn number_array(numbers: &[f64]) -> Array {
    let mut array = Array::new();
    for n in numbers {
        array.push_back(&Value::Number(*n)).unwrap();
    }
    array
}

/// Collects the keys of an object in traversal order.
pub fn keys(object: &Object) -> Vec<String> {
    object.keys().map(str::to_owned).collect()
}

/// Collects the numeric elements of an array, panicking on any other variant.
pub fn numbers(array: &Array) -> Vec<f64> {
    array
        .iter()
        .map(|v| v.as_f64().expect("array should only hold numbers"))
        .collect()
}

/// Asserts the AVL and BST invariants and the logarithmic height bound.
pub fn assert_healthy(object: &Object) {
    if let Err(violation) = object.check_invariants() {
        panic!("tree invariant violated: {violation}");
    }
    // An AVL tree with n nodes is at most ~1.44 log2(n + 2) high.
    let bound = 1.45 * ((object.len() + 2) as f64).log2();
    assert!(
        (object.height() as f64) <= bound.ceil(),
        "height {} exceeds AVL bound for {} members",
        object.height(),
        object.len()
    );
}
