// src/core/value/compare.rs

//! The comparator table: one ordering function per variant.
//!
//! Containers are ordered shallowly, by size alone, so arrays of arrays can be
//! sorted without descending into nested structures.

use super::{Kind, Value};
use std::cmp::Ordering;

/// Two numbers closer than this are considered equal.
pub const NUMBER_EPSILON: f64 = f64::EPSILON;

/// Orders two values that share a variant.
pub type Comparator = fn(&Value, &Value) -> Ordering;

/// Resolves the comparator for a variant. Sorting looks this up once per call.
pub fn comparator(kind: Kind) -> Comparator {
    match kind {
        Kind::Boolean => compare_booleans,
        Kind::Number => compare_number_values,
        Kind::String => compare_strings,
        Kind::Array => compare_arrays,
        Kind::Object => compare_objects,
    }
}

/// The comparison used by array searches. Values of different variants yield
/// the caller's `different` ordering instead of being compared.
pub fn find_cmp(value: &Value, target: &Value, different: Ordering) -> Ordering {
    if value.kind() != target.kind() {
        return different;
    }
    comparator(value.kind())(value, target)
}

/// Orders two numbers, treating values within `NUMBER_EPSILON` of each other as equal.
/// Equal infinities compare equal; NaN falls back to `f64::total_cmp`.
pub fn compare_numbers(a: f64, b: f64) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    if a.is_nan() || b.is_nan() {
        return a.total_cmp(&b);
    }
    let diff = a - b;
    if diff.abs() < NUMBER_EPSILON {
        Ordering::Equal
    } else if diff < 0.0 {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

fn compare_booleans(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Boolean(x), Value::Boolean(y)) => x.cmp(y),
        _ => by_kind(a, b),
    }
}

fn compare_number_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => compare_numbers(*x, *y),
        _ => by_kind(a, b),
    }
}

fn compare_strings(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::String(x), Value::String(y)) => x.as_bytes().cmp(y.as_bytes()),
        _ => by_kind(a, b),
    }
}

fn compare_arrays(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Array(x), Value::Array(y)) => x.len().cmp(&y.len()),
        _ => by_kind(a, b),
    }
}

fn compare_objects(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Object(x), Value::Object(y)) => x.len().cmp(&y.len()),
        _ => by_kind(a, b),
    }
}

/// Breaks ties left by the epsilon comparison so sorting sees a total order.
/// Non-numeric pairs are left equal.
pub fn sort_tiebreak(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.total_cmp(y),
        _ => Ordering::Equal,
    }
}

// Fallback for a comparator handed the wrong variant.
fn by_kind(a: &Value, b: &Value) -> Ordering {
    a.kind().cmp(&b.kind())
}
