// src/core/codec/mod.rs

//! Text boundaries of the document model: JSON input through `serde_json`,
//! and indented or compact JSON output.

pub mod pretty;
pub mod serde_impl;

use crate::core::errors::DocResult;
use crate::core::storage::object::Object;
use crate::core::value::Value;

pub use pretty::{PrettyPrinter, to_pretty_string, write_pretty};

/// Builds a document tree from JSON text. `null` anywhere in the input is rejected.
pub fn parse_value(text: &str) -> DocResult<Value> {
    Ok(serde_json::from_str(text)?)
}

/// Builds an object from JSON text whose top level must be an object.
pub fn parse_object(text: &str) -> DocResult<Object> {
    Ok(serde_json::from_str(text)?)
}

/// Renders a value as single-line JSON with members in key order.
pub fn to_compact_string(value: &Value) -> DocResult<String> {
    Ok(serde_json::to_string(value)?)
}
