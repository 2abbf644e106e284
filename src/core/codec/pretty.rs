// src/core/codec/pretty.rs

//! Renders a document as indented JSON text.
//!
//! Objects print one `"key": value` member per line in ascending key order,
//! arrays one element per line, each nesting level indented one unit deeper.
//! Entries are separated by commas; the last entry never carries one.

use crate::core::errors::{DocError, DocResult};
use crate::core::storage::array::Array;
use crate::core::storage::object::Object;
use crate::core::value::{Value, as_exact_integer};
use std::fmt::Write;

/// Width of one indentation unit, in spaces.
pub const DEFAULT_INDENT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrettyPrinter {
    indent: usize,
}

impl Default for PrettyPrinter {
    fn default() -> Self {
        Self::new(DEFAULT_INDENT)
    }
}

impl PrettyPrinter {
    pub fn new(indent: usize) -> Self {
        Self { indent }
    }

    pub fn indent(&self) -> usize {
        self.indent
    }

    pub fn object_to_string(&self, object: &Object) -> DocResult<String> {
        let mut out = String::new();
        self.write_object(&mut out, object, 0)?;
        Ok(out)
    }

    pub fn value_to_string(&self, value: &Value) -> DocResult<String> {
        let mut out = String::new();
        self.write_value(&mut out, value, 0)?;
        Ok(out)
    }

    /// Writes `value` as if it started at nesting depth `level`. The caller has
    /// already placed whatever precedes the value on its first line.
    pub fn write_value<W: Write>(&self, out: &mut W, value: &Value, level: usize) -> DocResult<()> {
        match value {
            Value::Boolean(b) => out.write_str(if *b { "true" } else { "false" })?,
            Value::Number(n) => write_number(out, *n)?,
            Value::String(s) => write_string(out, s)?,
            Value::Array(a) => self.write_array(out, a, level)?,
            Value::Object(o) => self.write_object(out, o, level)?,
        }
        Ok(())
    }

    pub fn write_object<W: Write>(&self, out: &mut W, object: &Object, level: usize) -> DocResult<()> {
        if object.is_empty() {
            out.write_str("{}")?;
            return Ok(());
        }
        out.write_str("{\n")?;
        let last = object.len() - 1;
        for (i, (key, value)) in object.iter().enumerate() {
            self.pad(out, level + 1)?;
            write_string(out, key)?;
            out.write_str(": ")?;
            self.write_value(out, value, level + 1)?;
            out.write_str(if i == last { "\n" } else { ",\n" })?;
        }
        self.pad(out, level)?;
        out.write_char('}')?;
        Ok(())
    }

    pub fn write_array<W: Write>(&self, out: &mut W, array: &Array, level: usize) -> DocResult<()> {
        if array.is_empty() {
            out.write_str("[]")?;
            return Ok(());
        }
        out.write_str("[\n")?;
        let last = array.len() - 1;
        for (i, value) in array.iter().enumerate() {
            self.pad(out, level + 1)?;
            self.write_value(out, value, level + 1)?;
            out.write_str(if i == last { "\n" } else { ",\n" })?;
        }
        self.pad(out, level)?;
        out.write_char(']')?;
        Ok(())
    }

    fn pad<W: Write>(&self, out: &mut W, level: usize) -> DocResult<()> {
        for _ in 0..level * self.indent {
            out.write_char(' ')?;
        }
        Ok(())
    }
}

/// Renders an object with the default four-space indentation.
pub fn to_pretty_string(object: &Object) -> DocResult<String> {
    PrettyPrinter::default().object_to_string(object)
}

/// Writes `value` to `out` with the default indentation.
pub fn write_pretty<W: Write>(out: &mut W, value: &Value) -> DocResult<()> {
    PrettyPrinter::default().write_value(out, value, 0)
}

fn write_number<W: Write>(out: &mut W, n: f64) -> DocResult<()> {
    if !n.is_finite() {
        return Err(DocError::InvalidArgument(format!(
            "number {n} has no JSON representation"
        )));
    }
    match as_exact_integer(n) {
        Some(i) => out.write_str(itoa::Buffer::new().format(i))?,
        None => out.write_str(ryu::Buffer::new().format_finite(n))?,
    }
    Ok(())
}

fn write_string<W: Write>(out: &mut W, s: &str) -> DocResult<()> {
    out.write_str(&serde_json::to_string(s)?)?;
    Ok(())
}
