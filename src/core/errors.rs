// src/core/errors.rs

//! Defines the primary error type for the document model.

use std::collections::TryReserveError;
use thiserror::Error;

/// The main error enum, representing every failure a document operation can report.
/// Using `thiserror` allows for clean error definitions and automatic `From` trait implementations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocError {
    /// Malformed input: a missing payload, a variant outside the model,
    /// or two values of different variants handed to a same-variant comparison.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Key or index not found")]
    NotFound,

    #[error("Operation not supported on an array holding mixed variants")]
    Unsupported,

    #[error("Container would exceed its maximum element count")]
    TooLarge,

    #[error("Out of memory")]
    OutOfMemory,

    /// Errors raised while bridging to or from `serde_json`.
    #[error("JSON error: {0}")]
    Json(String),

    /// The output sink rejected a write while rendering text.
    #[error("Formatting error")]
    Format,
}

impl From<TryReserveError> for DocError {
    fn from(_: TryReserveError) -> Self {
        DocError::OutOfMemory
    }
}

impl From<serde_json::Error> for DocError {
    fn from(e: serde_json::Error) -> Self {
        DocError::Json(e.to_string())
    }
}

impl From<std::fmt::Error> for DocError {
    fn from(_: std::fmt::Error) -> Self {
        DocError::Format
    }
}

/// A shorthand for results produced by document operations.
pub type DocResult<T> = Result<T, DocError>;
