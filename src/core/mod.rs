// src/core/mod.rs

//! The central module containing the document model and its containers.

pub mod codec;
pub mod errors;
pub mod storage;
pub mod value;

pub use errors::{DocError, DocResult};
pub use storage::array::Array;
pub use storage::object::Object;
pub use value::{Kind, Value};
