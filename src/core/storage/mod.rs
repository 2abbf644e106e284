// src/core/storage/mod.rs

pub mod array;
pub mod object;
pub mod tree;
