// src/core/storage/mod.rs

pub mod file_store;

pub use file_store::{FileInfo, FileStore};
