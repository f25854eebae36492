// src/core/mod.rs

//! The central module containing the core logic and data structures of the server.

pub mod commands;
pub mod errors;
pub mod handler;
pub mod protocol;
pub mod state;
pub mod storage;

pub use commands::Command;
pub use errors::ChatError;
pub use protocol::Message;
