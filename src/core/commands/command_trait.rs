// src/core/commands/command_trait.rs

//! Defines the core traits for all executable commands.

use super::reply::{CommandError, Reply};
use crate::core::state::AuthState;
use crate::core::storage::FileStore;
use async_trait::async_trait;
use bitflags::bitflags;

bitflags! {
    /// Flags that describe the properties and behavior of a command.
    /// The dispatcher uses them to gate commands before they are parsed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct CommandFlags: u32 {
        /// The caller must hold an authenticated session.
        const AUTH_REQUIRED = 1 << 0;
    }
}

/// Shared, read-mostly state a command executes against.
#[derive(Debug, Clone, Copy)]
pub struct CommandContext<'a> {
    pub auth: &'a AuthState,
    pub store: &'a FileStore,
}

/// A trait for the actual execution logic of a command.
/// Implemented by each command's struct (e.g., `Auth`, `Create`).
#[async_trait]
pub trait ExecutableCommand {
    async fn execute<'a>(&self, ctx: &CommandContext<'a>) -> Result<Reply, CommandError>;
}

/// A trait for building a command from its argument list.
///
/// `args[0]` is always the id of the invoking sender; client-supplied
/// arguments follow it.
pub trait ParseCommand: Sized {
    fn parse(args: &[String]) -> Result<Self, CommandError>;
}
