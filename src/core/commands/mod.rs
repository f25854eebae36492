// src/core/commands/mod.rs

//! This module defines all supported commands and the dispatcher that turns a
//! validated `Message` into a response `Message`.
//!
//! The command set is a fixed protocol surface: the `Command` enum is the
//! static verb registry, and each variant maps onto one command struct that
//! implements `ParseCommand` and `ExecutableCommand`.

use crate::core::protocol::Message;
use crate::core::state::AuthState;
use crate::core::storage::FileStore;
use bytes::Bytes;
use std::sync::Arc;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};
use tracing::debug;

pub mod command_trait;
pub mod file;
pub mod generic;
pub mod helpers;
pub mod reply;

pub use command_trait::{CommandContext, CommandFlags, ExecutableCommand, ParseCommand};
pub use reply::{CommandError, Reply};

/// Every verb the server understands. Parsing a verb is case-insensitive.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Command {
    Auth,
    Create,
    Write,
    Append,
    Read,
    Delete,
    Rename,
    List,
    Info,
}

impl Command {
    /// Resolves a client-supplied verb.
    pub fn lookup(verb: &str) -> Option<Self> {
        verb.parse().ok()
    }

    /// The canonical (upper-case) name of the command.
    pub fn name(self) -> &'static str {
        self.into()
    }

    pub fn flags(self) -> CommandFlags {
        match self {
            Command::Auth => CommandFlags::empty(),
            _ => CommandFlags::AUTH_REQUIRED,
        }
    }

    /// Runs the command against `args`, where `args[0]` is the invoking sender.
    ///
    /// Authentication is checked before any argument is inspected, so an
    /// unauthenticated caller always sees `UNAUTHORIZED` rather than a path error.
    pub async fn execute(
        self,
        args: &[String],
        ctx: &CommandContext<'_>,
    ) -> Result<Reply, CommandError> {
        if self.flags().contains(CommandFlags::AUTH_REQUIRED) {
            match args.first() {
                Some(sender_id) if ctx.auth.is_authorized(sender_id) => {}
                _ => return Err(CommandError::Unauthorized),
            }
        }

        match self {
            Command::Auth => generic::Auth::parse(args)?.execute(ctx).await,
            Command::Create => file::Create::parse(args)?.execute(ctx).await,
            Command::Write => file::Write::parse(args)?.execute(ctx).await,
            Command::Append => file::Append::parse(args)?.execute(ctx).await,
            Command::Read => file::Read::parse(args)?.execute(ctx).await,
            Command::Delete => file::Delete::parse(args)?.execute(ctx).await,
            Command::Rename => file::Rename::parse(args)?.execute(ctx).await,
            Command::List => file::List::parse(args)?.execute(ctx).await,
            Command::Info => file::Info::parse(args)?.execute(ctx).await,
        }
    }
}

/// Tokenizes payloads, resolves verbs and runs the matching command.
#[derive(Debug, Clone)]
pub struct CommandDispatcher {
    auth: Arc<AuthState>,
    store: FileStore,
}

impl CommandDispatcher {
    pub fn new(auth: Arc<AuthState>, store: FileStore) -> Self {
        Self { auth, store }
    }

    pub fn auth(&self) -> &Arc<AuthState> {
        &self.auth
    }

    pub fn store(&self) -> &FileStore {
        &self.store
    }

    /// Executes the command carried by `msg` and returns the server's response.
    pub async fn dispatch(&self, msg: &Message) -> Message {
        let text = msg.text();
        let (verb, args) = helpers::tokenize(&text, &msg.sender_id);

        let Some(command) = Command::lookup(verb) else {
            debug!("Unknown verb '{}' from {}", verb, msg.sender_id);
            return Message::from_server(CommandError::CommandNotFound.to_string());
        };

        debug!(
            "Executing {} for {} with {} argument(s)",
            command,
            msg.sender_id,
            args.len() - 1
        );
        let ctx = CommandContext {
            auth: &self.auth,
            store: &self.store,
        };
        let payload = match command.execute(&args, &ctx).await {
            Ok(reply) => reply.to_bytes(),
            Err(e) => Bytes::from(e.to_string()),
        };
        Message::from_server(payload)
    }
}
