// src/core/state/server_state.rs

//! Defines the central `ServerState` struct, holding all shared server-wide state.

use super::auth::AuthState;
use super::sessions::SessionRegistry;
use crate::config::{Config, HandlerKind};
use crate::core::commands::CommandDispatcher;
use crate::core::handler::{MessageHandler, MessageParser, MessagePipeline, SecurityPolicy};
use crate::core::protocol::FrameCodec;
use crate::core::storage::FileStore;
use std::sync::Arc;
use tracing::info;

/// The central struct holding all shared, server-wide state.
///
/// It is built once at startup, wrapped in an `Arc`, and handed to the acceptor
/// and to every connection task. Apart from the session registry and the
/// authentication window, which carry their own locks, it is read-only.
#[derive(Debug)]
pub struct ServerState {
    /// The resolved configuration the server was started with.
    pub config: Config,
    /// All live sessions. The only structure shared mutably between connections.
    pub sessions: Arc<SessionRegistry>,
    /// The bounded set of authenticated senders.
    pub auth: Arc<AuthState>,
    /// Parse -> validate -> handle -> serialize -> deliver.
    pub pipeline: MessagePipeline,
}

impl ServerState {
    pub fn new(config: Config) -> Self {
        let sessions = Arc::new(SessionRegistry::new());
        let auth = Arc::new(AuthState::new(
            config.auth.users.clone(),
            config.max_clients,
        ));

        let handler = match config.handler {
            HandlerKind::Command => MessageHandler::Command(CommandDispatcher::new(
                auth.clone(),
                FileStore::new(&config.storage.root_dir),
            )),
            HandlerKind::Echo => MessageHandler::Echo,
        };
        info!("Message handler: {:?}", config.handler);

        let pipeline = MessagePipeline::new(
            MessageParser::Raw,
            SecurityPolicy::Moderate {
                max_payload_size: config.max_payload_size,
            },
            handler,
            sessions.clone(),
        );

        Self {
            config,
            sessions,
            auth,
            pipeline,
        }
    }

    /// A fresh codec for one connection.
    pub fn frame_codec(&self) -> FrameCodec {
        FrameCodec::new(self.config.delimiter_byte(), self.config.max_buffer_size)
    }

    /// True once the live session count has reached `max_clients`.
    pub fn is_full(&self) -> bool {
        self.sessions.len() >= self.config.max_clients
    }
}
