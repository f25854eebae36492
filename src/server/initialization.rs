// src/server/initialization.rs

//! Handles server initialization: state construction, storage root checks and
//! binding the listener.

use super::context::ServerContext;
use crate::config::{Config, HandlerKind};
use crate::core::state::ServerState;
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tracing::info;

/// Initializes all server components before starting the main loop.
pub async fn setup(config: Config) -> Result<ServerContext> {
    log_startup_info(&config);
    let (shutdown_tx, _) = broadcast::channel(1);

    if config.handler == HandlerKind::Command {
        tokio::fs::create_dir_all(&config.storage.root_dir)
            .await
            .with_context(|| {
                format!(
                    "Failed to prepare storage root '{}'",
                    config.storage.root_dir
                )
            })?;
    }

    let state = Arc::new(ServerState::new(config));
    info!("Server state initialized.");

    let listener = TcpListener::bind((state.config.host.as_str(), state.config.port))
        .await
        .with_context(|| {
            format!(
                "Failed to bind {}:{}",
                state.config.host, state.config.port
            )
        })?;
    info!("FileChat server listening on {}", listener.local_addr()?);

    Ok(ServerContext {
        state,
        listener,
        shutdown_tx,
    })
}

fn log_startup_info(config: &Config) {
    info!("Starting FileChat server v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Frame delimiter {:?}, max payload {} bytes, max buffered {} bytes.",
        config.delimiter, config.max_payload_size, config.max_buffer_size
    );
    info!(
        "Accepting up to {} clients; {} account(s) configured.",
        config.max_clients,
        config.auth.users.len()
    );
    if config.handler == HandlerKind::Command {
        info!("Serving files from '{}'.", config.storage.root_dir);
    }
}
