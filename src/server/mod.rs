// src/server/mod.rs

use crate::config::Config;
use anyhow::Result;

mod connection_loop;
mod context;
mod initialization;

pub use connection_loop::{serve, shutdown_signal};
pub use context::ServerContext;
pub use initialization::setup;

/// The main server startup function: binds the listener, then accepts
/// connections until SIGINT or SIGTERM.
pub async fn run(config: Config) -> Result<()> {
    // 1. Build the shared state and bind the listener.
    let ctx = initialization::setup(config).await?;

    // 2. Accept connections until a shutdown signal arrives.
    connection_loop::serve(ctx, connection_loop::shutdown_signal()).await;

    Ok(())
}
