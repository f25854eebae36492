// src/server/connection_loop.rs

//! Contains the main server loop for accepting connections and handling graceful shutdown.

use super::context::ServerContext;
use crate::connection::ConnectionHandler;
use crate::core::state::{SessionHandle, SessionId};
use std::future::Future;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

/// Accepts connections until `shutdown` resolves, then closes every session.
///
/// Each accepted socket gets its own task. The session is registered here,
/// before the task is spawned, so the live count checked against
/// `max_clients` is never behind.
pub async fn serve(ctx: ServerContext, shutdown: impl Future<Output = ()>) {
    let mut client_tasks = JoinSet::new();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;

            _ = &mut shutdown => {
                info!("Shutdown requested, no longer accepting connections.");
                break;
            }

            res = ctx.listener.accept() => {
                let (socket, addr) = match res {
                    Ok(accepted) => accepted,
                    Err(e) => {
                        error!("Failed to accept connection: {}", e);
                        continue;
                    }
                };

                if ctx.state.is_full() {
                    warn!(
                        "Rejecting connection from {}: max_clients ({}) reached.",
                        addr, ctx.state.config.max_clients
                    );
                    drop(socket);
                    continue;
                }

                info!("Accepted new connection from: {}", addr);
                if let Err(e) = socket.set_nodelay(true) {
                    debug!("Could not set TCP_NODELAY for {}: {}", addr, e);
                }

                let session_id = SessionId::new();
                let (handle, outbound_rx) = SessionHandle::channel(session_id.clone());
                ctx.state.sessions.add(handle);
                info!("Client [{}] connected from {}.", session_id, addr);

                let handler = ConnectionHandler::new(
                    socket,
                    addr,
                    ctx.state.clone(),
                    session_id,
                    outbound_rx,
                    ctx.shutdown_tx.subscribe(),
                );
                client_tasks.spawn(async move {
                    if let Err(e) = handler.run().await {
                        warn!("Connection from {} terminated unexpectedly: {}", addr, e);
                    }
                });
            },

            Some(res) = client_tasks.join_next() => {
                if let Err(e) = res
                    && e.is_panic()
                {
                    error!("A client handler panicked: {e:?}");
                }
            },
        }
    }

    info!("Shutting down. Sending signal to all connections.");
    if ctx.shutdown_tx.send(()).is_err() {
        debug!("No live connections to notify.");
    }

    client_tasks.shutdown().await;
    info!(
        "All client connections closed. {} session(s) left in registry.",
        ctx.state.sessions.len()
    );
    info!("Server shutdown complete.");
}

/// Resolves on the first SIGINT or SIGTERM.
#[cfg(unix)]
pub async fn shutdown_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    let (mut sigint, mut sigterm) = match (
        signal(SignalKind::interrupt()),
        signal(SignalKind::terminate()),
    ) {
        (Ok(sigint), Ok(sigterm)) => (sigint, sigterm),
        (Err(e), _) | (_, Err(e)) => {
            error!("Failed to register signal handlers: {}. Falling back to Ctrl-C.", e);
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for Ctrl-C: {}", e);
            }
            return;
        }
    };

    tokio::select! {
        _ = sigint.recv() => info!("SIGINT received, initiating graceful shutdown."),
        _ = sigterm.recv() => info!("SIGTERM received, initiating graceful shutdown."),
    }
}

/// Resolves on Ctrl-C.
#[cfg(not(unix))]
pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Ctrl-C received, initiating graceful shutdown."),
        Err(e) => error!("Failed to listen for Ctrl-C: {}", e),
    }
}
