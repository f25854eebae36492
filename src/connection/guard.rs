// src/connection/guard.rs

//! Defines `ConnectionGuard`, an RAII guard for connection resource management.

use crate::core::state::{ServerState, SessionId};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, info};

/// Deregisters a session when the connection handler's scope is exited, no
/// matter how the connection ended.
///
/// The guard must be dropped before the socket: once it has run, no new
/// delivery can be queued for the session, and anything still queued is
/// discarded together with the receiver.
pub struct ConnectionGuard {
    /// A shared reference to the server state.
    pub(crate) state: Arc<ServerState>,
    /// The session being guarded.
    pub(crate) session_id: SessionId,
    /// The network address of the client.
    pub(crate) addr: SocketAddr,
}

impl ConnectionGuard {
    pub(crate) fn new(state: Arc<ServerState>, session_id: SessionId, addr: SocketAddr) -> Self {
        Self {
            state,
            session_id,
            addr,
        }
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        info!("Client [{}] at {} disconnected.", self.session_id, self.addr);

        if !self.state.sessions.remove(&self.session_id) {
            debug!(
                "Session {} was not in the registry upon cleanup.",
                self.session_id
            );
        }

        // Taken only after the registry lock has been released.
        if self.state.auth.revoke(self.session_id.as_str()) {
            debug!("Revoked authentication for session {}.", self.session_id);
        }
    }
}
