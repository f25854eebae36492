// src/core/state/sessions.rs

//! Contains the registry of live client sessions and the handles used to reach them.

use bytes::Bytes;
use parking_lot::Mutex;
use std::fmt;
use tokio::sync::mpsc;
use tracing::debug;
use uuid::Uuid;

/// The sending half of a session's outbound queue. Only the owning connection
/// task holds the receiver and writes to the socket.
pub type OutboundSender = mpsc::UnboundedSender<Bytes>;
pub type OutboundReceiver = mpsc::UnboundedReceiver<Bytes>;

/// An opaque, never-reused session identifier (a random v4 UUID).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(String);

impl SessionId {
    /// Generates a fresh identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4().hyphenated().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// The registry's non-owning view of a session: its id and the queue into its
/// execution context.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    id: SessionId,
    outbound: OutboundSender,
}

impl SessionHandle {
    pub fn new(id: SessionId, outbound: OutboundSender) -> Self {
        Self { id, outbound }
    }

    /// Creates a handle together with the receiver its connection task will drain.
    pub fn channel(id: SessionId) -> (Self, OutboundReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(id, tx), rx)
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Queues `data` for the owning task. Returns `false` if that task has already exited.
    fn enqueue(&self, data: Bytes) -> bool {
        self.outbound.send(data).is_ok()
    }
}

/// A thread-safe registry of all live sessions.
///
/// Every operation holds the single registry-wide lock for its whole duration.
/// Delivery never touches a socket: it only pushes bytes onto the target
/// session's own queue, so the lock is never held across I/O.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: Mutex<Vec<SessionHandle>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a session. Returns `false` if a session with the same id is already present.
    pub fn add(&self, handle: SessionHandle) -> bool {
        let mut sessions = self.sessions.lock();
        if sessions.iter().any(|s| s.id == handle.id) {
            debug!("Session {} is already registered.", handle.id);
            return false;
        }
        debug!("Adding session {}.", handle.id);
        sessions.push(handle);
        true
    }

    /// Deregisters a session. Removing an unknown id is a no-op.
    pub fn remove(&self, id: &SessionId) -> bool {
        let mut sessions = self.sessions.lock();
        let before = sessions.len();
        sessions.retain(|s| &s.id != id);
        let removed = sessions.len() != before;
        if removed {
            debug!("Removed session {}.", id);
        }
        removed
    }

    /// Queues `data` onto every live session whose id equals `target`.
    ///
    /// Returns the number of sessions the data was queued for. Delivering to a
    /// session that has been removed, or whose task has already exited, is a
    /// silent no-op.
    pub fn deliver(&self, data: Bytes, target: &SessionId) -> usize {
        let sessions = self.sessions.lock();
        debug!("Delivering {} bytes to session {}.", data.len(), target);
        sessions
            .iter()
            .filter(|s| &s.id == target)
            .filter(|s| s.enqueue(data.clone()))
            .count()
    }

    pub fn contains(&self, id: &SessionId) -> bool {
        self.sessions.lock().iter().any(|s| &s.id == id)
    }

    /// The number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.lock().is_empty()
    }
}
