// src/core/state/auth.rs

//! Bounded registry of authenticated senders.
//!
//! Authentication is a sliding window over at most `capacity` distinct
//! sender ids. When the window is full, authenticating a new sender evicts the
//! oldest one, which silently loses authorization but stays connected.

use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use tracing::{info, warn};

#[derive(Debug, Default)]
struct AuthInner {
    /// sender id -> username
    users: HashMap<String, String>,
    /// Sender ids in the order they first authenticated.
    queue: VecDeque<String>,
}

/// Credential store plus the FIFO-evicting set of authenticated senders.
#[derive(Debug)]
pub struct AuthState {
    credentials: HashMap<String, String>,
    capacity: usize,
    inner: Mutex<AuthInner>,
}

impl AuthState {
    /// Creates the state with a credential table and the maximum number of
    /// concurrently authenticated senders.
    pub fn new(credentials: HashMap<String, String>, capacity: usize) -> Self {
        Self {
            credentials,
            capacity: capacity.max(1),
            inner: Mutex::new(AuthInner::default()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Checks a username/password pair against the credential table.
    pub fn verify_credentials(&self, username: &str, password: &str) -> bool {
        self.credentials
            .get(username)
            .is_some_and(|expected| expected == password)
    }

    /// True iff `sender_id` currently holds an authenticated record.
    pub fn is_authorized(&self, sender_id: &str) -> bool {
        let authorized = self.inner.lock().users.contains_key(sender_id);
        if !authorized {
            warn!("Unauthorized access attempt blocked from sender {}", sender_id);
        }
        authorized
    }

    /// Records `sender_id` as authenticated as `username`.
    ///
    /// A sender seen for the first time is appended to the eviction queue,
    /// evicting the oldest sender first if the queue is full. A sender that
    /// re-authenticates keeps its queue position and only has its username updated.
    pub fn add_session(&self, sender_id: &str, username: &str) {
        let mut inner = self.inner.lock();

        if !inner.users.contains_key(sender_id) {
            if inner.queue.len() >= self.capacity
                && let Some(oldest) = inner.queue.pop_front()
            {
                inner.users.remove(&oldest);
                info!("Authentication window full. Evicted oldest session {}", oldest);
            }
            inner.queue.push_back(sender_id.to_string());
        }
        inner
            .users
            .insert(sender_id.to_string(), username.to_string());
    }

    /// Drops the authenticated record of `sender_id`, if any.
    pub fn revoke(&self, sender_id: &str) -> bool {
        let mut inner = self.inner.lock();
        if inner.users.remove(sender_id).is_none() {
            return false;
        }
        inner.queue.retain(|id| id != sender_id);
        true
    }

    /// The username `sender_id` authenticated as.
    pub fn username_of(&self, sender_id: &str) -> Option<String> {
        self.inner.lock().users.get(sender_id).cloned()
    }

    /// The number of authenticated senders.
    pub fn len(&self) -> usize {
        self.inner.lock().queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
