// src/core/protocol/message.rs

//! The `Message` value that travels through the processing pipeline.

use bytes::Bytes;
use std::borrow::Cow;

/// Sender used when a message has not been attributed to anyone.
pub const SYSTEM_SENDER: &str = "System";
/// Sender assigned by the raw parser before the pipeline stamps the session id.
pub const CLIENT_SENDER: &str = "Client";
/// Sender of every response produced by the server itself.
pub const SERVER_SENDER: &str = "Server";

/// A single protocol message: who sent it and the bytes it carries.
///
/// Inbound payloads are always valid UTF-8 (the parser rejects anything
/// else). Responses may carry arbitrary bytes, e.g. the content of a `READ`.
/// Messages are immutable once built and are passed by value between stages.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Message {
    pub sender_id: String,
    pub payload: Bytes,
}

impl Message {
    pub fn new(payload: impl Into<Bytes>, sender_id: impl Into<String>) -> Self {
        Self {
            sender_id: sender_id.into(),
            payload: payload.into(),
        }
    }

    /// Builds a response attributed to the server.
    pub fn from_server(payload: impl Into<Bytes>) -> Self {
        Self::new(payload, SERVER_SENDER)
    }

    /// Returns the same payload re-attributed to `sender_id`.
    pub fn with_sender(self, sender_id: impl Into<String>) -> Self {
        Self {
            sender_id: sender_id.into(),
            payload: self.payload,
        }
    }

    /// The payload as text. Invalid sequences are replaced, so this is only
    /// exact for inbound messages.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.payload)
    }
}

impl Default for Message {
    fn default() -> Self {
        Self::new(Bytes::new(), SYSTEM_SENDER)
    }
}
