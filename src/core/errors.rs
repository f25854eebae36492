// src/core/errors.rs

//! Defines the primary error type for the server's transport and pipeline layers.

use std::sync::Arc;
use thiserror::Error;

/// The main error enum for everything below the command layer: sockets, framing
/// and the message pipeline stages.
///
/// Failures that a client is allowed to see are modelled separately by
/// [`CommandError`](crate::core::commands::CommandError); nothing in this enum is
/// ever serialized back onto the wire.
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("IO Error: {0}")]
    Io(Arc<std::io::Error>),

    /// The peer buffered more than the allowed number of bytes without sending a delimiter.
    #[error("Frame exceeds the buffer limit of {limit} bytes without a delimiter")]
    FrameTooLong { limit: usize },

    /// A frame could not be turned into a `Message` (e.g. it is not valid UTF-8).
    #[error("Malformed frame: {0}")]
    MalformedFrame(String),

    #[error("Payload of {size} bytes exceeds the maximum of {limit} bytes")]
    PayloadTooLarge { size: usize, limit: usize },

    #[error("Internal Server Error: {0}")]
    Internal(String),
}

// Manual implementation of Clone because `std::io::Error` is not cloneable.
impl Clone for ChatError {
    fn clone(&self) -> Self {
        match self {
            ChatError::Io(e) => ChatError::Io(Arc::clone(e)),
            ChatError::FrameTooLong { limit } => ChatError::FrameTooLong { limit: *limit },
            ChatError::MalformedFrame(s) => ChatError::MalformedFrame(s.clone()),
            ChatError::PayloadTooLarge { size, limit } => ChatError::PayloadTooLarge {
                size: *size,
                limit: *limit,
            },
            ChatError::Internal(s) => ChatError::Internal(s.clone()),
        }
    }
}

impl PartialEq for ChatError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ChatError::Io(e1), ChatError::Io(e2)) => e1.kind() == e2.kind(),
            (ChatError::FrameTooLong { limit: l1 }, ChatError::FrameTooLong { limit: l2 }) => {
                l1 == l2
            }
            (ChatError::MalformedFrame(s1), ChatError::MalformedFrame(s2)) => s1 == s2,
            (
                ChatError::PayloadTooLarge { size: s1, limit: l1 },
                ChatError::PayloadTooLarge { size: s2, limit: l2 },
            ) => s1 == s2 && l1 == l2,
            (ChatError::Internal(s1), ChatError::Internal(s2)) => s1 == s2,
            _ => false,
        }
    }
}

impl ChatError {
    /// True for the errors a peer produces by simply going away.
    pub fn is_normal_disconnect(&self) -> bool {
        matches!(self, ChatError::Io(e) if matches!(
            e.kind(),
            std::io::ErrorKind::ConnectionReset
                | std::io::ErrorKind::BrokenPipe
                | std::io::ErrorKind::UnexpectedEof
                | std::io::ErrorKind::ConnectionAborted
        ))
    }
}

impl From<std::io::Error> for ChatError {
    fn from(e: std::io::Error) -> Self {
        ChatError::Io(Arc::new(e))
    }
}

impl From<std::str::Utf8Error> for ChatError {
    fn from(e: std::str::Utf8Error) -> Self {
        ChatError::MalformedFrame(e.to_string())
    }
}
