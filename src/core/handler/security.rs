// src/core/handler/security.rs

//! The single validation point every message passes before business logic.

use crate::core::ChatError;
use crate::core::protocol::Message;

/// The default cap on a single payload (5 MiB).
pub const DEFAULT_MAX_PAYLOAD_SIZE: usize = 5 * 1024 * 1024;

/// Stateless security policies. Checks never mutate the message and never
/// log; the pipeline reports rejections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityPolicy {
    /// Rejects payloads larger than `max_payload_size` bytes.
    Moderate { max_payload_size: usize },
}

impl Default for SecurityPolicy {
    fn default() -> Self {
        SecurityPolicy::Moderate {
            max_payload_size: DEFAULT_MAX_PAYLOAD_SIZE,
        }
    }
}

impl SecurityPolicy {
    pub fn validate(&self, msg: &Message) -> Result<(), ChatError> {
        match self {
            SecurityPolicy::Moderate { max_payload_size } => {
                let size = msg.payload.len();
                if size > *max_payload_size {
                    return Err(ChatError::PayloadTooLarge {
                        size,
                        limit: *max_payload_size,
                    });
                }
                Ok(())
            }
        }
    }
}
