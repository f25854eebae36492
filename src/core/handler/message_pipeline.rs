// src/core/handler/message_pipeline.rs

//! The central component that carries a frame from raw bytes to delivered response.
//!
//! The `MessagePipeline` runs every frame through Parse -> Validate -> Handle ->
//! Serialize -> Deliver. Each stage can end the frame's journey early; when it
//! does, the frame is dropped silently and the sender receives nothing.

use super::message_handler::MessageHandler;
use super::parser::MessageParser;
use super::security::SecurityPolicy;
use crate::core::state::{SessionId, SessionRegistry};
use bytes::Bytes;
use std::sync::Arc;
use tracing::{Instrument, debug, debug_span, warn};

/// Why a frame produced no delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// The frame could not be parsed into a message.
    Malformed,
    /// The security policy rejected the message.
    Rejected,
    /// The handler's response serialized to nothing.
    EmptyResponse,
}

/// What happened to one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// The response was queued for this many sessions (zero if the addressee is gone).
    Delivered { recipients: usize },
    Dropped(DropReason),
}

/// Parser, policy and handler wired together with the registry used for delivery.
#[derive(Debug, Clone)]
pub struct MessagePipeline {
    parser: MessageParser,
    security: SecurityPolicy,
    handler: MessageHandler,
    sessions: Arc<SessionRegistry>,
}

impl MessagePipeline {
    pub fn new(
        parser: MessageParser,
        security: SecurityPolicy,
        handler: MessageHandler,
        sessions: Arc<SessionRegistry>,
    ) -> Self {
        Self {
            parser,
            security,
            handler,
            sessions,
        }
    }

    pub fn sessions(&self) -> &Arc<SessionRegistry> {
        &self.sessions
    }

    /// Processes one frame from `origin` and delivers the response.
    ///
    /// The response is addressed to the originating session only.
    pub async fn process_and_broadcast(&self, data: &[u8], origin: &SessionId) -> PipelineOutcome {
        let span = debug_span!("frame", session = %origin, len = data.len());

        async move {
            let response = match self.process(data, origin).await {
                Ok(response) => response,
                Err(reason) => return PipelineOutcome::Dropped(reason),
            };

            if response.is_empty() {
                debug!("Broadcast skipped: response is empty.");
                return PipelineOutcome::Dropped(DropReason::EmptyResponse);
            }

            let recipients = self.broadcast(response, origin);
            PipelineOutcome::Delivered { recipients }
        }
        .instrument(span)
        .await
    }

    /// Runs the parse, validate, handle and serialize stages.
    pub async fn process(&self, data: &[u8], origin: &SessionId) -> Result<Bytes, DropReason> {
        // 1. Parsing. The transport-supplied session id always replaces any
        //    sender the parser assigned.
        let msg = match self.parser.parse(data) {
            Ok(msg) => msg.with_sender(origin.as_str()),
            Err(e) => {
                debug!("Dropping unparseable frame: {}", e);
                return Err(DropReason::Malformed);
            }
        };

        // 2. Security validation.
        if let Err(e) = self.security.validate(&msg) {
            warn!("Security validation failed for {}, dropping packet: {}", msg.sender_id, e);
            return Err(DropReason::Rejected);
        }

        // 3. Business logic.
        debug!("Executing message handler.");
        let response = self.handler.handle(&msg).await;

        // 4. Serialization.
        Ok(self.parser.serialize(&response))
    }

    fn broadcast(&self, data: Bytes, origin: &SessionId) -> usize {
        debug!("Delivering response to session {}.", origin);
        self.sessions.deliver(data, origin)
    }
}
