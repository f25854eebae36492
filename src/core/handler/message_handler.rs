// src/core/handler/message_handler.rs

//! The business-logic stage of the pipeline.

use crate::core::commands::CommandDispatcher;
use crate::core::protocol::Message;
use bytes::BytesMut;

/// Suffix the echo handler appends to every payload.
pub const ECHO_SUFFIX: &str = " from server.";

/// The closed set of message handlers.
#[derive(Debug, Clone)]
pub enum MessageHandler {
    /// Executes protocol commands (`AUTH`, `CREATE`, ...).
    Command(CommandDispatcher),
    /// Returns the message unchanged apart from a fixed suffix.
    Echo,
}

impl MessageHandler {
    pub async fn handle(&self, msg: &Message) -> Message {
        match self {
            MessageHandler::Command(dispatcher) => dispatcher.dispatch(msg).await,
            MessageHandler::Echo => {
                let mut body = BytesMut::with_capacity(msg.payload.len() + ECHO_SUFFIX.len());
                body.extend_from_slice(&msg.payload);
                body.extend_from_slice(ECHO_SUFFIX.as_bytes());
                Message::new(body.freeze(), msg.sender_id.clone())
            }
        }
    }
}
