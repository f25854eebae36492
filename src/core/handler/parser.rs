// src/core/handler/parser.rs

//! Converts between frame bytes and `Message` values.

use crate::core::ChatError;
use crate::core::protocol::Message;
use crate::core::protocol::message::CLIENT_SENDER;
use bytes::Bytes;

/// The message parsers the server can run. Only the raw 1:1 mapping exists today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MessageParser {
    /// The whole frame is the payload; serialization writes the payload back verbatim.
    #[default]
    Raw,
}

impl MessageParser {
    /// Parses one frame. Frames that are not valid UTF-8 are rejected.
    pub fn parse(&self, data: &[u8]) -> Result<Message, ChatError> {
        match self {
            MessageParser::Raw => {
                std::str::from_utf8(data)?;
                Ok(Message::new(Bytes::copy_from_slice(data), CLIENT_SENDER))
            }
        }
    }

    /// Serializes a message for the wire. The delimiter is added by the frame codec.
    pub fn serialize(&self, msg: &Message) -> Bytes {
        match self {
            MessageParser::Raw => msg.payload.clone(),
        }
    }
}
