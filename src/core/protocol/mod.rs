// src/core/protocol/mod.rs

pub mod frame_codec;
pub mod message;
pub use frame_codec::FrameCodec;
pub use message::Message;
