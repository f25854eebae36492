// src/core/handler/mod.rs

//! The message processing pipeline and its stages.

pub mod message_handler;
pub mod message_pipeline;
pub mod parser;
pub mod security;

pub use message_handler::MessageHandler;
pub use message_pipeline::{DropReason, MessagePipeline, PipelineOutcome};
pub use parser::MessageParser;
pub use security::SecurityPolicy;
