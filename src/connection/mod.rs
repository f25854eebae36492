// src/connection/mod.rs

//! Manages the lifecycle of a single client TCP connection: framing, pipeline
//! invocation, outbound delivery and deregistration.

mod guard;
mod handler;

pub use guard::ConnectionGuard;
pub use handler::ConnectionHandler;
