// src/core/state/mod.rs

//! Defines the central `ServerState` struct and the shared state components it owns.

mod auth;
mod server_state;
mod sessions;

pub use auth::AuthState;
pub use server_state::ServerState;
pub use sessions::{OutboundReceiver, OutboundSender, SessionHandle, SessionId, SessionRegistry};
