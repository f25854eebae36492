// src/core/commands/generic/mod.rs

pub mod auth;

pub use self::auth::Auth;
