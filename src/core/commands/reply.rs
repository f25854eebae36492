// src/core/commands/reply.rs

//! The two shapes a command result takes on the wire: an `OK ...` reply or an
//! `ERROR <code> <TAG>` error.

use crate::core::storage::FileInfo;
use bytes::{Bytes, BytesMut};
use chrono::SecondsFormat;
use thiserror::Error;

/// A successful command result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// `OK`
    Ok,
    /// `OK AUTHORIZED`
    Authorized,
    /// `OK <size>\n<bytes>`
    Content(Vec<u8>),
    /// `OK <count>\n<name>\n<name>...`
    Listing(Vec<String>),
    /// `OK size=<n> modified=<iso8601>`
    Info(FileInfo),
}

impl Reply {
    /// Renders the wire payload. `Content` bytes are copied through verbatim,
    /// so the size header always matches the body.
    pub fn to_bytes(&self) -> Bytes {
        match self {
            Reply::Ok => Bytes::from_static(b"OK"),
            Reply::Authorized => Bytes::from_static(b"OK AUTHORIZED"),
            Reply::Content(content) => {
                let header = format!("OK {}\n", content.len());
                let mut out = BytesMut::with_capacity(header.len() + content.len());
                out.extend_from_slice(header.as_bytes());
                out.extend_from_slice(content);
                out.freeze()
            }
            Reply::Listing(names) => {
                Bytes::from(format!("OK {}\n{}", names.len(), names.join("\n")))
            }
            Reply::Info(info) => Bytes::from(format!(
                "OK size={} modified={}",
                info.size,
                info.modified.to_rfc3339_opts(SecondsFormat::Secs, true)
            )),
        }
    }
}

/// A failed command result. `Display` renders the exact wire text.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    #[error("ERROR 401 MISSING_CREDENTIALS")]
    MissingCredentials,

    #[error("ERROR 401 UNAUTHORIZED")]
    Unauthorized,

    #[error("ERROR 403 FORBIDDEN")]
    Forbidden,

    #[error("ERROR 404 FILE_NOT_FOUND")]
    FileNotFound,

    #[error("ERROR 404 COMMAND_NOT_FOUND")]
    CommandNotFound,

    #[error("ERROR 409 CONFLICT")]
    Conflict,

    #[error("ERROR 500 INTERNAL_ERROR")]
    Internal,
}

impl CommandError {
    /// The numeric status code.
    pub fn code(&self) -> u16 {
        match self {
            CommandError::MissingCredentials | CommandError::Unauthorized => 401,
            CommandError::Forbidden => 403,
            CommandError::FileNotFound | CommandError::CommandNotFound => 404,
            CommandError::Conflict => 409,
            CommandError::Internal => 500,
        }
    }

    /// The symbolic tag that follows the code.
    pub fn tag(&self) -> &'static str {
        match self {
            CommandError::MissingCredentials => "MISSING_CREDENTIALS",
            CommandError::Unauthorized => "UNAUTHORIZED",
            CommandError::Forbidden => "FORBIDDEN",
            CommandError::FileNotFound => "FILE_NOT_FOUND",
            CommandError::CommandNotFound => "COMMAND_NOT_FOUND",
            CommandError::Conflict => "CONFLICT",
            CommandError::Internal => "INTERNAL_ERROR",
        }
    }
}
