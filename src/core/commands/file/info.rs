// src/core/commands/file/info.rs

use crate::core::commands::command_trait::{CommandContext, ExecutableCommand, ParseCommand};
use crate::core::commands::helpers::{path_arg, sender_arg};
use crate::core::commands::reply::{CommandError, Reply};
use async_trait::async_trait;
use std::io::ErrorKind;
use tracing::{debug, error, warn};

/// `INFO filename` reports size and last modification time.
#[derive(Debug, Clone, Default)]
pub struct Info {
    pub sender_id: String,
    pub filename: String,
}

impl ParseCommand for Info {
    fn parse(args: &[String]) -> Result<Self, CommandError> {
        Ok(Info {
            sender_id: sender_arg(args)?,
            filename: path_arg(args, 1)?,
        })
    }
}

#[async_trait]
impl ExecutableCommand for Info {
    async fn execute<'a>(&self, ctx: &CommandContext<'a>) -> Result<Reply, CommandError> {
        match ctx.store.stat(&self.filename).await {
            Ok(info) => {
                debug!("INFO retrieved for: {}", self.filename);
                Ok(Reply::Info(info))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("INFO failed: file not found: {}", self.filename);
                Err(CommandError::FileNotFound)
            }
            Err(e) => {
                error!("INFO failed for {}: {}", self.filename, e);
                Err(CommandError::Internal)
            }
        }
    }
}
