// src/core/commands/file/read.rs

use crate::core::commands::command_trait::{CommandContext, ExecutableCommand, ParseCommand};
use crate::core::commands::helpers::{path_arg, sender_arg};
use crate::core::commands::reply::{CommandError, Reply};
use async_trait::async_trait;
use tracing::{info, warn};

/// `READ filename` returns the file's size and content.
#[derive(Debug, Clone, Default)]
pub struct Read {
    pub sender_id: String,
    pub filename: String,
}

impl ParseCommand for Read {
    fn parse(args: &[String]) -> Result<Self, CommandError> {
        Ok(Read {
            sender_id: sender_arg(args)?,
            filename: path_arg(args, 1)?,
        })
    }
}

#[async_trait]
impl ExecutableCommand for Read {
    async fn execute<'a>(&self, ctx: &CommandContext<'a>) -> Result<Reply, CommandError> {
        match ctx.store.read(&self.filename).await {
            Ok(content) => {
                info!(
                    "READ success: {} bytes sent: {}",
                    self.filename,
                    content.len()
                );
                Ok(Reply::Content(content))
            }
            Err(e) => {
                warn!("READ failed: {}: {}", self.filename, e);
                Err(CommandError::FileNotFound)
            }
        }
    }
}
