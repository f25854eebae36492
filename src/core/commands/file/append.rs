// src/core/commands/file/append.rs

use crate::core::commands::command_trait::{CommandContext, ExecutableCommand, ParseCommand};
use crate::core::commands::helpers::{content_arg, path_arg, sender_arg};
use crate::core::commands::reply::{CommandError, Reply};
use async_trait::async_trait;
use tracing::{error, info};

/// `APPEND filename;content` appends to a file, creating it if needed.
#[derive(Debug, Clone, Default)]
pub struct Append {
    pub sender_id: String,
    pub filename: String,
    pub content: String,
}

impl ParseCommand for Append {
    fn parse(args: &[String]) -> Result<Self, CommandError> {
        Ok(Append {
            sender_id: sender_arg(args)?,
            filename: path_arg(args, 1)?,
            content: content_arg(args, 2)?,
        })
    }
}

#[async_trait]
impl ExecutableCommand for Append {
    async fn execute<'a>(&self, ctx: &CommandContext<'a>) -> Result<Reply, CommandError> {
        match ctx.store.append(&self.filename, self.content.as_bytes()).await {
            Ok(()) => {
                info!("APPEND success to: {}", self.filename);
                Ok(Reply::Ok)
            }
            Err(e) => {
                error!("APPEND failed for {}: {}", self.filename, e);
                Err(CommandError::Internal)
            }
        }
    }
}
