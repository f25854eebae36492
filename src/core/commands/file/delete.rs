// src/core/commands/file/delete.rs

use crate::core::commands::command_trait::{CommandContext, ExecutableCommand, ParseCommand};
use crate::core::commands::helpers::{path_arg, sender_arg};
use crate::core::commands::reply::{CommandError, Reply};
use async_trait::async_trait;
use tracing::{info, warn};

/// `DELETE filename` permanently removes a file.
#[derive(Debug, Clone, Default)]
pub struct Delete {
    pub sender_id: String,
    pub filename: String,
}

impl ParseCommand for Delete {
    fn parse(args: &[String]) -> Result<Self, CommandError> {
        Ok(Delete {
            sender_id: sender_arg(args)?,
            filename: path_arg(args, 1)?,
        })
    }
}

#[async_trait]
impl ExecutableCommand for Delete {
    async fn execute<'a>(&self, ctx: &CommandContext<'a>) -> Result<Reply, CommandError> {
        match ctx.store.remove(&self.filename).await {
            Ok(()) => {
                info!(
                    "DELETE success: file removed: {} by {}",
                    self.filename, self.sender_id
                );
                Ok(Reply::Ok)
            }
            Err(e) => {
                warn!("DELETE failed: file missing or locked: {}: {}", self.filename, e);
                Err(CommandError::FileNotFound)
            }
        }
    }
}
