// src/core/commands/file/rename.rs

use crate::core::commands::command_trait::{CommandContext, ExecutableCommand, ParseCommand};
use crate::core::commands::helpers::{path_arg, sender_arg};
use crate::core::commands::reply::{CommandError, Reply};
use async_trait::async_trait;
use tracing::{error, info};

/// `RENAME old;new`
#[derive(Debug, Clone, Default)]
pub struct Rename {
    pub sender_id: String,
    pub from: String,
    pub to: String,
}

impl ParseCommand for Rename {
    fn parse(args: &[String]) -> Result<Self, CommandError> {
        Ok(Rename {
            sender_id: sender_arg(args)?,
            from: path_arg(args, 1)?,
            to: path_arg(args, 2)?,
        })
    }
}

#[async_trait]
impl ExecutableCommand for Rename {
    async fn execute<'a>(&self, ctx: &CommandContext<'a>) -> Result<Reply, CommandError> {
        match ctx.store.rename(&self.from, &self.to).await {
            Ok(()) => {
                info!("RENAME success: {} -> {}", self.from, self.to);
                Ok(Reply::Ok)
            }
            Err(e) => {
                error!("RENAME failed for path {}: {}", self.from, e);
                Err(CommandError::Internal)
            }
        }
    }
}
