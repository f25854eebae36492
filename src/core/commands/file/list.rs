// src/core/commands/file/list.rs

use crate::core::commands::command_trait::{CommandContext, ExecutableCommand, ParseCommand};
use crate::core::commands::helpers::sender_arg;
use crate::core::commands::reply::{CommandError, Reply};
use async_trait::async_trait;
use tracing::{error, info};

/// `LIST` names every file in the storage root.
#[derive(Debug, Clone, Default)]
pub struct List {
    pub sender_id: String,
}

impl ParseCommand for List {
    fn parse(args: &[String]) -> Result<Self, CommandError> {
        Ok(List {
            sender_id: sender_arg(args)?,
        })
    }
}

#[async_trait]
impl ExecutableCommand for List {
    async fn execute<'a>(&self, ctx: &CommandContext<'a>) -> Result<Reply, CommandError> {
        match ctx.store.list().await {
            Ok(names) => {
                info!("LIST command executed. Files found: {}", names.len());
                Ok(Reply::Listing(names))
            }
            Err(e) => {
                error!(
                    "LIST failed for {}: {}",
                    ctx.store.root().display(),
                    e
                );
                Err(CommandError::Internal)
            }
        }
    }
}
