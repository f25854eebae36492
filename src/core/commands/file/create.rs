// src/core/commands/file/create.rs

use crate::core::commands::command_trait::{CommandContext, ExecutableCommand, ParseCommand};
use crate::core::commands::helpers::{path_arg, sender_arg};
use crate::core::commands::reply::{CommandError, Reply};
use async_trait::async_trait;
use std::io::ErrorKind;
use tracing::{error, info, warn};

/// `CREATE filename` creates a new empty file.
#[derive(Debug, Clone, Default)]
pub struct Create {
    pub sender_id: String,
    pub filename: String,
}

impl ParseCommand for Create {
    fn parse(args: &[String]) -> Result<Self, CommandError> {
        let sender_id = sender_arg(args)?;
        let filename = path_arg(args, 1).inspect_err(|_| {
            warn!("CREATE rejected: invalid or missing path. Requested by {sender_id}");
        })?;
        Ok(Create {
            sender_id,
            filename,
        })
    }
}

#[async_trait]
impl ExecutableCommand for Create {
    async fn execute<'a>(&self, ctx: &CommandContext<'a>) -> Result<Reply, CommandError> {
        if ctx.store.exists(&self.filename).await {
            warn!("CREATE conflict: file already exists: {}", self.filename);
            return Err(CommandError::Conflict);
        }

        match ctx.store.create_new(&self.filename).await {
            Ok(()) => {
                info!(
                    "File created successfully: {} by {}",
                    self.filename, self.sender_id
                );
                Ok(Reply::Ok)
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                warn!("CREATE conflict: file already exists: {}", self.filename);
                Err(CommandError::Conflict)
            }
            Err(e) => {
                error!("File creation failed (I/O error) for {}: {}", self.filename, e);
                Err(CommandError::Internal)
            }
        }
    }
}
