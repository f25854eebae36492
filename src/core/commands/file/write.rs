// src/core/commands/file/write.rs

use crate::core::commands::command_trait::{CommandContext, ExecutableCommand, ParseCommand};
use crate::core::commands::helpers::{content_arg, path_arg, sender_arg};
use crate::core::commands::reply::{CommandError, Reply};
use async_trait::async_trait;
use tracing::{error, info, warn};

/// `WRITE filename;content` replaces a file's content.
#[derive(Debug, Clone, Default)]
pub struct Write {
    pub sender_id: String,
    pub filename: String,
    pub content: String,
}

impl ParseCommand for Write {
    fn parse(args: &[String]) -> Result<Self, CommandError> {
        let sender_id = sender_arg(args)?;
        let parsed = path_arg(args, 1).and_then(|filename| Ok((filename, content_arg(args, 2)?)));
        let (filename, content) = parsed.inspect_err(|_| {
            warn!("WRITE rejected: invalid path or missing content. Sender: {sender_id}");
        })?;
        Ok(Write {
            sender_id,
            filename,
            content,
        })
    }
}

#[async_trait]
impl ExecutableCommand for Write {
    async fn execute<'a>(&self, ctx: &CommandContext<'a>) -> Result<Reply, CommandError> {
        match ctx.store.write(&self.filename, self.content.as_bytes()).await {
            Ok(()) => {
                info!(
                    "WRITE success: {} size: {}",
                    self.filename,
                    self.content.len()
                );
                Ok(Reply::Ok)
            }
            Err(e) => {
                error!("WRITE failed: file not accessible: {}: {}", self.filename, e);
                Err(CommandError::FileNotFound)
            }
        }
    }
}
