// src/core/commands/generic/auth.rs

use crate::core::commands::command_trait::{CommandContext, ExecutableCommand, ParseCommand};
use crate::core::commands::helpers::sender_arg;
use crate::core::commands::reply::{CommandError, Reply};
use async_trait::async_trait;
use tracing::{debug, info, warn};

/// `AUTH username;password`
#[derive(Debug, Clone, Default)]
pub struct Auth {
    pub sender_id: String,
    pub username: String,
    pub password: String,
}

impl ParseCommand for Auth {
    fn parse(args: &[String]) -> Result<Self, CommandError> {
        if args.len() < 3 {
            warn!("AUTH attempt failed: missing arguments.");
            return Err(CommandError::MissingCredentials);
        }

        Ok(Auth {
            sender_id: sender_arg(args)?,
            username: args[1].clone(),
            password: args[2].clone(),
        })
    }
}

#[async_trait]
impl ExecutableCommand for Auth {
    async fn execute<'a>(&self, ctx: &CommandContext<'a>) -> Result<Reply, CommandError> {
        debug!("Processing AUTH request from {}", self.sender_id);

        if ctx.auth.verify_credentials(&self.username, &self.password) {
            ctx.auth.add_session(&self.sender_id, &self.username);
            info!(
                "User [{}] successfully authenticated from sender {}",
                self.username, self.sender_id
            );
            return Ok(Reply::Authorized);
        }

        warn!(
            "Authentication failed for user [{}] from sender {}",
            self.username, self.sender_id
        );
        Err(CommandError::Unauthorized)
    }
}
