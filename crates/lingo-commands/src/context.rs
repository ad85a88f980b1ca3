//! Command context and framework integration

use std::sync::Arc;

use lingo_config::Config;
use lingo_dict::{DictionaryStore, DM_SCOPE};
use lingo_translate::Resolver;

use crate::Permissions;

/// Shared application state accessible across commands and event handlers
pub struct CommandContext {
    /// Application configuration
    pub config: Arc<Config>,
    /// Community override dictionary
    pub store: Arc<DictionaryStore>,
    /// Translation resolution engine
    pub resolver: Arc<Resolver>,
    /// Permission checks for dictionary moderation
    pub permissions: Arc<Permissions>,
}

impl std::fmt::Debug for CommandContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandContext")
            .field("config", &"<Config>")
            .field("store", &self.store)
            .field("resolver", &"<Resolver>")
            .field("permissions", &self.permissions)
            .finish()
    }
}

/// Error type for commands
pub type CommandError = Box<dyn std::error::Error + Send + Sync>;

/// Poise context type alias
pub type Context<'a> = poise::Context<'a, CommandContext, CommandError>;

/// Dictionary scope for the invoking context: the guild ID, or the DM
/// sentinel outside a guild
pub fn scope_for(ctx: &Context<'_>) -> String {
    ctx.guild_id()
        .map(|g| g.get().to_string())
        .unwrap_or_else(|| DM_SCOPE.to_string())
}

/// Build an ephemeral reply so failures do not clutter shared channels
pub fn ephemeral_reply(content: String) -> poise::CreateReply {
    poise::CreateReply::default()
        .content(content)
        .ephemeral(true)
}

/// Send an ephemeral reply
pub async fn reply_ephemeral(ctx: &Context<'_>, content: String) -> Result<(), CommandError> {
    ctx.send(ephemeral_reply(content)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ephemeral_reply_sets_the_flag() {
        let reply = ephemeral_reply("something went wrong".to_string());
        assert_eq!(reply.ephemeral, Some(true));
        assert_eq!(reply.content.as_deref(), Some("something went wrong"));
    }
}
