//! Slash command implementations for the lingo bot

pub mod context;
pub mod dictionary;
pub mod permissions;
pub mod translate;

pub use context::{scope_for, CommandContext, CommandError, Context};
pub use permissions::Permissions;

/// All commands the bot registers with Discord
pub fn commands() -> Vec<poise::Command<CommandContext, CommandError>> {
    vec![translate::translate(), dictionary::dict()]
}
