//! Flag-reaction translation path
//!
//! A flag-emoji reaction on a message asks the bot to translate that
//! message into the flag's language. Unmapped emojis are a normal
//! not-applicable outcome: no reply, no error-severity logging.

use poise::serenity_prelude::{self as serenity, ReactionType};
use tracing::{debug, info, warn};

use lingo_commands::{CommandContext, CommandError};
use lingo_dict::DM_SCOPE;
use lingo_translate::{flag_identifier, resolve_language, Resolution};

/// Handle a reaction-added notification
pub async fn handle_reaction_add(
    ctx: &serenity::Context,
    reaction: &serenity::Reaction,
    data: &CommandContext,
) -> Result<(), CommandError> {
    // Ignore the bot's own reactions
    let bot_id = ctx.cache.current_user().id;
    if reaction.user_id == Some(bot_id) {
        return Ok(());
    }

    let ReactionType::Unicode(emoji) = &reaction.emoji else {
        return Ok(());
    };

    let Some(flag) = flag_identifier(emoji) else {
        return Ok(());
    };

    let Some(target_language) = resolve_language(&flag) else {
        debug!("Flag {} has no language mapping, ignoring", flag);
        return Ok(());
    };

    let message = reaction
        .message(&ctx.http)
        .await
        .map_err(|e| format!("Failed to fetch reacted message: {}", e))?;

    if message.content.is_empty() {
        return Ok(());
    }

    let scope = reaction
        .guild_id
        .map(|g| g.get().to_string())
        .unwrap_or_else(|| DM_SCOPE.to_string());

    match data
        .resolver
        .resolve(&message.content, target_language, &scope)
        .await
    {
        Resolution::DictionaryHit(entry) => {
            info!("Reaction translation answered from dictionary ({})", entry.key());
            let reply = format!(
                "**🌐 {} dictionary translation:**\n{}",
                entry.language, entry.translation
            );
            message.reply(&ctx.http, reply).await?;
        }
        Resolution::Translated {
            text,
            detected_source_language,
        } => {
            info!(
                "Reaction translation {} -> {} posted",
                detected_source_language, target_language
            );
            let reply = format!(
                "**🌐 {} -> {} translation:**\n{}",
                detected_source_language, target_language, text
            );
            message.reply(&ctx.http, reply).await?;
        }
        Resolution::Suppressed => {
            debug!("Translation added no information, not replying");
        }
        Resolution::Failed(e) => {
            // Reaction contexts cannot carry an ephemeral error reply, so
            // the failure is logged instead of posted to the channel
            warn!("Reaction translation failed: {}", e);
        }
    }

    Ok(())
}
