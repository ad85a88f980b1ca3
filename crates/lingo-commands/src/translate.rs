//! The explicit /translate command

use poise::serenity_prelude as serenity;
use tracing::info;

use lingo_translate::Resolution;

use crate::context::{ephemeral_reply, scope_for, CommandError, Context};

/// Translate text into the language you choose.
#[poise::command(slash_command)]
pub async fn translate(
    ctx: Context<'_>,
    #[description = "Text to translate"] text: String,
    #[description = "Target language code (e.g. KO, EN-US, JA)"] target_language: String,
) -> Result<(), CommandError> {
    let target = target_language.trim().to_uppercase();

    // No defer here: a deferred response is public, and editing it would
    // strip the ephemeral flag from failure replies. The initial response
    // itself carries the right visibility for each outcome.

    // By default the explicit command always asks the provider; the
    // dictionary applies only to the reaction path. The unified policy is
    // opt-in via configuration.
    let reply = if ctx.data().config.dictionary.command_uses_dictionary {
        let scope = scope_for(&ctx);
        let resolution = ctx.data().resolver.resolve(&text, &target, &scope).await;
        if matches!(resolution, Resolution::DictionaryHit(_)) {
            info!("Translate command answered from dictionary by {}", ctx.author().id);
        }
        resolution_reply(&text, &target, resolution)
    } else {
        match ctx.data().resolver.translate_direct(&text, &target).await {
            Ok(translation) => {
                info!("Translate command executed by {}", ctx.author().id);
                result_reply(
                    &text,
                    &translation.text,
                    &translation.detected_source_language,
                    &target,
                )
            }
            Err(e) => ephemeral_reply(format!("Translation failed: {}", e)),
        }
    };

    ctx.send(reply).await?;
    Ok(())
}

/// Map a resolution outcome onto a reply: results are public, suppressions
/// and failures stay ephemeral
fn resolution_reply(original: &str, target: &str, resolution: Resolution) -> poise::CreateReply {
    match resolution {
        Resolution::DictionaryHit(entry) => {
            result_reply(original, &entry.translation, "dictionary", &entry.language)
        }
        Resolution::Translated {
            text,
            detected_source_language,
        } => result_reply(original, &text, &detected_source_language, target),
        Resolution::Suppressed => {
            ephemeral_reply("The translation is identical to the original.".to_string())
        }
        Resolution::Failed(e) => ephemeral_reply(format!("Translation failed: {}", e)),
    }
}

fn result_reply(original: &str, translated: &str, detected: &str, target: &str) -> poise::CreateReply {
    let embed = serenity::CreateEmbed::new()
        .title("🌐 Translation")
        .colour(serenity::Colour::BLUE)
        .field("Original text", format!("```{}```", original), false)
        .field(
            format!("Translated text ({} -> {})", detected, target),
            format!("```{}```", translated),
            false,
        );

    poise::CreateReply::default().embed(embed)
}
