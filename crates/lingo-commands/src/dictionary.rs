//! /dict subcommands: the community override dictionary CRUD surface

use poise::serenity_prelude as serenity;
use tracing::info;

use lingo_common::{utils::validate_non_empty, LingoError};
use lingo_dict::DictionaryEntry;

use crate::context::{reply_ephemeral, scope_for, CommandError, Context};

/// Displayed search results are capped; more results show a truncation note
const SEARCH_DISPLAY_CAP: usize = 10;
/// Displayed list entries are capped; more entries show a truncation note
const LIST_DISPLAY_CAP: usize = 20;

/// Community translation dictionary.
#[poise::command(slash_command, subcommands("add", "search", "list", "remove"))]
pub async fn dict(_ctx: Context<'_>) -> Result<(), CommandError> {
    Ok(())
}

/// Add or replace a preferred translation.
#[poise::command(slash_command)]
pub async fn add(
    ctx: Context<'_>,
    #[description = "Original text"] original: String,
    #[description = "Preferred translation"] translation: String,
    #[description = "Target language code (e.g. KO, EN-US)"] language: String,
) -> Result<(), CommandError> {
    let original = match validate_non_empty(&original, "original") {
        Ok(v) => v,
        Err(e) => return reply_ephemeral(&ctx, e.to_string()).await,
    };
    let translation = match validate_non_empty(&translation, "translation") {
        Ok(v) => v,
        Err(e) => return reply_ephemeral(&ctx, e.to_string()).await,
    };

    let scope = scope_for(&ctx);
    let entry = DictionaryEntry::new(
        original,
        translation,
        language,
        ctx.author().id.to_string(),
        scope,
    );

    match ctx.data().store.add(entry.clone()).await {
        Ok(replaced) => {
            info!("Dictionary add by {} for key {}", ctx.author().id, entry.key());
            let mut description = format!(
                "\"{}\" will now translate to \"{}\" ({}).",
                entry.original, entry.translation, entry.language
            );
            if let Some(old) = replaced {
                description.push_str(&format!(
                    "\nThis replaced the previous translation \"{}\".",
                    old.translation
                ));
            }

            let embed = serenity::CreateEmbed::new()
                .title("📘 Dictionary entry saved")
                .colour(serenity::Colour::DARK_GREEN)
                .description(description);
            ctx.send(poise::CreateReply::default().embed(embed)).await?;
            Ok(())
        }
        Err(e) => reply_ephemeral(&ctx, format!("Could not save the entry: {}", e)).await,
    }
}

/// Search dictionary entries by a word in the original text.
#[poise::command(slash_command)]
pub async fn search(
    ctx: Context<'_>,
    #[description = "Word to search for"] word: String,
    #[description = "Filter by target language code"] language: Option<String>,
) -> Result<(), CommandError> {
    let scope = scope_for(&ctx);

    let results = match ctx.data().store.search(&word, &scope, language.as_deref()) {
        Ok(results) => results,
        Err(e) => {
            return reply_ephemeral(&ctx, format!("Could not search the dictionary: {}", e)).await
        }
    };

    if results.is_empty() {
        return reply_ephemeral(&ctx, format!("No dictionary entries match \"{}\".", word)).await;
    }

    let total = results.len();
    let mut lines: Vec<String> = results
        .iter()
        .take(SEARCH_DISPLAY_CAP)
        .map(format_entry_line)
        .collect();
    if total > SEARCH_DISPLAY_CAP {
        lines.push(format!(
            "… and {} more. Refine your search to see them.",
            total - SEARCH_DISPLAY_CAP
        ));
    }

    let embed = serenity::CreateEmbed::new()
        .title(format!("🔍 Dictionary search: \"{}\"", word))
        .colour(serenity::Colour::BLUE)
        .description(lines.join("\n"));
    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// List this server's dictionary entries.
#[poise::command(slash_command)]
pub async fn list(ctx: Context<'_>) -> Result<(), CommandError> {
    let scope = scope_for(&ctx);

    let entries = match ctx.data().store.list_by_scope(&scope) {
        Ok(entries) => entries,
        Err(e) => {
            return reply_ephemeral(&ctx, format!("Could not read the dictionary: {}", e)).await
        }
    };

    if entries.is_empty() {
        return reply_ephemeral(&ctx, "This server has no dictionary entries yet.".to_string())
            .await;
    }

    let total = entries.len();
    let mut lines: Vec<String> = entries
        .iter()
        .take(LIST_DISPLAY_CAP)
        .map(format_entry_line)
        .collect();
    if total > LIST_DISPLAY_CAP {
        lines.push(format!("… and {} more.", total - LIST_DISPLAY_CAP));
    }

    let embed = serenity::CreateEmbed::new()
        .title(format!("📖 Dictionary ({} entries)", total))
        .colour(serenity::Colour::BLUE)
        .description(lines.join("\n"));
    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Remove a dictionary entry you added (moderators can remove any).
#[poise::command(slash_command)]
pub async fn remove(
    ctx: Context<'_>,
    #[description = "Original text of the entry"] original: String,
    #[description = "Target language code of the entry"] language: String,
) -> Result<(), CommandError> {
    let scope = scope_for(&ctx);
    let requester = ctx.author().id.to_string();
    let elevated = ctx
        .data()
        .permissions
        .is_elevated(ctx.serenity_context(), ctx.author().id, ctx.guild_id())
        .await;

    match ctx
        .data()
        .store
        .remove(&original, &language, &scope, &requester, elevated)
        .await
    {
        Ok(removed) => {
            info!("Dictionary remove by {} for key {}", ctx.author().id, removed.key());
            let embed = serenity::CreateEmbed::new()
                .title("🗑️ Dictionary entry removed")
                .colour(serenity::Colour::DARK_GREEN)
                .description(format!(
                    "\"{}\" -> \"{}\" ({}) was removed.",
                    removed.original, removed.translation, removed.language
                ));
            ctx.send(poise::CreateReply::default().embed(embed)).await?;
            Ok(())
        }
        Err(e @ LingoError::NotFound { .. }) | Err(e @ LingoError::PermissionDenied { .. }) => {
            reply_ephemeral(&ctx, e.to_string()).await
        }
        Err(e) => reply_ephemeral(&ctx, format!("Could not remove the entry: {}", e)).await,
    }
}

fn format_entry_line(entry: &DictionaryEntry) -> String {
    format!(
        "**{}** -> {} `{}` (by <@{}>)",
        entry.original, entry.translation, entry.language, entry.added_by
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_entry_line() {
        let entry = DictionaryEntry::new("hello", "안녕", "KO", "42", "guild1");
        assert_eq!(
            format_entry_line(&entry),
            "**hello** -> 안녕 `KO` (by <@42>)"
        );
    }
}
