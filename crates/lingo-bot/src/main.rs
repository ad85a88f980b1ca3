//! Lingo Bot - Main Entry Point

mod reaction;

use anyhow::Result;
use clap::Parser;
use poise::serenity_prelude::{self as serenity, GatewayIntents};
use std::sync::Arc;
use tracing::{error, info};

use lingo_commands::{CommandContext, CommandError, Permissions};
use lingo_common::{init_logging, LoggingConfig};
use lingo_config::{Config, ConfigLoader};
use lingo_dict::DictionaryStore;
use lingo_translate::{DeepLClient, DeepLClientConfig, Resolver};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<String>,

    /// Log level override (e.g. "debug", "lingo_bot=trace")
    #[arg(short, long)]
    log_level: Option<String>,
}

/// Build the shared application state from the loaded configuration
fn build_context(config: Config) -> Result<CommandContext, CommandError> {
    let store = Arc::new(DictionaryStore::new(&config.dictionary.path));

    let provider = DeepLClient::new(
        DeepLClientConfig::new(&config.deepl.api_url, &config.deepl.auth_key)
            .with_timeout(config.deepl.timeout_seconds)
            .with_rate_limit(config.deepl.rate_limit_per_sec)
            .with_max_retries(config.deepl.max_retries as usize),
    )?;

    let resolver = Arc::new(Resolver::new(store.clone(), Arc::new(provider)));
    let permissions = Arc::new(Permissions::new(&config));

    Ok(CommandContext {
        config: Arc::new(config),
        store,
        resolver,
        permissions,
    })
}

/// Setup function for the Poise framework - registers commands and builds
/// the shared data on the ready event
async fn setup(
    ctx: &serenity::Context,
    ready: &serenity::Ready,
    framework: &poise::Framework<CommandContext, CommandError>,
    config: Config,
) -> Result<CommandContext, CommandError> {
    info!("Bot connected as: {}", ready.user.name);
    info!("Connected to {} guilds", ready.guilds.len());

    poise::builtins::register_globally(ctx, &framework.options().commands).await?;
    info!("Slash commands registered globally");

    build_context(config)
}

/// Global error handler for the framework
async fn on_error(error: poise::FrameworkError<'_, CommandContext, CommandError>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command '{}': {:?}", ctx.command().name, error);
        }
        poise::FrameworkError::EventHandler { error, event, .. } => {
            error!(
                "Error in event handler for {:?}: {:?}",
                event.snake_case_name(),
                error
            );
        }
        error => {
            error!("Other error: {:?}", error);
        }
    }
}

/// Central event handler for Discord events
async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, CommandContext, CommandError>,
    data: &CommandContext,
) -> Result<(), CommandError> {
    match event {
        serenity::FullEvent::ReactionAdd { add_reaction } => {
            reaction::handle_reaction_add(ctx, add_reaction, data).await?;
        }
        serenity::FullEvent::GuildCreate { guild, .. } => {
            info!("Joined guild: {} (ID: {})", guild.name, guild.id);
        }
        serenity::FullEvent::Ready { data_about_bot } => {
            info!("Bot ready event received for: {}", data_about_bot.user.name);
        }
        _ => {}
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration (validates that the Discord token and DeepL auth
    // key are present)
    let config = match &args.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };

    // Initialize logging, CLI flag overrides the configured level
    let level = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());
    init_logging(LoggingConfig {
        level,
        file_path: config.logging.file.clone(),
        ..LoggingConfig::default()
    })
    .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!("Starting lingo bot");

    let token = config.discord.token.clone();
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILD_MESSAGE_REACTIONS
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::DIRECT_MESSAGE_REACTIONS;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: lingo_commands::commands(),
            on_error: |error| Box::pin(on_error(error)),
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| Box::pin(setup(ctx, ready, framework, config)))
        .build();

    let mut client = serenity::ClientBuilder::new(&token, intents)
        .framework(framework)
        .await?;

    // Graceful shutdown on ctrl-c
    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for shutdown signal: {:?}", e);
            return;
        }
        info!("Received shutdown signal, starting graceful shutdown");
        shard_manager.shutdown_all().await;
    });

    if let Err(why) = client.start().await {
        error!("Client error: {:?}", why);
        return Err(why.into());
    }

    info!("Lingo bot has shut down");
    Ok(())
}
