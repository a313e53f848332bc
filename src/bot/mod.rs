//! Bot layer - Discord-specific interface and command handlers
//!
//! This module wires the core views and error classification into poise:
//! slash commands, the error listener, gateway events and the component
//! transport for interactive views.

/// Discord command implementations (help, about)
pub mod commands;
/// Error listener, gateway events and view transport
pub mod handlers;
/// Conversion of core content into serenity builders
pub mod render;

use crate::{config::BotConfig, errors::Error};
use chrono::{DateTime, Utc};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use tracing::{info, instrument};

/// Shared data available to all bot commands.
pub struct BotData {
    /// Database connection for the error log
    pub database: DatabaseConnection,
    /// Bot settings
    pub config: BotConfig,
    /// When the bot process started, for `/about`
    pub started_at: DateTime<Utc>,
}

impl BotData {
    /// Creates a new `BotData`, marking now as the startup time.
    #[must_use]
    pub fn new(database: DatabaseConnection, config: BotConfig) -> Self {
        Self {
            database,
            config,
            started_at: Utc::now(),
        }
    }
}

/// Poise context used by every command.
pub type Context<'a> = poise::Context<'a, BotData, Error>;

/// Builds the poise framework and runs the client until it stops.
#[instrument(skip_all)]
pub async fn run_bot(token: String, data: BotData) -> crate::errors::Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![commands::help(), commands::about()],
            on_error: |error| Box::pin(handlers::on_error(error)),
            event_handler: |ctx, event, framework, data| {
                Box::pin(handlers::event_handler(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    // Guild create events are needed for the welcome message
    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(&token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| tracing::error!("Error creating client: {:?}", e))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| tracing::error!("Client error: {:?}", e))?;

    Ok(())
}
