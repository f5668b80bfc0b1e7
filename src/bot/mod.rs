//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for `CompanyBuddy`: the slash
//! commands, the interaction handlers they share, error reporting, and client
//! start-up.

/// Discord command implementations (company, feedback, admin, general)
pub mod commands;
/// Discord interaction handlers (access guard, listing session)
pub mod handlers;

use crate::{api::ApiClient, config::AppConfig, errors::Error};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use std::{collections::HashSet, sync::Arc};
use tracing::{error, info, instrument, warn};

/// Shared data available to all bot commands.
/// This structure holds the access-flag database, the company API client and the
/// application configuration.
pub struct BotData {
    /// Access-flag store
    pub database: DatabaseConnection,
    /// Company API client
    pub api: ApiClient,
    /// Loaded config.toml
    pub config: Arc<AppConfig>,
}

impl BotData {
    /// Creates a new `BotData` instance.
    #[must_use]
    pub const fn new(database: DatabaseConnection, api: ApiClient, config: Arc<AppConfig>) -> Self {
        Self {
            database,
            api,
            config,
        }
    }
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {error:?}");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            let command = &ctx.command().qualified_name;
            match &error {
                Error::InvalidCompanyId { .. } | Error::InvalidLookback { .. } => {
                    warn!("Rejected `{command}`: {error}");
                }
                _ => error!("Error in command `{command}`: {error:?}"),
            }
            let reply = poise::CreateReply::default()
                .content(error.user_message())
                .ephemeral(true);
            if let Err(e) = ctx.send(reply).await {
                error!("Failed to send error message: {e}");
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {e}");
            }
        }
    }
}

/// Builds the poise framework and runs the Discord client until it stops.
///
/// # Errors
/// Returns an error if the client cannot be created or its connection fails.
#[instrument(skip_all)]
pub async fn run_bot(
    token: String,
    config: Arc<AppConfig>,
    database: DatabaseConnection,
    api: ApiClient,
) -> Result<(), Error> {
    let owners = HashSet::from([serenity::UserId::new(config.admin_user_id)]);

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::company(),
                commands::feedback(),
                commands::access(),
                commands::ping(),
                commands::help(),
            ],
            owners,
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(BotData::new(database, api, config))
            })
        })
        .build();

    // Slash commands and component interactions need no privileged intents
    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::Client::builder(&token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {e:?}"))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {e:?}"))?;
    Ok(())
}
