use company_buddy::{
    api::ApiClient,
    bot, config,
    errors::{Error, Result},
};
use dotenvy::dotenv;
use std::{env, sync::Arc};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load .env file so RUST_LOG and the token can come from it
    let dotenv_result = dotenv(); // Non-fatal, env vars can be set externally

    // 2. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    match dotenv_result {
        Ok(path) => info!("Loaded environment from {}", path.display()),
        Err(e) => info!("No .env file loaded: {e}"),
    }

    // 3. Load the main application configuration
    let app_config = config::load_default_config()
        .inspect_err(|e| error!("Critical error loading application configuration: {e}"))?;
    info!("Successfully processed application configuration.");

    // 4. Open the access-flag database
    let database = config::database::create_connection()
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {e}"))?;

    // 5. Build the company API client
    let api = ApiClient::new(&app_config.api.base_url)?;
    info!("Using company API at {}", app_config.api.base_url);

    // 6. Run the bot
    // DISCORD_BOT_TOKEN is loaded here, directly before use, not stored in AppConfig
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {e}"))
        .map_err(Error::EnvVar)?;

    bot::run_bot(token, Arc::new(app_config), database, api).await
}
