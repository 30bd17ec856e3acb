/// Main application entry point
mod clients;
mod config;
mod domain;
mod errors;
mod handlers;
mod report;
mod routes;
mod services;

use crate::clients::{IpinfoClient, TelegramClient};
use crate::config::AppConfig;
use crate::handlers::AppState;
use crate::routes::build_router;
use crate::services::NotifierService;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    // Load configuration
    let config = AppConfig::from_env();
    info!("Configuration loaded successfully");

    // The service keeps running without the secrets so pre-flight and
    // health stay answerable; submissions then report the missing config.
    let notifier = match (&config.bot_token, &config.primary_chat_id) {
        (Some(bot_token), Some(primary_chat_id)) => {
            let geo_client =
                IpinfoClient::new(config.ipinfo_url.clone(), config.ipinfo_token.clone())?;
            let telegram =
                TelegramClient::new(config.telegram_api_url.clone(), bot_token.clone())?;
            Some(Arc::new(NotifierService::new(
                geo_client,
                telegram,
                primary_chat_id.clone(),
            )))
        }
        _ => {
            warn!("BOT_TOKEN or MAIN_CHAT_ID not set; submissions will be rejected");
            None
        }
    };

    let state = AppState { notifier };

    // Build router
    let app = build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("notify-relay service listening on {}", config.bind_addr);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
