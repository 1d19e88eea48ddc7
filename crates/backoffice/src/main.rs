use anyhow::{Context, Result};
use backoffice::{handler::AppRouter, state::AppState, tasks::spawn_bot_status_task};
use dotenv::dotenv;
use shared::{config::Config, utils::Logger};
use std::time::Duration;
use tokio::sync::watch;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;
    let logger = Logger::new("backoffice", config.is_dev);

    let state = AppState::new(&config)
        .await
        .context("Failed to create AppState")?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let bot_status = spawn_bot_status_task(
        state.di_container.bank_account_command.clone(),
        Duration::from_secs(config.bot_status_interval_secs),
        shutdown_rx,
    );

    info!("🚀 Server started successfully");

    let served = AppRouter::serve(config.port, state)
        .await
        .context("Failed to start server");

    info!("Shutting down servers...");

    let _ = shutdown_tx.send(true);
    bot_status.await.context("Bot status task panicked")?;

    logger.shutdown();

    served
}
