use shared::abstract_trait::bank_account::service::command::DynBankAccountCommandService;
use std::time::Duration;
use tokio::{sync::watch, task::JoinHandle, time::interval};
use tracing::{error, info};

/// Refreshes the bot status of every automated account until `shutdown` flips to true.
pub fn spawn_bot_status_task(
    service: DynBankAccountCommandService,
    every: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("🤖 Bot status task started, every {}s", every.as_secs());

        let mut ticker = interval(every.max(Duration::from_secs(1)));
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match service.update_all_bot_status().await {
                        Ok(polled) => info!("🤖 Bot status tick polled {polled} accounts"),
                        Err(e) => error!("❌ Bot status refresh failed: {e}"),
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("🤖 Bot status task stopped");
    })
}
