mod bank_account;
mod member;
mod statement;
mod transaction;
mod webhook;

use crate::state::AppState;
use anyhow::Result;
use axum::{Router, extract::DefaultBodyLimit};
use shared::utils::shutdown_signal;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::info;

pub use self::bank_account::bank_account_routes;
pub use self::member::{member_routes, player_routes};
pub use self::statement::statement_routes;
pub use self::transaction::transaction_routes;
pub use self::webhook::webhook_routes;

pub struct AppRouter;

impl AppRouter {
    pub fn build(app_state: AppState) -> Router {
        let shared_state = Arc::new(app_state);

        Router::new()
            .merge(bank_account_routes(shared_state.clone()))
            .merge(webhook_routes(shared_state.clone()))
            .merge(transaction_routes(shared_state.clone()))
            .merge(statement_routes(shared_state.clone()))
            .merge(member_routes(shared_state.clone()))
            .merge(player_routes(shared_state))
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(10 * 1024 * 1024))
            .layer(TraceLayer::new_for_http())
    }

    pub async fn serve(port: u16, app_state: AppState) -> Result<()> {
        let app = Self::build(app_state);

        let addr = format!("0.0.0.0:{port}");
        let listener = TcpListener::bind(&addr).await?;

        info!("🚀 Server running on http://{}", listener.local_addr()?);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}
