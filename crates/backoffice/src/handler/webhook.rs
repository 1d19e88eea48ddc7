use crate::{middleware::api_key, state::AppState};
use axum::{
    Json, Router,
    extract::Extension,
    middleware,
    response::IntoResponse,
    routing::post,
};
use shared::{
    abstract_trait::statement::service::command::DynStatementCommandService,
    errors::AppErrorHttp,
};
use std::sync::Arc;

pub async fn webhook_action(
    Extension(service): Extension<DynStatementCommandService>,
    Json(payload): Json<serde_json::Value>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.process_webhook_action(&payload).await?;
    Ok(Json(response))
}

pub async fn webhook_noti(
    Extension(service): Extension<DynStatementCommandService>,
    Json(payload): Json<serde_json::Value>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.process_webhook_noti(&payload).await?;
    Ok(Json(response))
}

pub fn webhook_routes(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/accounting/webhooks/action", post(webhook_action))
        .route("/accounting/webhooks/noti", post(webhook_noti))
        .layer(middleware::from_fn(api_key::webhook_auth))
        .layer(Extension(app_state.di_container.statement_command.clone()))
        .layer(Extension(app_state.webhook_api_key.clone()))
}
