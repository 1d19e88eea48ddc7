use crate::{
    middleware::{jwt, validate::SimpleValidatedJson},
    state::AppState,
};
use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use shared::{
    abstract_trait::{
        bank_account::service::{command::DynBankAccountCommandService, query::DynBankAccountQueryService},
        statement::service::{command::DynStatementCommandService, query::DynStatementQueryService},
    },
    domain::requests::{
        CreateBankAccountRequest, FindAllBankAccounts, GetAccountStatements,
        UpdateBankAccountRequest,
    },
    errors::AppErrorHttp,
};
use std::sync::Arc;

pub async fn get_banks(
    Extension(service): Extension<DynBankAccountQueryService>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.find_banks().await?;
    Ok(Json(response))
}

pub async fn get_bank_accounts(
    Extension(service): Extension<DynBankAccountQueryService>,
    Query(params): Query<FindAllBankAccounts>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.find_all(&params).await?;
    Ok(Json(response))
}

pub async fn get_bank_account(
    Extension(service): Extension<DynBankAccountQueryService>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.find_by_id(id).await?;
    Ok(Json(response))
}

pub async fn create_bank_account(
    Extension(service): Extension<DynBankAccountCommandService>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateBankAccountRequest>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.create(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn update_bank_account(
    Extension(service): Extension<DynBankAccountCommandService>,
    Path(id): Path<i64>,
    SimpleValidatedJson(mut body): SimpleValidatedJson<UpdateBankAccountRequest>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    body.id = id;
    let response = service.update(&body).await?;
    Ok(Json(response))
}

pub async fn delete_bank_account(
    Extension(service): Extension<DynBankAccountCommandService>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.delete(id).await?;
    Ok(Json(response))
}

pub async fn get_account_statements(
    Extension(service): Extension<DynStatementQueryService>,
    Path(id): Path<i64>,
    Query(params): Query<GetAccountStatements>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.get_account_statements(id, &params).await?;
    Ok(Json(response))
}

pub async fn add_account_statement_to_webhook(
    Extension(service): Extension<DynStatementCommandService>,
    Path((id, external_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.add_account_statement_to_webhook(id, external_id).await?;
    Ok(Json(response))
}

pub fn bank_account_routes(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/accounting/banks", get(get_banks))
        .route(
            "/accounting/bankaccounts",
            get(get_bank_accounts).post(create_bank_account),
        )
        .route(
            "/accounting/bankaccounts/{id}",
            get(get_bank_account)
                .patch(update_bank_account)
                .delete(delete_bank_account),
        )
        .route(
            "/accounting/bankaccounts/{id}/statements",
            get(get_account_statements),
        )
        .route(
            "/accounting/bankaccounts/{id}/statements/{external_id}/webhook",
            post(add_account_statement_to_webhook),
        )
        .layer(middleware::from_fn(jwt::admin_auth))
        .layer(Extension(app_state.di_container.bank_account_query.clone()))
        .layer(Extension(app_state.di_container.bank_account_command.clone()))
        .layer(Extension(app_state.di_container.statement_query.clone()))
        .layer(Extension(app_state.di_container.statement_command.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
