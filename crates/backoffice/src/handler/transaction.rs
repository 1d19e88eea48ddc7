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
    abstract_trait::transaction::service::{
        command::DynTransactionCommandService, query::DynTransactionQueryService,
    },
    domain::requests::{
        Actor, CancelTransactionRequest, ConfirmDepositRequest, ConfirmWithdrawRequest,
        CreateBankTransactionRequest, FindAllTransactions,
    },
    errors::AppErrorHttp,
};
use std::sync::Arc;

pub async fn get_pending_transactions(
    Extension(service): Extension<DynTransactionQueryService>,
    Query(params): Query<FindAllTransactions>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.find_pending(&params).await?;
    Ok(Json(response))
}

pub async fn get_finished_transactions(
    Extension(service): Extension<DynTransactionQueryService>,
    Query(params): Query<FindAllTransactions>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.find_finished(&params).await?;
    Ok(Json(response))
}

pub async fn get_status_count(
    Extension(service): Extension<DynTransactionQueryService>,
    Query(params): Query<FindAllTransactions>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.status_count(&params).await?;
    Ok(Json(response))
}

pub async fn get_transaction(
    Extension(service): Extension<DynTransactionQueryService>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.find_by_id(id).await?;
    Ok(Json(response))
}

pub async fn create_transaction(
    Extension(service): Extension<DynTransactionCommandService>,
    Extension(actor): Extension<Actor>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateBankTransactionRequest>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.create(&body, &actor).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn confirm_deposit(
    Extension(service): Extension<DynTransactionCommandService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
    SimpleValidatedJson(body): SimpleValidatedJson<ConfirmDepositRequest>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.confirm_deposit(id, &body, &actor).await?;
    Ok(Json(response))
}

pub async fn confirm_deposit_credit(
    Extension(service): Extension<DynTransactionCommandService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
    SimpleValidatedJson(body): SimpleValidatedJson<ConfirmDepositRequest>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.confirm_deposit_credit(id, &body, &actor).await?;
    Ok(Json(response))
}

pub async fn confirm_withdraw_credit(
    Extension(service): Extension<DynTransactionCommandService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
    SimpleValidatedJson(body): SimpleValidatedJson<ConfirmWithdrawRequest>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.confirm_withdraw_credit(id, &body, &actor).await?;
    Ok(Json(response))
}

pub async fn confirm_withdraw_transfer(
    Extension(service): Extension<DynTransactionCommandService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
    SimpleValidatedJson(body): SimpleValidatedJson<ConfirmWithdrawRequest>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.confirm_withdraw_transfer(id, &body, &actor).await?;
    Ok(Json(response))
}

pub async fn continue_auto_withdraw(
    Extension(service): Extension<DynTransactionCommandService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.continue_auto_withdraw(id, &actor).await?;
    Ok(Json(response))
}

pub async fn cancel_transaction(
    Extension(service): Extension<DynTransactionCommandService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
    SimpleValidatedJson(body): SimpleValidatedJson<CancelTransactionRequest>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.cancel(id, &body, &actor).await?;
    Ok(Json(response))
}

pub async fn remove_transaction(
    Extension(service): Extension<DynTransactionCommandService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.remove(id, &actor).await?;
    Ok(Json(response))
}

pub fn transaction_routes(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/banking/transactions", post(create_transaction))
        .route("/banking/transactions/pending", get(get_pending_transactions))
        .route("/banking/transactions/finished", get(get_finished_transactions))
        .route("/banking/transactions/status-count", get(get_status_count))
        .route(
            "/banking/transactions/{id}",
            get(get_transaction).delete(remove_transaction),
        )
        .route(
            "/banking/transactions/confirmdeposit/{id}",
            post(confirm_deposit),
        )
        .route(
            "/banking/transactions/confirmdepositcredit/{id}",
            post(confirm_deposit_credit),
        )
        .route(
            "/banking/transactions/confirmcreditwithdraw/{id}",
            post(confirm_withdraw_credit),
        )
        .route(
            "/banking/transactions/confirmtransferwithdraw/{id}",
            post(confirm_withdraw_transfer),
        )
        .route(
            "/banking/transactions/continueautowithdraw/{id}",
            post(continue_auto_withdraw),
        )
        .route("/banking/transactions/cancel/{id}", post(cancel_transaction))
        .layer(middleware::from_fn(jwt::admin_auth))
        .layer(Extension(app_state.di_container.transaction_query.clone()))
        .layer(Extension(app_state.di_container.transaction_command.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
