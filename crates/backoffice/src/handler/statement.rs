use crate::{
    middleware::{jwt, validate::SimpleValidatedJson},
    state::AppState,
};
use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use shared::{
    abstract_trait::statement::service::{
        command::DynStatementCommandService, query::DynStatementQueryService,
    },
    domain::requests::{Actor, FindAllStatements, MatchStatementOwnerRequest},
    errors::AppErrorHttp,
};
use std::sync::Arc;

pub async fn get_statements(
    Extension(service): Extension<DynStatementQueryService>,
    Query(params): Query<FindAllStatements>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.find_all(&params).await?;
    Ok(Json(response))
}

pub async fn get_statement_summary(
    Extension(service): Extension<DynStatementQueryService>,
    Query(params): Query<FindAllStatements>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.summary(&params).await?;
    Ok(Json(response))
}

pub async fn get_possible_owners(
    Extension(service): Extension<DynStatementQueryService>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.find_possible_owners(id).await?;
    Ok(Json(response))
}

pub async fn match_statement_owner(
    Extension(service): Extension<DynStatementCommandService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
    SimpleValidatedJson(body): SimpleValidatedJson<MatchStatementOwnerRequest>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.match_statement_owner(id, &body, &actor).await?;
    Ok(Json(response))
}

pub async fn ignore_statement_owner(
    Extension(service): Extension<DynStatementCommandService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.ignore_statement_owner(id, &actor).await?;
    Ok(Json(response))
}

pub fn statement_routes(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/banking/statements", get(get_statements))
        .route("/banking/statements/summary", get(get_statement_summary))
        .route(
            "/banking/statements/{id}/possible-owners",
            get(get_possible_owners),
        )
        .route(
            "/banking/statements/matchowner/{id}",
            post(match_statement_owner),
        )
        .route(
            "/banking/statements/ignoreowner/{id}",
            post(ignore_statement_owner),
        )
        .layer(middleware::from_fn(jwt::admin_auth))
        .layer(Extension(app_state.di_container.statement_query.clone()))
        .layer(Extension(app_state.di_container.statement_command.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
