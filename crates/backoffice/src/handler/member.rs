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
    abstract_trait::{
        member::service::DynMemberAgentService, member_credit::service::DynMemberCreditService,
        transaction::service::query::DynTransactionQueryService,
    },
    config::MemberClaims,
    domain::requests::{FindMemberStatements, MemberAgentRequest},
    errors::AppErrorHttp,
};
use std::sync::Arc;

pub async fn get_member_summary(
    Extension(service): Extension<DynTransactionQueryService>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.member_summary(id).await?;
    Ok(Json(response))
}

pub async fn get_member_statements(
    Extension(service): Extension<DynMemberCreditService>,
    Path(id): Path<i64>,
    Query(params): Query<FindMemberStatements>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.find_member_statements(id, &params).await?;
    Ok(Json(response))
}

pub async fn agent_register(
    Extension(service): Extension<DynMemberAgentService>,
    Extension(claims): Extension<MemberClaims>,
    SimpleValidatedJson(body): SimpleValidatedJson<MemberAgentRequest>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.register(claims.user_id, &body).await?;
    Ok(Json(response))
}

pub async fn agent_login(
    Extension(service): Extension<DynMemberAgentService>,
    Extension(claims): Extension<MemberClaims>,
    SimpleValidatedJson(body): SimpleValidatedJson<MemberAgentRequest>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.login(claims.user_id, &body).await?;
    Ok(Json(response))
}

pub async fn agent_change_password(
    Extension(service): Extension<DynMemberAgentService>,
    Extension(claims): Extension<MemberClaims>,
    SimpleValidatedJson(body): SimpleValidatedJson<MemberAgentRequest>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.change_password(claims.user_id, &body).await?;
    Ok(Json(response))
}

pub fn member_routes(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/banking/members/{id}/summary", get(get_member_summary))
        .route("/banking/members/{id}/statements", get(get_member_statements))
        .layer(middleware::from_fn(jwt::admin_auth))
        .layer(Extension(app_state.di_container.transaction_query.clone()))
        .layer(Extension(app_state.di_container.member_credit.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}

pub fn player_routes(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/v1/front/users/agent/register", post(agent_register))
        .route("/v1/front/users/agent/login", post(agent_login))
        .route(
            "/v1/front/users/agent/changepassword",
            post(agent_change_password),
        )
        .layer(middleware::from_fn(jwt::member_auth))
        .layer(Extension(app_state.di_container.member_agent.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
