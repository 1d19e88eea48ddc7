use axum::{
    extract::{Extension, Request},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use shared::{config::JwtConfig, domain::requests::Actor, errors::AppErrorHttp, errors::ServiceError};
use std::sync::Arc;
use tracing::warn;

fn bearer_token(headers: &HeaderMap) -> Result<&str, AppErrorHttp> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            warn!("request without bearer token");
            AppErrorHttp(ServiceError::Unauthorized)
        })
}

/// Admin routes; exposes the claims and the acting [`Actor`] to handlers.
pub async fn admin_auth(
    Extension(jwt): Extension<Arc<JwtConfig>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppErrorHttp> {
    let claims = jwt.verify_admin(bearer_token(req.headers())?)?;
    let actor = Actor::new(claims.admin_id(), claims.username());

    req.extensions_mut().insert(claims);
    req.extensions_mut().insert(actor);

    Ok(next.run(req).await)
}

/// Player routes; exposes the member claims to handlers.
pub async fn member_auth(
    Extension(jwt): Extension<Arc<JwtConfig>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppErrorHttp> {
    let claims = jwt.verify_member(bearer_token(req.headers())?)?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
