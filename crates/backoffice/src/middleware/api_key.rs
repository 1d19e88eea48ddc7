use axum::{
    extract::{Extension, FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use shared::errors::{AppErrorHttp, ServiceError};
use std::sync::Arc;
use tracing::warn;

/// Key sent by the bank gateway, from `apiKey`, `x-api-key` or a bearer header.
#[derive(Debug, Clone)]
pub struct ApiKey(pub String);

impl<S> FromRequestParts<S> for ApiKey
where
    S: Send + Sync,
{
    type Rejection = AppErrorHttp;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        for header in ["apikey", "x-api-key"] {
            if let Some(value) = parts.headers.get(header) {
                let key = value
                    .to_str()
                    .map_err(|_| ServiceError::invalid("api key: invalid format"))?;

                if key.trim().is_empty() {
                    return Err(ServiceError::invalid("api key: cannot be empty").into());
                }
                return Ok(ApiKey(key.trim().to_string()));
            }
        }

        if let Some(token) = parts
            .headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .filter(|token| !token.trim().is_empty())
        {
            return Ok(ApiKey(token.trim().to_string()));
        }

        Err(AppErrorHttp(ServiceError::Unauthorized))
    }
}

/// Rejects webhook calls whose key does not match the configured gateway key.
pub async fn webhook_auth(
    Extension(expected): Extension<Arc<String>>,
    ApiKey(key): ApiKey,
    req: Request,
    next: Next,
) -> Result<Response, AppErrorHttp> {
    if expected.is_empty() || key != *expected {
        warn!("webhook call with a wrong api key");
        return Err(AppErrorHttp(ServiceError::Unauthorized));
    }

    Ok(next.run(req).await)
}
