use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use shared::errors::{AppErrorHttp, ServiceError, validation_messages};
use validator::Validate;

/// JSON body that is rejected with 400 and per-field messages when invalid.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for SimpleValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppErrorHttp;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ServiceError::Validation(vec![rejection.body_text()]))?;

        value
            .validate()
            .map_err(|e| ServiceError::Validation(validation_messages(&e)))?;

        Ok(SimpleValidatedJson(value))
    }
}
