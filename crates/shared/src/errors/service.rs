use crate::errors::repository::RepositoryError;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    BadState(String),

    #[error("{0}")]
    Duplicate(String),

    #[error("Insufficient credit: available {available}, requested {requested}")]
    InsufficientCredit { available: f64, requested: f64 },

    #[error("External api error: {0}")]
    ExternalApi(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Unauthorized")]
    Unauthorized,
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound("record".into()),
            RepositoryError::AlreadyExists(key) => ServiceError::Duplicate(format!("duplicate {key}")),
            RepositoryError::Conflict(msg) => ServiceError::BadState(msg),
            RepositoryError::ForeignKey(msg) => ServiceError::Validation(vec![msg]),
            RepositoryError::InsufficientCredit {
                available,
                requested,
            } => ServiceError::InsufficientCredit {
                available,
                requested,
            },
            RepositoryError::Sqlx(e) => ServiceError::Storage(e.to_string()),
            RepositoryError::Custom(msg) => ServiceError::Storage(msg),
        }
    }
}

impl ServiceError {
    pub fn not_found(what: impl Into<String>) -> Self {
        ServiceError::NotFound(what.into())
    }

    pub fn bad_state(msg: impl Into<String>) -> Self {
        ServiceError::BadState(msg.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        ServiceError::Validation(vec![msg.into()])
    }

    /// Maps a missing row to `NotFound(what)`; other storage failures keep their kind.
    pub fn missing(what: &'static str) -> impl FnOnce(RepositoryError) -> ServiceError {
        Self::missing_as(move || ServiceError::NotFound(what.to_string()))
    }

    pub fn missing_as<F>(on_missing: F) -> impl FnOnce(RepositoryError) -> ServiceError
    where
        F: FnOnce() -> ServiceError,
    {
        move |err| match err {
            RepositoryError::NotFound => on_missing(),
            other => {
                error!("❌ Lookup failed: {other}");
                ServiceError::from(other)
            }
        }
    }
}
