use crate::errors::{errors::ErrorResponse, service::ServiceError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[derive(Debug)]
pub struct AppErrorHttp(pub ServiceError);

impl From<ServiceError> for AppErrorHttp {
    fn from(err: ServiceError) -> Self {
        AppErrorHttp(err)
    }
}

impl AppErrorHttp {
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            ServiceError::Validation(_)
            | ServiceError::BadState(_)
            | ServiceError::Duplicate(_)
            | ServiceError::InsufficientCredit { .. } => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
            ServiceError::ExternalApi(_) | ServiceError::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppErrorHttp {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self.0 {
            ServiceError::Validation(errors) => ErrorResponse {
                message: "invalid request".to_string(),
                errors: Some(errors),
            },
            ServiceError::Storage(_) => ErrorResponse {
                message: "internal storage error".to_string(),
                errors: None,
            },
            other => ErrorResponse {
                message: other.to_string(),
                errors: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_error_kinds_to_status() {
        let cases = [
            (ServiceError::invalid("amount: required"), StatusCode::BAD_REQUEST),
            (ServiceError::not_found("transaction"), StatusCode::NOT_FOUND),
            (ServiceError::bad_state("transaction is not pending"), StatusCode::BAD_REQUEST),
            (ServiceError::Duplicate("already processed".into()), StatusCode::BAD_REQUEST),
            (
                ServiceError::InsufficientCredit {
                    available: 10.0,
                    requested: 20.0,
                },
                StatusCode::BAD_REQUEST,
            ),
            (ServiceError::ExternalApi("timeout".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (ServiceError::Storage("pool closed".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (ServiceError::Unauthorized, StatusCode::UNAUTHORIZED),
        ];

        for (err, expected) in cases {
            assert_eq!(AppErrorHttp(err).status_code(), expected);
        }
    }

    #[test]
    fn unauthorized_body_message() {
        let response = AppErrorHttp(ServiceError::Unauthorized).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
