use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// Every failure a handler can surface, mapped to a status code and the
/// shared error envelope at this single boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Validation failed")]
    Validation(Vec<String>),
    #[error("Malformed JSON request")]
    MalformedBody,
    #[error("{0}")]
    Internal(String),
}

/// Error envelope: `{status, error, message, details, timestamp}`.
#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub status: u16,
    pub error: String,
    pub message: String,
    pub details: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) | ApiError::MalformedBody => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_label(&self) -> &'static str {
        match self {
            ApiError::Conflict(_) => "Email already exists",
            ApiError::NotFound(_) => "Resource not found",
            ApiError::Validation(_) | ApiError::MalformedBody => "Unprocessable Entity",
            ApiError::Internal(_) => "Internal Server Error",
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(details) => ApiError::Validation(details),
            ServiceError::EmailExists(email) => {
                ApiError::Conflict(format!("Email already exists: {}", email))
            }
            ServiceError::NotFound(msg) => ApiError::NotFound(msg),
            ServiceError::Db(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(_: JsonRejection) -> Self {
        ApiError::MalformedBody
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        let details = match &self {
            ApiError::Validation(d) => d.clone(),
            _ => Vec::new(),
        };
        let body = ApiErrorBody {
            status: status.as_u16(),
            error: self.error_label().to_string(),
            message: self.to_string(),
            details,
            timestamp: Utc::now(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_statuses() {
        let conflict: ApiError = ServiceError::EmailExists("a@b.com".into()).into();
        assert_eq!(conflict.status(), StatusCode::CONFLICT);

        let missing: ApiError = ServiceError::NotFound("User not found with id: 9".into()).into();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let invalid: ApiError = ServiceError::Validation(vec!["email: bad".into()]).into();
        assert_eq!(invalid.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let db: ApiError = ServiceError::Db("connection reset".into()).into();
        assert_eq!(db.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_details_survive_the_mapping() {
        let err: ApiError =
            ServiceError::Validation(vec!["email: bad".into(), "password: short".into()]).into();
        match err {
            ApiError::Validation(details) => assert_eq!(details.len(), 2),
            other => panic!("expected Validation, got {:?}", other),
        }
    }
}
