use crate::errors::{error::ErrorResponse, repository::RepositoryError, service::ServiceError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[derive(Debug)]
pub enum HttpError {
    BadRequest(String),
    Validation(Vec<String>),
    NotFound(String),
    Conflict(String),
    BadGateway(String),
    Internal(String),
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(errors) => HttpError::Validation(errors),

            ServiceError::UnsupportedSource(source) => {
                HttpError::BadRequest(format!("Unsupported source: {source}"))
            }

            ServiceError::Repo(repo_err) => match repo_err {
                RepositoryError::NotFound => HttpError::NotFound("Product not found".into()),
                RepositoryError::AlreadyExists(msg) => HttpError::Conflict(msg),
                RepositoryError::Constraint(msg) => {
                    HttpError::BadRequest(format!("Constraint violation: {msg}"))
                }
                RepositoryError::Sqlx(_) | RepositoryError::Custom(_) => {
                    HttpError::Internal("Internal server error".into())
                }
            },

            ServiceError::ExternalFetch(msg) => {
                HttpError::BadGateway(format!("External source unavailable: {msg}"))
            }

            ServiceError::Internal(_) => HttpError::Internal("Internal server error".into()),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message, details) = match self {
            HttpError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, Vec::new()),
            HttpError::Validation(details) => (
                StatusCode::BAD_REQUEST,
                "Validation failed".to_string(),
                details,
            ),
            HttpError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, Vec::new()),
            HttpError::Conflict(msg) => (StatusCode::CONFLICT, msg, Vec::new()),
            HttpError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg, Vec::new()),
            HttpError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg, Vec::new()),
        };

        let body = Json(ErrorResponse {
            status: "error".into(),
            message,
            details,
        });

        (status, body).into_response()
    }
}
