use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use utoipa::ToSchema;

/// Failure classes reported by an [`HrStore`](crate::db::HrStore).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("unique constraint violated")]
    Conflict,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Classify a driver error; SQLSTATE 23000 is MySQL's integrity violation class.
    pub fn from_sqlx(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23000") => {
                StoreError::Conflict
            }
            _ => StoreError::Database(e),
        }
    }
}

/// Outcome returned by handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    ValidationFailed(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("Internal Server Error")]
    Unknown(#[from] StoreError),
}

/// Body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Employee not found")]
    pub detail: String,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ValidationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Unknown(e) = self {
            tracing::error!(error = %e, "Unhandled store failure");
        }
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            detail: self.to_string(),
        })
    }
}
