use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum BallotError {
    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("Missing {0} environment variable. Set it in the .env file.")]
    MissingEnv(&'static str),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Upstream error with status: {0}")]
    UpstreamStatus(StatusCode),

    #[error("Catalog returned status `{0}`")]
    CatalogStatus(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),
}

impl BallotError {
    /// Whether a catalog call that failed this way is worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            BallotError::UpstreamStatus(code) => code.is_server_error(),
            BallotError::Reqwest(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}

impl IntoResponse for BallotError {
    fn into_response(self) -> axum::response::Response {
        error!(error = %self, "request failed");
        let (status, error_body) = match self {
            BallotError::Reqwest(_)
            | BallotError::UrlParse(_)
            | BallotError::UpstreamStatus(_)
            | BallotError::CatalogStatus(_) => {
                let status = StatusCode::BAD_GATEWAY;
                let body = ApiErrorBody {
                    code: "BAD_GATEWAY".to_string(),
                    message: "Image catalog is unavailable.".to_string(),
                };
                (status, body)
            }
            BallotError::DatabaseError(_)
            | BallotError::Config(_)
            | BallotError::MissingEnv(_) => {
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                let body = ApiErrorBody {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred.".to_string(),
                };
                (status, body)
            }
        };
        (status, Json(ApiErrorResponse { error: error_body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
