use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::shared::error::{ApiErrorBody, ErrorKind};
use thiserror::Error;

/// Failures of dashboard operations
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Missing or malformed input
    #[error("{0}")]
    Validation(String),

    /// The hosted gateway could not be reached or answered with an error
    #[error("{0}")]
    Remote(String),

    /// No valid session for the request
    #[error("{0}")]
    Session(String),

    /// The auth provider rejected credentials or an action
    #[error("{0}")]
    Auth(String),
}

impl DashboardError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DashboardError::Validation(_) => ErrorKind::Validation,
            DashboardError::Remote(_) => ErrorKind::Remote,
            DashboardError::Session(_) => ErrorKind::Session,
            DashboardError::Auth(_) => ErrorKind::Auth,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            DashboardError::Validation(_) => StatusCode::BAD_REQUEST,
            DashboardError::Remote(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DashboardError::Session(_) | DashboardError::Auth(_) => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ApiErrorBody {
            error: self.to_string(),
            kind: Some(self.kind()),
        };
        (status, Json(body)).into_response()
    }
}
