use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use cadastre_registry::RegistryError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("missing credentials")]
    MissingCredentials,

    #[error("authentication failed: {0}")]
    AuthFailed(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

impl ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingCredentials | Self::AuthFailed(_) => StatusCode::UNAUTHORIZED,
            Self::Registry(err) => match err {
                RegistryError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
                RegistryError::AlreadyExists(_) | RegistryError::Conflict(_) => {
                    StatusCode::CONFLICT
                }
                RegistryError::NotFound(_) => StatusCode::NOT_FOUND,
                RegistryError::Forbidden { .. } => StatusCode::FORBIDDEN,
                RegistryError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Config(_) | Self::Io(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
