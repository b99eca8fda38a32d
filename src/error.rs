//! Error types for Tabrelay
//!
//! All errors implement `IntoResponse` for Axum handlers and serialize as the
//! outward error envelope `{"error": {"message": ...}}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::envelope::Envelope;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read config file '{path}': {source}")]
    ConfigFileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Field \"Authorization\" was expected but it was not found in the request headers")]
    MissingAuthorization,

    #[error("Field \"document\" was expected but it was not found in the request body")]
    MissingDocument,

    #[error("Field \"document\" must contain UTF-8 encoded text")]
    DocumentNotUtf8,

    #[error("Malformed multipart request body: {0}")]
    MalformedMultipart(String),

    #[error("The upstream service could not be reached: {0}")]
    UpstreamUnreachable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status code this error maps to
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingAuthorization
            | Self::MissingDocument
            | Self::DocumentNotUtf8
            | Self::MalformedMultipart(_) => StatusCode::BAD_REQUEST,
            Self::UpstreamUnreachable(_) => StatusCode::BAD_GATEWAY,
            Self::Config(_)
            | Self::ConfigFileRead { .. }
            | Self::ConfigParseFailed { .. }
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Envelope::error(self.to_string());
        (status, body).into_response()
    }
}

/// Convenience type alias for Results
pub type AppResult<T> = Result<T, AppError>;
