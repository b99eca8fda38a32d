//! Outward response envelope
//!
//! Every locally-shaped response is exactly one of two shapes:
//! `{"response": {"message": ...}}` on success or
//! `{"error": {"message": ..., ...extra}}` on failure. Auxiliary diagnostic
//! keys may be merged into the error shape; `message` is always present.

use axum::{Json, response::IntoResponse, response::Response};
use serde::Serialize;
use serde_json::{Map, Value};

/// Tagged union of the two outward response shapes
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Envelope {
    Success { response: SuccessPayload },
    Error { error: ErrorPayload },
}

/// Body of the success shape
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SuccessPayload {
    pub message: String,
}

/// Body of the error shape
///
/// `extra` holds upstream-provided diagnostic keys and is flattened into the
/// same JSON object as `message`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ErrorPayload {
    pub message: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Envelope {
    /// Wrap a confirmation message as `{"response": {"message": ...}}`
    pub fn success(message: impl Into<String>) -> Self {
        Self::Success {
            response: SuccessPayload {
                message: message.into(),
            },
        }
    }

    /// Wrap a failure message as `{"error": {"message": ...}}`
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: ErrorPayload {
                message: message.into(),
                extra: Map::new(),
            },
        }
    }

    /// Failure shape with auxiliary diagnostic keys merged alongside `message`
    pub fn error_with(message: impl Into<String>, extra: Map<String, Value>) -> Self {
        Self::Error {
            error: ErrorPayload {
                message: message.into(),
                extra,
            },
        }
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
