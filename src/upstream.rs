//! Client for the upstream completion service
//!
//! Issues model-listing and chat-completion calls against an OpenAI-compatible
//! API, authorized by the caller-supplied bearer credential. Responses are
//! returned as raw status plus parsed JSON body; transport failures surface as
//! [`AppError::UpstreamUnreachable`] instead of crashing the handler.

use axum::http::StatusCode;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// Conversational role used for submitting instructions and data
pub const MESSAGE_ROLE: &str = "user";

/// Fallback when a failed upstream body carries no `error.message` field
pub const UNIDENTIFIED_ERROR: &str = "The error could not be identified";

/// A single (role, content) prompt unit
///
/// Sequences of messages form a conversation; order is significant and is
/// insertion order.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Build a message with the fixed instructional role
///
/// Pure constructor; the text passes through unvalidated (empty and
/// arbitrarily long content are both fine).
pub fn build_message(text: impl Into<String>) -> ChatMessage {
    ChatMessage {
        role: MESSAGE_ROLE.to_string(),
        content: text.into(),
    }
}

/// Chat-completion request payload
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

/// One upstream call's outcome: raw status code and parsed JSON body
///
/// Transient per request; consumed immediately by the handler that issued the
/// call, never cached.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl UpstreamResponse {
    /// Whether the upstream call returned a 2xx status
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Extract `error.message` from the body, falling back to the fixed
    /// placeholder when the field is absent or not a string
    pub fn error_message(&self) -> String {
        self.body
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(Value::as_str)
            .unwrap_or(UNIDENTIFIED_ERROR)
            .to_string()
    }
}

/// HTTP client for the upstream completion service
///
/// Holds one shared `reqwest::Client` with a bounded request timeout; no
/// retries, no local state beyond the connection pool.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

impl UpstreamClient {
    /// Create a client from configuration
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.server.request_timeout_seconds))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.upstream.base_url.clone(),
            model: config.upstream.model.clone(),
        })
    }

    /// Issue a read-only call to the model-listing endpoint
    ///
    /// Used to verify that a credential is accepted by the upstream service.
    /// The upstream status and body are returned unmodified.
    pub async fn list_models(&self, credential: &str) -> AppResult<UpstreamResponse> {
        let url = format!("{}/models", self.base_url);
        tracing::debug!(url = %url, "Listing upstream models");

        let response = self
            .http
            .get(&url)
            .bearer_auth(credential)
            .send()
            .await
            .map_err(|e| AppError::UpstreamUnreachable(e.to_string()))?;

        Self::read_response(response).await
    }

    /// Issue a chat-completion call with the given ordered message sequence
    ///
    /// Returns whatever status and body the upstream produced, unmodified in
    /// structure.
    pub async fn create_chat_completion(
        &self,
        credential: &str,
        messages: &[ChatMessage],
    ) -> AppResult<UpstreamResponse> {
        let url = format!("{}/chat/completions", self.base_url);
        tracing::debug!(
            url = %url,
            model = %self.model,
            messages_count = messages.len(),
            "Requesting upstream chat completion"
        );

        let payload = ChatCompletionRequest {
            model: &self.model,
            messages,
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(credential)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::UpstreamUnreachable(e.to_string()))?;

        Self::read_response(response).await
    }

    async fn read_response(response: reqwest::Response) -> AppResult<UpstreamResponse> {
        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| AppError::UpstreamUnreachable(format!("invalid upstream JSON: {}", e)))?;

        tracing::debug!(status = %status, "Upstream response received");

        Ok(UpstreamResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn build_message_uses_fixed_role() {
        let message = build_message("hello");
        assert_eq!(message.role, "user");
        assert_eq!(message.content, "hello");
    }

    #[test]
    fn build_message_passes_empty_text_through() {
        let message = build_message("");
        assert_eq!(message.content, "");
    }

    #[test]
    fn message_serializes_as_role_content_pair() {
        let message = build_message("a,b\n1,2");
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value, json!({"role": "user", "content": "a,b\n1,2"}));
    }

    #[test]
    fn error_message_extracted_from_body() {
        let response = UpstreamResponse {
            status: StatusCode::UNAUTHORIZED,
            body: json!({"error": {"message": "Incorrect API key provided"}}),
        };
        assert_eq!(response.error_message(), "Incorrect API key provided");
    }

    #[test]
    fn error_message_falls_back_to_placeholder() {
        let response = UpstreamResponse {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: json!({"unexpected": "shape"}),
        };
        assert_eq!(response.error_message(), UNIDENTIFIED_ERROR);
    }

    #[test]
    fn error_message_falls_back_when_not_a_string() {
        let response = UpstreamResponse {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: json!({"error": {"message": 42}}),
        };
        assert_eq!(response.error_message(), UNIDENTIFIED_ERROR);
    }

    #[test]
    fn success_detection_follows_status_class() {
        let ok = UpstreamResponse {
            status: StatusCode::OK,
            body: json!({"data": []}),
        };
        let denied = UpstreamResponse {
            status: StatusCode::UNAUTHORIZED,
            body: json!({}),
        };
        assert!(ok.is_success());
        assert!(!denied.is_success());
    }
}
