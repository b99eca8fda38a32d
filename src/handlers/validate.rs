//! Credential validation handler
//!
//! Handles POST /validate_credentials/ requests by probing the upstream
//! model-listing endpoint with the caller-supplied credential.

use axum::{
    Extension,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::envelope::Envelope;
use crate::error::AppError;
use crate::handlers::AppState;
use crate::middleware::RequestId;

/// Confirmation returned for an accepted credential.
/// The typo is load-bearing: existing clients match on this exact string.
pub const VALID_KEY_MESSAGE: &str = "The API key providad is valid";

/// POST /validate_credentials/ handler
///
/// Reads the credential from the `Authorization` header and re-verifies it
/// against the upstream service on every call; nothing is cached.
///
/// # Responses
///
/// - `400` with an error envelope when the header is missing
/// - `200` with a success envelope when upstream accepts the credential
/// - the upstream's own status, propagated unchanged, with an error envelope
///   carrying `error.message` from the upstream body (or a fixed placeholder
///   when that field is absent)
pub async fn handler(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let credential = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AppError::MissingAuthorization)?;

    let models = state.upstream().list_models(credential).await?;

    if !models.is_success() {
        let message = models.error_message();
        tracing::info!(
            request_id = %request_id,
            upstream_status = %models.status,
            "Upstream rejected credential"
        );
        return Ok((models.status, Envelope::error(message)).into_response());
    }

    tracing::debug!(request_id = %request_id, "Credential accepted by upstream");
    Ok((StatusCode::OK, Envelope::success(VALID_KEY_MESSAGE)).into_response())
}
