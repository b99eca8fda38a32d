//! Document analysis handler
//!
//! Handles POST /analyze_document/ requests: accepts an uploaded CSV, frames
//! it in a fixed analysis prompt, and relays the upstream chat-completion
//! response verbatim.

use axum::{
    Extension, Json,
    extract::{FromRequest, Multipart, Request, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::handlers::AppState;
use crate::middleware::RequestId;
use crate::upstream::build_message;

/// Fixed instruction framing the uploaded document
pub const ANALYSIS_INSTRUCTION: &str = "Interpret the following CSV and provide an extended \
    summary, then a list of 10 suggestions for further analysis";

/// Multipart field name carrying the uploaded document
const DOCUMENT_FIELD: &str = "document";

/// POST /analyze_document/ handler
///
/// The credential header is deliberately not pre-checked here: a missing
/// header is forwarded as an empty credential and rejected by upstream,
/// whose error body is relayed like any other completion response.
///
/// # Responses
///
/// - `400` with an error envelope when the `document` field is missing, the
///   multipart body is malformed, or the file is not valid UTF-8
/// - otherwise the upstream chat-completion JSON body, returned directly
///   (never wrapped in the envelope) with the upstream's own status
pub async fn handler(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    headers: HeaderMap,
    request: Request,
) -> Result<Response, AppError> {
    let credential = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();

    // A body that is not multipart at all carries no document field, so the
    // extractor rejection collapses into the same missing-field outcome.
    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|_| AppError::MissingDocument)?;

    let content = read_document_field(&mut multipart).await?;

    tracing::debug!(
        request_id = %request_id,
        document_bytes = content.len(),
        "Forwarding document for analysis"
    );

    let messages = [build_message(ANALYSIS_INSTRUCTION), build_message(content)];
    let completion = state
        .upstream()
        .create_chat_completion(&credential, &messages)
        .await?;

    tracing::info!(
        request_id = %request_id,
        upstream_status = %completion.status,
        "Relaying upstream completion response"
    );

    Ok((completion.status, Json(completion.body)).into_response())
}

/// Pull the `document` field out of the multipart body and decode it as UTF-8
///
/// The file is fully buffered before forwarding; there is no streaming path.
async fn read_document_field(multipart: &mut Multipart) -> Result<String, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::MalformedMultipart(e.to_string()))?
    {
        if field.name() != Some(DOCUMENT_FIELD) {
            continue;
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::MalformedMultipart(e.to_string()))?;

        return String::from_utf8(bytes.to_vec()).map_err(|_| AppError::DocumentNotUtf8);
    }

    Err(AppError::MissingDocument)
}
