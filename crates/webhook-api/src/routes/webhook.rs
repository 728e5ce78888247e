//! Webhook receiver for call platform events.
//!
//! Every event arrives here as a signed POST. The handler checks the
//! `x-signature` and `x-api-key` headers, verifies the HMAC over the raw
//! body, decodes the event, and hands it to the coordinator. Events of an
//! unrecognized type are acknowledged without side effects so the platform
//! does not retry them.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use coordinator::decode_event;
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct Ack {
    pub status: String,
}

/// Non-empty header value, or `None` if missing or blank.
fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
}

/// Handle `POST /api/webhook`.
pub async fn receive(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Ack>, ApiError> {
    let signature = header_value(&headers, "x-signature")
        .ok_or_else(|| ApiError::BadRequest("Missing signature or API key".to_string()))?;
    header_value(&headers, "x-api-key")
        .ok_or_else(|| ApiError::BadRequest("Missing signature or API key".to_string()))?;

    if !state.calls.verify_webhook(&body, signature) {
        return Err(ApiError::Unauthorized);
    }

    let event = decode_event(&body)
        .map_err(|err| ApiError::BadRequest(format!("Invalid event payload: {err}")))?;

    debug!(?event, "webhook event received");
    state.coordinator.handle_event(event).await?;

    Ok(Json(Ack {
        status: "ok".to_string(),
    }))
}
