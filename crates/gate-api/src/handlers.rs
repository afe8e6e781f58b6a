//! # Request Handlers
//!
//! Axum request handlers for checkout and the gated download.
//! Checkout answers in JSON; the download answers in plain text on failure.

use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::{
        header::{CONTENT_DISPOSITION, CONTENT_TYPE, HOST},
        HeaderMap, StatusCode,
    },
    response::{IntoResponse, Response},
    Json,
};
use gate_core::{Cart, FileArtifact, GateError, GateResult, RedirectUrls};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{error, info, instrument, warn};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Create checkout response
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckoutResponse {
    /// Hosted checkout URL (redirect user here)
    pub url: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

pub type JsonError = (StatusCode, Json<ErrorResponse>);

fn status_of(err: &GateError) -> StatusCode {
    StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

fn log_error(context: &str, err: &GateError) {
    if err.is_client_error() {
        warn!("{} rejected: {}", context, err);
    } else {
        error!("{} failed: {}", context, err);
    }
}

fn gate_error_to_json(err: GateError) -> JsonError {
    log_error("Checkout", &err);
    (status_of(&err), Json(ErrorResponse::new(err.public_message())))
}

fn gate_error_to_text(err: GateError) -> (StatusCode, String) {
    log_error("Download", &err);
    (status_of(&err), err.public_message())
}

/// Origin for redirect URLs: `<X-Forwarded-Proto or http>://<Host>`,
/// falling back to the configured base URL without a Host header
fn redirect_urls(headers: &HeaderMap, base_url: &str) -> RedirectUrls {
    let host = headers
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .filter(|h| !h.is_empty());
    let proto = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok());

    match host {
        Some(host) => RedirectUrls::from_forwarded(proto, host),
        None => RedirectUrls::from_origin(base_url),
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "paygate",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Create a checkout session for the submitted cart
#[instrument(skip_all)]
pub async fn create_checkout(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<Cart>, JsonRejection>,
) -> Result<Json<CheckoutResponse>, JsonError> {
    let Json(cart) = payload.map_err(|rejection| {
        warn!("Unreadable checkout body: {}", rejection.body_text());
        gate_error_to_json(GateError::InvalidRequest(
            "Invalid request body".to_string(),
        ))
    })?;

    cart.validate().map_err(gate_error_to_json)?;

    let gateway = state.payments.as_ref().ok_or_else(|| {
        error!("Missing STRIPE_SECRET_KEY environment variable");
        gate_error_to_json(GateError::Configuration(
            "Server misconfigured: Missing Stripe Key".to_string(),
        ))
    })?;

    let urls = redirect_urls(&headers, &state.config.base_url);

    info!(
        "Creating checkout: provider={}, {} items, quantity={}",
        gateway.provider_name(),
        cart.items.len(),
        cart.item_count()
    );

    let url = gateway
        .create_checkout(&cart, &urls)
        .await
        .map_err(gate_error_to_json)?;

    Ok(Json(CheckoutResponse { url }))
}

/// Answer for any non-POST method on the checkout route
pub async fn checkout_method_not_allowed() -> JsonError {
    gate_error_to_json(GateError::MethodNotAllowed)
}

/// Serve the file once the session is verified as paid
#[instrument(skip_all)]
pub async fn download(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let session_id = params.get("session_id").map(String::as_str);

    match verified_download(&state, session_id).await {
        Ok(artifact) => {
            info!(
                "Serving download: {} bytes, content_type={}",
                artifact.len(),
                artifact.content_type
            );
            (
                StatusCode::OK,
                [
                    (CONTENT_TYPE, artifact.content_type),
                    (CONTENT_DISPOSITION, state.content_disposition()),
                ],
                artifact.bytes,
            )
                .into_response()
        }
        Err(err) => gate_error_to_text(err).into_response(),
    }
}

/// Each step short-circuits; the file is only fetched after the session
/// lookup reports paid or complete.
async fn verified_download(state: &AppState, session_id: Option<&str>) -> GateResult<FileArtifact> {
    // Passed to the lookup exactly as received
    let session_id = session_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| GateError::InvalidRequest("Missing session_id parameter".to_string()))?;

    let gateway = state.payments.as_ref().ok_or_else(|| {
        error!("Missing STRIPE_SECRET_KEY");
        GateError::Configuration("Server configuration error".to_string())
    })?;

    // Not-found and forbidden both surface as 403
    let session = gateway
        .retrieve_session(session_id)
        .await
        .map_err(|e| match e {
            GateError::Provider { status, message } => {
                warn!(
                    "Session verification failed: status={}, message={}",
                    status, message
                );
                GateError::InvalidSession {
                    session_id: session_id.to_string(),
                }
            }
            other => other,
        })?;

    if !session.is_paid() {
        return Err(GateError::PaymentRequired {
            session_id: session_id.to_string(),
        });
    }

    let files = state.files.as_ref().ok_or_else(|| {
        error!("Missing FILE_URL");
        GateError::Configuration("File source not configured".to_string())
    })?;

    files.fetch().await
}
