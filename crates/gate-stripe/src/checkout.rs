//! # Stripe Checkout Sessions
//!
//! Implementation of the Stripe Checkout Sessions API.
//! Sessions are created from caller-supplied price IDs; pricing lives in Stripe.

use crate::config::StripeConfig;
use async_trait::async_trait;
use gate_core::{
    Cart, GateError, GateResult, PaymentGateway, PaymentSession, RedirectUrls,
};
use reqwest::{Client, Response, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

const PROVIDER: &str = "stripe";

/// Fallback message when Stripe's error body carries none
const GENERIC_PROVIDER_MESSAGE: &str = "Stripe error";

/// `object` value Stripe reports for a checkout session
const SESSION_OBJECT: &str = "checkout.session";

/// Stripe Checkout Session gateway
///
/// Uses Stripe's hosted checkout page, so card data never touches this service.
pub struct StripeGateway {
    config: StripeConfig,
    client: Client,
}

impl StripeGateway {
    /// Create a new Stripe gateway with its own HTTP client
    pub fn new(config: StripeConfig) -> GateResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| GateError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_client(config, client))
    }

    /// Create a gateway sharing an existing HTTP client
    pub fn with_client(config: StripeConfig, client: Client) -> Self {
        Self { config, client }
    }

    /// Build the form body for a one-time payment session
    fn build_form_params(cart: &Cart, urls: &RedirectUrls) -> Vec<(String, String)> {
        let mut form_params: Vec<(String, String)> = vec![
            ("mode".to_string(), "payment".to_string()),
            ("success_url".to_string(), urls.success_url()),
            ("cancel_url".to_string(), urls.cancel_url()),
        ];

        for (i, item) in cart.items.iter().enumerate() {
            form_params.push((format!("line_items[{}][price]", i), item.price_id.clone()));
            form_params.push((
                format!("line_items[{}][quantity]", i),
                item.quantity.to_string(),
            ));
        }

        form_params
    }

    /// `{base}/v1/checkout/sessions[/{id}]`, with the ID encoded as one path segment
    fn sessions_url(&self, session_id: Option<&str>) -> GateResult<Url> {
        let mut url = Url::parse(&self.config.api_base_url).map_err(|e| {
            GateError::Configuration(format!(
                "Invalid Stripe API base URL {}: {}",
                self.config.api_base_url, e
            ))
        })?;

        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                GateError::Configuration(format!(
                    "Stripe API base URL cannot be a base: {}",
                    self.config.api_base_url
                ))
            })?;
            segments.pop_if_empty().extend(["v1", "checkout", "sessions"]);
            if let Some(id) = session_id {
                segments.push(id);
            }
        }

        Ok(url)
    }

    /// Parse a lookup body, rejecting anything that is not the requested session
    fn parse_session(session_id: &str, body: &str) -> GateResult<PaymentSession> {
        let value: serde_json::Value = serde_json::from_str(body).map_err(|e| {
            GateError::Serialization(format!("Failed to parse Stripe session: {}", e))
        })?;

        let object = value.get("object").and_then(|o| o.as_str());
        if object.is_some_and(|o| o != SESSION_OBJECT) {
            warn!("Stripe lookup returned a {:?} object, not a session", object);
            return Err(GateError::InvalidSession {
                session_id: session_id.to_string(),
            });
        }

        let session: PaymentSession = serde_json::from_value(value).map_err(|e| {
            GateError::Serialization(format!("Failed to parse Stripe session: {}", e))
        })?;

        if !session.matches_id(session_id) {
            warn!("Stripe lookup returned session {:?}", session.id);
            return Err(GateError::InvalidSession {
                session_id: session_id.to_string(),
            });
        }

        Ok(session)
    }

    /// Read the body and turn a non-success status into `GateError::Provider`
    async fn read_body(response: Response) -> GateResult<String> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GateError::Network(e.to_string()))?;

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);

            let message = serde_json::from_str::<StripeErrorResponse>(&body)
                .ok()
                .and_then(|r| r.error.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| GENERIC_PROVIDER_MESSAGE.to_string());

            return Err(GateError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    #[instrument(skip(self, cart, urls), fields(items = cart.items.len()))]
    async fn create_checkout(&self, cart: &Cart, urls: &RedirectUrls) -> GateResult<String> {
        cart.validate()?;

        let form_params = Self::build_form_params(cart, urls);
        let idempotency_key = Uuid::new_v4().to_string();

        debug!(
            "Creating Stripe checkout session: {} items, success_url={}",
            cart.items.len(),
            urls.success_url()
        );

        let response = self
            .client
            .post(self.sessions_url(None)?)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .header("Idempotency-Key", &idempotency_key)
            .form(&form_params)
            .send()
            .await
            .map_err(|e| GateError::Network(e.to_string()))?;

        let body = Self::read_body(response).await?;

        let session: StripeCheckoutSessionResponse = serde_json::from_str(&body).map_err(|e| {
            GateError::Serialization(format!("Failed to parse Stripe response: {}", e))
        })?;

        let url = session.url.ok_or_else(|| {
            GateError::Serialization(format!("Stripe session {} has no checkout URL", session.id))
        })?;

        info!("Created Stripe checkout session: id={}", session.id);

        Ok(url)
    }

    #[instrument(skip(self))]
    async fn retrieve_session(&self, session_id: &str) -> GateResult<PaymentSession> {
        // URL path normalization would resolve these against the sessions path
        if matches!(session_id, "" | "." | "..") {
            return Err(GateError::InvalidSession {
                session_id: session_id.to_string(),
            });
        }

        let response = self
            .client
            .get(self.sessions_url(Some(session_id))?)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .send()
            .await
            .map_err(|e| GateError::Network(e.to_string()))?;

        let body = Self::read_body(response).await?;
        let session = Self::parse_session(session_id, &body)?;

        debug!(
            "Retrieved Stripe session: payment_status={:?}, status={:?}",
            session.payment_status, session.status
        );

        Ok(session)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeCheckoutSessionResponse {
    #[serde(default)]
    id: String,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    #[serde(default)]
    message: Option<String>,
}
