//! # Upstream Traits
//!
//! The two upstream services the gate talks to, behind traits so handlers can
//! be driven by any implementation.
//!
//! ```text
//! ┌──────────────────────────────┐   ┌──────────────────────────────┐
//! │   PaymentGateway (trait)     │   │     FileSource (trait)       │
//! │  ├── create_checkout()       │   │  └── fetch()                 │
//! │  ├── retrieve_session()      │   └──────────────────────────────┘
//! │  └── provider_name()         │                  ▲
//! └──────────────────────────────┘                  │
//!                ▲                          ┌───────┴────────┐
//!        ┌───────┴────────┐                 │ BlobFileSource │
//!        │ StripeGateway  │                 └────────────────┘
//!        └────────────────┘
//! ```

use crate::cart::{Cart, FileArtifact};
use crate::error::GateResult;
use crate::session::PaymentSession;
use async_trait::async_trait;
use std::sync::Arc;

/// Template token the payment provider replaces with the real session ID
pub const SESSION_ID_PLACEHOLDER: &str = "{CHECKOUT_SESSION_ID}";

/// Payment provider operations used by the checkout and download handlers.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a one-time payment session for the cart.
    ///
    /// # Returns
    /// The hosted checkout URL the buyer should be redirected to.
    async fn create_checkout(&self, cart: &Cart, urls: &RedirectUrls) -> GateResult<String>;

    /// Look up an existing session by ID.
    ///
    /// Any non-success answer from the provider surfaces as `GateError::Provider`.
    async fn retrieve_session(&self, session_id: &str) -> GateResult<PaymentSession>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Source of the gated file.
#[async_trait]
pub trait FileSource: Send + Sync {
    /// Fetch the file bytes and content type.
    async fn fetch(&self) -> GateResult<FileArtifact>;
}

/// Type alias for a shared payment gateway (dynamic dispatch)
pub type BoxedPaymentGateway = Arc<dyn PaymentGateway>;

/// Type alias for a shared file source (dynamic dispatch)
pub type BoxedFileSource = Arc<dyn FileSource>;

/// Success and cancel redirect URLs for a checkout session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectUrls {
    /// Origin of the storefront (e.g., "https://shop.example")
    pub origin: String,
    /// Page the buyer lands on after paying
    pub success_path: String,
    /// Page the buyer lands on after cancelling
    pub cancel_path: String,
}

impl RedirectUrls {
    pub fn from_origin(origin: impl Into<String>) -> Self {
        let origin: String = origin.into();
        Self {
            origin: origin.trim_end_matches('/').to_string(),
            success_path: "/thanks.html".to_string(),
            cancel_path: "/index.html".to_string(),
        }
    }

    /// Build from the inbound request's forwarded protocol and host.
    /// The protocol defaults to "http".
    pub fn from_forwarded(proto: Option<&str>, host: &str) -> Self {
        let proto = proto
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or("http");
        Self::from_origin(format!("{}://{}", proto, host))
    }

    /// Success URL carrying the provider's session ID placeholder
    pub fn success_url(&self) -> String {
        format!(
            "{}{}?session_id={}",
            self.origin, self.success_path, SESSION_ID_PLACEHOLDER
        )
    }

    pub fn cancel_url(&self) -> String {
        format!("{}{}", self.origin, self.cancel_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_urls() {
        let urls = RedirectUrls::from_forwarded(Some("https"), "shop.example");

        assert_eq!(
            urls.success_url(),
            "https://shop.example/thanks.html?session_id={CHECKOUT_SESSION_ID}"
        );
        assert_eq!(urls.cancel_url(), "https://shop.example/index.html");
    }

    #[test]
    fn test_protocol_defaults_to_http() {
        let urls = RedirectUrls::from_forwarded(None, "localhost:3000");
        assert_eq!(urls.cancel_url(), "http://localhost:3000/index.html");

        let urls = RedirectUrls::from_forwarded(Some(""), "localhost:3000");
        assert_eq!(urls.origin, "http://localhost:3000");
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let urls = RedirectUrls::from_origin("http://localhost:8080/");
        assert_eq!(urls.cancel_url(), "http://localhost:8080/index.html");
    }
}
