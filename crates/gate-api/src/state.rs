//! # Application State
//!
//! Configuration is read once at startup and injected into the handlers
//! through `AppState`. Missing upstream configuration does not stop the
//! server; the handler that needs it answers 500 instead.

use gate_blob::{BlobConfig, BlobFileSource};
use gate_core::{BoxedFileSource, BoxedPaymentGateway};
use gate_stripe::{StripeConfig, StripeGateway};
use std::sync::Arc;
use std::time::Duration;

/// Filename presented to the buyer, whatever the underlying blob is called
pub const DEFAULT_DOWNLOAD_FILENAME: &str = "Vibe-Coding-Guide.pdf";

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Origin used for redirect URLs when the request carries no Host header
    pub base_url: String,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Timeout applied to every outbound request
    pub http_timeout_secs: u64,
    /// Attachment filename on successful downloads
    pub download_filename: String,
    /// Stripe settings; `None` when `STRIPE_SECRET_KEY` is unset
    pub stripe: Option<StripeConfig>,
    /// Blob settings; `None` when `FILE_URL` is unset
    pub blob: Option<BlobConfig>,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let stripe = StripeConfig::from_env()
            .map_err(|e| tracing::debug!("Stripe disabled: {}", e))
            .ok();
        let blob = BlobConfig::from_env()
            .map_err(|e| tracing::debug!("File source disabled: {}", e))
            .ok();

        let defaults = Self::default();

        Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            base_url: std::env::var("BASE_URL").unwrap_or(defaults.base_url),
            environment: std::env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            http_timeout_secs: std::env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(defaults.http_timeout_secs),
            download_filename: std::env::var("DOWNLOAD_FILENAME")
                .ok()
                .filter(|f| !f.trim().is_empty())
                .unwrap_or(defaults.download_filename),
            stripe,
            blob,
        }
    }

    /// Builder: enable the payment gateway
    pub fn with_stripe(mut self, stripe: StripeConfig) -> Self {
        self.stripe = Some(stripe);
        self
    }

    /// Builder: enable the file source
    pub fn with_blob(mut self, blob: BlobConfig) -> Self {
        self.blob = Some(blob);
        self
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid socket address {}:{}: {}", self.host, self.port, e))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            base_url: "http://localhost:8080".to_string(),
            environment: "development".to_string(),
            http_timeout_secs: 30,
            download_filename: DEFAULT_DOWNLOAD_FILENAME.to_string(),
            stripe: None,
            blob: None,
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payment gateway; absent when Stripe is not configured
    pub payments: Option<BoxedPaymentGateway>,
    /// File source; absent when no file URL is configured
    pub files: Option<BoxedFileSource>,
    /// Application config
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Build the upstream clients from configuration
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        let payments = config.stripe.clone().map(|stripe| {
            Arc::new(StripeGateway::with_client(stripe, client.clone())) as BoxedPaymentGateway
        });

        let files = config.blob.clone().map(|blob| {
            Arc::new(BlobFileSource::with_client(blob, client.clone())) as BoxedFileSource
        });

        Ok(Self::from_parts(config, payments, files))
    }

    /// Assemble state from already-built upstreams
    pub fn from_parts(
        config: AppConfig,
        payments: Option<BoxedPaymentGateway>,
        files: Option<BoxedFileSource>,
    ) -> Self {
        Self {
            payments,
            files,
            config: Arc::new(config),
        }
    }

    /// `attachment; filename=...` header value for downloads
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename={}", self.config.download_filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.download_filename, "Vibe-Coding-Guide.pdf");
        assert!(config.stripe.is_none());
        assert!(config.blob.is_none());
        assert!(!config.is_production());
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            ..AppConfig::default()
        };

        let addr = config.socket_addr().unwrap();
        assert_eq!(addr.to_string(), "0.0.0.0:3000");

        let config = AppConfig {
            host: "not a host".to_string(),
            ..AppConfig::default()
        };
        assert!(config.socket_addr().is_err());
    }

    #[tokio::test]
    async fn test_state_wires_configured_upstreams() {
        let state = AppState::new(AppConfig::default()).unwrap();
        assert!(state.payments.is_none());
        assert!(state.files.is_none());

        let config = AppConfig::default()
            .with_stripe(StripeConfig::new("sk_test_123"))
            .with_blob(BlobConfig::new("https://blob.example/guide.pdf"));
        let state = AppState::new(config).unwrap();

        assert_eq!(
            state.payments.as_ref().map(|p| p.provider_name()),
            Some("stripe")
        );
        assert!(state.files.is_some());
        assert_eq!(
            state.content_disposition(),
            "attachment; filename=Vibe-Coding-Guide.pdf"
        );
    }
}
