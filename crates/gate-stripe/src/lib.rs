//! # gate-stripe
//!
//! Stripe Checkout Sessions gateway for paygate-rs.
//!
//! Talks to two endpoints directly over reqwest, no SDK:
//!
//! - `POST /v1/checkout/sessions` - create a one-time payment session
//! - `GET /v1/checkout/sessions/{id}` - look a session up for verification
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gate_stripe::{StripeConfig, StripeGateway};
//! use gate_core::{Cart, PaymentGateway, RedirectUrls};
//!
//! let gateway = StripeGateway::new(StripeConfig::from_env()?)?;
//!
//! let cart = Cart::default().with_item("price_123", 1);
//! let url = gateway
//!     .create_checkout(&cart, &RedirectUrls::from_origin("https://shop.example"))
//!     .await?;
//!
//! // Later, on the download request
//! let paid = gateway.retrieve_session("cs_test_abc").await?.is_paid();
//! ```

pub mod checkout;
pub mod config;

// Re-exports
pub use checkout::StripeGateway;
pub use config::StripeConfig;
