//! # gate-core
//!
//! Core types and traits for the paygate checkout and download gate.
//!
//! This crate provides:
//! - `Cart` and `CartItem` for the checkout flow
//! - `PaymentSession` with the paid/complete verification rule
//! - `FileArtifact` for the gated download
//! - `PaymentGateway` and `FileSource` traits for the two upstream services
//! - `GateError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use gate_core::{PaymentGateway, FileSource, RedirectUrls};
//!
//! // Checkout: hand the cart to the gateway, redirect the buyer to the URL
//! let urls = RedirectUrls::from_origin("https://shop.example");
//! let url = gateway.create_checkout(&cart, &urls).await?;
//!
//! // Download: verify first, then fetch
//! let session = gateway.retrieve_session("cs_test_abc").await?;
//! if session.is_paid() {
//!     let artifact = files.fetch().await?;
//! }
//! ```

pub mod cart;
pub mod error;
pub mod gateway;
pub mod session;

// Re-exports for convenience
pub use cart::{Cart, CartItem, FileArtifact, DEFAULT_CONTENT_TYPE};
pub use error::{GateError, GateResult};
pub use gateway::{
    BoxedFileSource, BoxedPaymentGateway, FileSource, PaymentGateway, RedirectUrls,
    SESSION_ID_PLACEHOLDER,
};
pub use session::{PaymentSession, PaymentStatus, SessionStatus};
