//! # Cart Types
//!
//! Cart and file artifact types. Both are request-scoped and never persisted.

use crate::error::{GateError, GateResult};
use crate::session::null_as_default;
use serde::{Deserialize, Serialize};

/// Content type used when the blob store does not report one
pub const DEFAULT_CONTENT_TYPE: &str = "application/pdf";

/// A single cart entry.
///
/// The price identifier and quantity are passed through to the payment
/// provider as given; pricing is owned by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Provider price identifier (e.g., "price_123")
    #[serde(rename = "priceId")]
    pub price_id: String,

    /// Quantity
    pub quantity: u32,
}

impl CartItem {
    pub fn new(price_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            price_id: price_id.into(),
            quantity,
        }
    }
}

/// An ordered cart submitted for checkout
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    /// Items in submission order; absent or null reads as empty
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<CartItem>,
}

impl Cart {
    pub fn new(items: Vec<CartItem>) -> Self {
        Self { items }
    }

    /// Add an item (builder style)
    pub fn with_item(mut self, price_id: impl Into<String>, quantity: u32) -> Self {
        self.items.push(CartItem::new(price_id, quantity));
        self
    }

    /// Check if cart is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get item count (sum of quantities)
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Reject carts that cannot be checked out
    pub fn validate(&self) -> GateResult<()> {
        if self.is_empty() {
            return Err(GateError::InvalidRequest("No items in cart".to_string()));
        }
        Ok(())
    }
}

/// The gated file, fetched per request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileArtifact {
    /// Raw file bytes
    pub bytes: Vec<u8>,

    /// Content type reported upstream, or `DEFAULT_CONTENT_TYPE`
    pub content_type: String,
}

impl FileArtifact {
    /// Build an artifact, falling back to `DEFAULT_CONTENT_TYPE` when the
    /// upstream content type is missing or blank
    pub fn new(bytes: Vec<u8>, content_type: Option<String>) -> Self {
        let content_type = content_type
            .filter(|ct| !ct.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());
        Self {
            bytes,
            content_type,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_deserializes_camel_case_price_id() {
        let cart: Cart =
            serde_json::from_str(r#"{"items":[{"priceId":"price_123","quantity":2}]}"#).unwrap();

        assert_eq!(cart.items, vec![CartItem::new("price_123", 2)]);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_missing_items_is_empty_cart() {
        let cart: Cart = serde_json::from_str("{}").unwrap();
        assert!(cart.is_empty());

        let err = cart.validate().unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.public_message(), "No items in cart");
    }

    #[test]
    fn test_null_items_is_empty_cart() {
        let cart: Cart = serde_json::from_str(r#"{"items":null}"#).unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.validate().unwrap_err().public_message(), "No items in cart");
    }

    #[test]
    fn test_item_without_price_id_is_rejected() {
        let result = serde_json::from_str::<Cart>(r#"{"items":[{"quantity":1}]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_cart_preserves_order() {
        let cart = Cart::default()
            .with_item("price_b", 1)
            .with_item("price_a", 3);

        assert!(cart.validate().is_ok());
        assert_eq!(cart.items[0].price_id, "price_b");
        assert_eq!(cart.items[1].price_id, "price_a");
        assert_eq!(cart.item_count(), 4);
    }

    #[test]
    fn test_artifact_default_content_type() {
        let artifact = FileArtifact::new(b"PDF".to_vec(), None);
        assert_eq!(artifact.content_type, DEFAULT_CONTENT_TYPE);
        assert_eq!(artifact.len(), 3);

        let artifact = FileArtifact::new(Vec::new(), Some("  ".into()));
        assert_eq!(artifact.content_type, DEFAULT_CONTENT_TYPE);
        assert!(artifact.is_empty());

        let artifact = FileArtifact::new(b"x".to_vec(), Some("application/epub+zip".into()));
        assert_eq!(artifact.content_type, "application/epub+zip");
    }
}
