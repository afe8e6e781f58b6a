//! # Payment Session
//!
//! Read-only view of a checkout session owned by the payment provider.

use serde::{Deserialize, Serialize};

/// Payment status of a checkout session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    Unpaid,
    /// Anything else the provider reports (e.g., "no_payment_required")
    #[default]
    #[serde(other)]
    Other,
}

/// Lifecycle status of a checkout session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Complete,
    Open,
    /// Anything else the provider reports (e.g., "expired")
    #[default]
    #[serde(other)]
    Other,
}

/// A checkout session as returned by the provider's lookup endpoint.
///
/// Both status fields may be absent or null upstream; either case reads as `Other`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSession {
    /// Provider's session ID, when the provider echoes it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub payment_status: PaymentStatus,

    #[serde(default, deserialize_with = "null_as_default")]
    pub status: SessionStatus,
}

impl PaymentSession {
    pub fn new(id: impl Into<String>, payment_status: PaymentStatus, status: SessionStatus) -> Self {
        Self {
            id: Some(id.into()),
            payment_status,
            status,
        }
    }

    /// Paid iff the payment status is `paid` OR the session is `complete`.
    /// Either condition alone suffices.
    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Paid || self.status == SessionStatus::Complete
    }

    /// False when the provider answered for a different session than requested.
    /// A session without an echoed ID is taken as the requested one.
    pub fn matches_id(&self, requested: &str) -> bool {
        self.id.as_deref().map_or(true, |id| id == requested)
    }
}

/// Reads an explicit JSON `null` as the type's default
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
