//! Marketplace account types.

use serde::{Deserialize, Serialize};

use super::id::{PaymentAccountId, VendorId};

/// The role an account holds in the marketplace.
///
/// Resolved exactly once at the data-access boundary; nothing downstream
/// re-derives it from loosely-typed metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    #[default]
    Customer,
    Vendor,
}

impl std::fmt::Display for AccountRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Customer => write!(f, "customer"),
            Self::Vendor => write!(f, "vendor"),
        }
    }
}

/// A vendor's profile row as held in the relational store.
///
/// `payment_account_id` is set once the onboarding return leg completes; a
/// payment authorization may only ever reference a profile where it is
/// present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorProfile {
    pub id: VendorId,
    pub role: AccountRole,
    #[serde(default)]
    pub payment_account_id: Option<PaymentAccountId>,
    #[serde(default)]
    pub onboarding_completed: Option<bool>,
    #[serde(default)]
    pub business_name: Option<String>,
}

impl VendorProfile {
    /// Whether this vendor can be the destination of a split payment.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.payment_account_id.is_some()
    }
}
