//! Payment provider collaborator.
//!
//! The settlement core talks to the payment provider through the
//! [`PaymentProvider`] trait; [`StripeClient`] is the production
//! implementation. Provider rejections are surfaced verbatim (message plus
//! error code) and are never retried here - a blind retry of a
//! payment-affecting call risks duplicate charge intent.

mod stripe;

pub use stripe::StripeClient;

use async_trait::async_trait;
use thiserror::Error;

use vendora_core::{MinorUnits, PaymentAccountId, PaymentIntentId, VendorId};

/// Errors that can occur when interacting with the payment provider.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// HTTP request failed before the provider could answer.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider rejected the call. Message and code are passed through
    /// verbatim for diagnosis.
    #[error("{message} ({code})")]
    Api {
        /// Human-readable provider message.
        message: String,
        /// Provider error code (e.g. `account_invalid`).
        code: String,
        /// Provider error class (e.g. `invalid_request_error`).
        kind: String,
        /// HTTP status of the rejection.
        status: u16,
    },

    /// A 2xx response was missing a field the contract requires.
    #[error("provider response missing `{0}`")]
    MalformedResponse(&'static str),
}

/// A freshly created provider sub-account for a vendor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectedAccount {
    pub id: PaymentAccountId,
}

/// A time-limited provider-hosted onboarding URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingLink {
    pub url: String,
}

/// Everything the provider needs to authorize one split charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeSpec {
    /// Full amount to charge, in minor units.
    pub amount: MinorUnits,
    /// Portion retained by the platform, in minor units.
    pub platform_fee: MinorUnits,
    /// The vendor sub-account receiving the remainder.
    pub destination: PaymentAccountId,
    /// Attached as metadata for reconciliation.
    pub vendor_id: VendorId,
}

/// A payment authorization handle. Only the identifier and client secret
/// cross the boundary; nothing else is persisted locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntent {
    pub id: PaymentIntentId,
    pub client_secret: String,
}

/// Payment provider operations used by the settlement core.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create an "express" sub-account (provider-managed compliance UI).
    async fn create_express_account(&self) -> Result<ConnectedAccount, PaymentError>;

    /// Create an onboarding link for a sub-account. `refresh_url` is where
    /// the provider sends the vendor when the link expires; `return_url` is
    /// where it sends them on completion.
    async fn create_onboarding_link(
        &self,
        account: &PaymentAccountId,
        refresh_url: &str,
        return_url: &str,
    ) -> Result<OnboardingLink, PaymentError>;

    /// Create a split payment authorization. A caller-supplied idempotency
    /// key makes retried client requests safe against duplicate
    /// authorizations.
    async fn create_payment_intent(
        &self,
        spec: &ChargeSpec,
        idempotency_key: Option<&str>,
    ) -> Result<PaymentIntent, PaymentError>;
}
