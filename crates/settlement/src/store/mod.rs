//! Relational store collaborator.
//!
//! The hosted store exposes row-level read/insert/update over REST; the
//! settlement core depends on it never silently losing an insert (it either
//! commits or reports failure) and on cascade deletion being configured for
//! account removal. Cart state is deliberately absent - carts are client-held
//! and never persisted here.

mod rest;

pub use rest::RestStoreClient;

use async_trait::async_trait;
use thiserror::Error;

use vendora_core::{
    NewOrder, NewOrderLine, OrderRecord, PaymentAccountId, PromotedListing, VendorId,
    VendorProfile,
};

/// Errors that can occur when interacting with the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store rejected the call.
    #[error("store error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to decode a store response.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Row-level store operations used by the settlement core.
#[async_trait]
pub trait MarketStore: Send + Sync {
    /// Fetch a vendor's profile row, if one exists.
    async fn vendor_profile(&self, vendor: VendorId) -> Result<Option<VendorProfile>, StoreError>;

    /// Persist a vendor's payment sub-account id (the onboarding return leg).
    async fn set_payment_account(
        &self,
        vendor: VendorId,
        account: &PaymentAccountId,
    ) -> Result<(), StoreError>;

    /// Insert one order row and return it.
    async fn insert_order(&self, order: &NewOrder) -> Result<OrderRecord, StoreError>;

    /// Insert a batch of order lines. The store commits the batch or reports
    /// failure; there are no partial inserts.
    async fn insert_order_lines(&self, lines: &[NewOrderLine]) -> Result<(), StoreError>;

    /// All promotion-flagged listings, joined with their vendor's display
    /// name.
    async fn promoted_listings(&self) -> Result<Vec<PromotedListing>, StoreError>;
}
