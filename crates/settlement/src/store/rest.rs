//! Hosted-store REST client (PostgREST dialect).
//!
//! All calls are made with the service-role key, which bypasses row-level
//! security; nothing in this module is reachable from an unauthenticated
//! code path.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Deserialize;
use tracing::instrument;

use vendora_core::{
    NewOrder, NewOrderLine, OrderRecord, PaymentAccountId, PromotedListing, VendorId,
    VendorProfile,
};

use crate::config::StoreConfig;

use super::{MarketStore, StoreError};

/// Client for the hosted store's row-level REST API.
#[derive(Clone)]
pub struct RestStoreClient {
    client: reqwest::Client,
    rest_base: String,
}

impl RestStoreClient {
    /// Create a new store client.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Parse`] if the service key is not a valid
    /// header value.
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(config.service_key.expose_secret())
            .map_err(|e| StoreError::Parse(format!("invalid service key: {e}")))?;
        headers.insert("apikey", key);
        let bearer = HeaderValue::from_str(&format!(
            "Bearer {}",
            config.service_key.expose_secret()
        ))
        .map_err(|e| StoreError::Parse(format!("invalid service key: {e}")))?;
        headers.insert("Authorization", bearer);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            rest_base: format!("{}/rest/v1", config.url.trim_end_matches('/')),
        })
    }

    /// Convert a non-2xx store response into [`StoreError::Api`].
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(StoreError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl MarketStore for RestStoreClient {
    #[instrument(skip(self))]
    async fn vendor_profile(&self, vendor: VendorId) -> Result<Option<VendorProfile>, StoreError> {
        let url = format!(
            "{}/profiles?id=eq.{vendor}&select=id,role,payment_account_id,onboarding_completed,business_name",
            self.rest_base
        );
        let response = Self::check(self.client.get(&url).send().await?).await?;
        let mut rows: Vec<VendorProfile> = response
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))?;
        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.swap_remove(0))
        })
    }

    #[instrument(skip(self, account))]
    async fn set_payment_account(
        &self,
        vendor: VendorId,
        account: &PaymentAccountId,
    ) -> Result<(), StoreError> {
        let url = format!("{}/profiles?id=eq.{vendor}", self.rest_base);
        let response = self
            .client
            .patch(&url)
            .header("Prefer", "return=minimal")
            .json(&serde_json::json!({ "payment_account_id": account }))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    #[instrument(skip(self, order))]
    async fn insert_order(&self, order: &NewOrder) -> Result<OrderRecord, StoreError> {
        let url = format!("{}/orders", self.rest_base);
        let response = self
            .client
            .post(&url)
            .header("Prefer", "return=representation")
            .json(&[order])
            .send()
            .await?;
        let response = Self::check(response).await?;
        let mut rows: Vec<OrderRecord> = response
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))?;
        if rows.is_empty() {
            return Err(StoreError::Parse(
                "insert returned no representation".to_string(),
            ));
        }
        Ok(rows.swap_remove(0))
    }

    #[instrument(skip(self, lines), fields(count = lines.len()))]
    async fn insert_order_lines(&self, lines: &[NewOrderLine]) -> Result<(), StoreError> {
        let url = format!("{}/order_items", self.rest_base);
        let response = self
            .client
            .post(&url)
            .header("Prefer", "return=minimal")
            .json(&lines)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn promoted_listings(&self) -> Result<Vec<PromotedListing>, StoreError> {
        let url = format!(
            "{}/products?promoted=eq.true&select=id,name,description,price,image_url,vendor_id,vendor:profiles(business_name)",
            self.rest_base
        );
        let response = Self::check(self.client.get(&url).send().await?).await?;
        let rows: Vec<ListingRow> = response
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))?;
        Ok(rows.into_iter().map(ListingRow::into_listing).collect())
    }
}

// =============================================================================
// Wire types
// =============================================================================

/// A product row with its embedded vendor join, as the store returns it.
#[derive(Debug, Deserialize)]
struct ListingRow {
    id: vendora_core::ProductId,
    name: String,
    #[serde(default)]
    description: Option<String>,
    price: rust_decimal::Decimal,
    #[serde(default)]
    image_url: Option<String>,
    vendor_id: VendorId,
    #[serde(default)]
    vendor: Option<VendorJoin>,
}

#[derive(Debug, Deserialize)]
struct VendorJoin {
    #[serde(default)]
    business_name: Option<String>,
}

impl ListingRow {
    fn into_listing(self) -> PromotedListing {
        PromotedListing {
            id: self.id,
            name: self.name,
            description: self.description,
            price: self.price,
            image_url: self.image_url,
            vendor_id: self.vendor_id,
            business_name: self.vendor.and_then(|v| v.business_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_row_flattens_vendor_join() {
        let json = format!(
            r#"{{"id":"{}","name":"Mug","price":"12.00","vendor_id":"{}","vendor":{{"business_name":"Clay & Co"}}}}"#,
            vendora_core::ProductId::generate(),
            VendorId::generate(),
        );
        let row: ListingRow = serde_json::from_str(&json).expect("parses");
        let listing = row.into_listing();
        assert_eq!(listing.business_name.as_deref(), Some("Clay & Co"));
        assert_eq!(listing.description, None);
    }

    #[test]
    fn listing_row_tolerates_missing_vendor() {
        let json = format!(
            r#"{{"id":"{}","name":"Mug","price":"12.00","vendor_id":"{}"}}"#,
            vendora_core::ProductId::generate(),
            VendorId::generate(),
        );
        let row: ListingRow = serde_json::from_str(&json).expect("parses");
        assert_eq!(row.into_listing().business_name, None);
    }
}
