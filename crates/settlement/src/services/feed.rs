//! Promoted-listing feed generator.
//!
//! Full-batch, all-or-nothing CSV export for merchant-feed consumers. The
//! header row is emitted even when zero listings qualify; any store failure
//! aborts the whole generation.

use tracing::info;

use crate::error::{AppError, Result};
use crate::store::{MarketStore, StoreError};

/// Brand fallback when a vendor has no business name on file.
const DEFAULT_BRAND: &str = "Vendora";

/// Image fallback for listings without an uploaded image.
const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300";

/// Availability is a fixed literal; live stock levels are out of scope.
const AVAILABILITY: &str = "in stock";

const HEADER: [&str; 9] = [
    "id",
    "title",
    "description",
    "link",
    "image_link",
    "price",
    "availability",
    "brand",
    "custom_label_0",
];

/// Generates the promoted-listing merchant feed.
pub struct FeedService<'a> {
    store: &'a dyn MarketStore,
}

impl<'a> FeedService<'a> {
    /// Create a feed service.
    #[must_use]
    pub const fn new(store: &'a dyn MarketStore) -> Self {
        Self { store }
    }

    /// Export every promotion-flagged listing as CSV. `base_url` is the
    /// storefront origin used to build canonical product links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] if the query fails; no partial feed is
    /// ever emitted.
    pub async fn promoted_csv(&self, base_url: &str) -> Result<String> {
        let listings = self.store.promoted_listings().await?;
        let base_url = base_url.trim_end_matches('/');

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(HEADER)
            .map_err(|e| AppError::Store(StoreError::Parse(e.to_string())))?;

        let count = listings.len();
        for listing in listings {
            writer
                .write_record([
                    listing.id.to_string(),
                    listing.name,
                    listing.description.unwrap_or_default(),
                    format!("{base_url}/products/{}", listing.id),
                    listing
                        .image_url
                        .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
                    format!("{} USD", listing.price),
                    AVAILABILITY.to_string(),
                    listing
                        .business_name
                        .unwrap_or_else(|| DEFAULT_BRAND.to_string()),
                    listing.vendor_id.to_string(),
                ])
                .map_err(|e| AppError::Store(StoreError::Parse(e.to_string())))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| AppError::Store(StoreError::Parse(e.to_string())))?;
        let csv = String::from_utf8(bytes)
            .map_err(|e| AppError::Store(StoreError::Parse(e.to_string())))?;

        info!(listings = count, "promoted feed generated");
        Ok(csv)
    }
}
