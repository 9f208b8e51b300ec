//! Payment intent service: compute a split charge for a cart total.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use vendora_core::{FeeRate, MinorUnits, VendorId};

use crate::error::{AppError, Result};
use crate::payments::{ChargeSpec, PaymentProvider};
use crate::store::MarketStore;

/// A payment authorization ready for client-side confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntentReceipt {
    /// Opaque token the buyer's browser uses to complete payment.
    pub client_secret: String,
    /// Charged total in minor units.
    pub amount: MinorUnits,
    /// Platform's retained fee in minor units.
    pub platform_fee: MinorUnits,
}

/// Computes split payment authorizations.
pub struct PaymentService<'a> {
    store: &'a dyn MarketStore,
    payments: &'a dyn PaymentProvider,
    fee_rate: FeeRate,
}

impl<'a> PaymentService<'a> {
    /// Create a payment service.
    #[must_use]
    pub const fn new(
        store: &'a dyn MarketStore,
        payments: &'a dyn PaymentProvider,
        fee_rate: FeeRate,
    ) -> Self {
        Self {
            store,
            payments,
            fee_rate,
        }
    }

    /// Create a split payment authorization for `amount` routed to
    /// `vendor_id`, retaining the platform fee.
    ///
    /// Validation happens before any collaborator call: a non-positive
    /// amount never reaches the store, and a vendor without a payment
    /// sub-account never reaches the provider. The provider call is made at
    /// most once; an optional caller-supplied idempotency key makes client
    /// retries safe.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] for a non-positive amount
    /// - [`AppError::NotFound`] for an unknown vendor
    /// - [`AppError::VendorNotConnected`] when onboarding never completed
    /// - [`AppError::Payment`] / [`AppError::Store`] for collaborator failures
    pub async fn create_intent(
        &self,
        amount: Decimal,
        vendor_id: VendorId,
        idempotency_key: Option<&str>,
    ) -> Result<IntentReceipt> {
        let amount_minor =
            MinorUnits::from_decimal(amount).map_err(|e| AppError::Validation(e.to_string()))?;

        let profile = self
            .store
            .vendor_profile(vendor_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("vendor {vendor_id}")))?;

        let destination = profile
            .payment_account_id
            .ok_or(AppError::VendorNotConnected(vendor_id))?;

        let split = amount_minor.split(self.fee_rate);
        let spec = ChargeSpec {
            amount: split.total,
            platform_fee: split.platform_fee,
            destination,
            vendor_id,
        };

        let intent = self
            .payments
            .create_payment_intent(&spec, idempotency_key)
            .await?;

        info!(
            vendor = %vendor_id,
            amount = %split.total,
            platform_fee = %split.platform_fee,
            vendor_share = %split.vendor_share,
            intent = %intent.id,
            "payment intent created"
        );

        Ok(IntentReceipt {
            client_secret: intent.client_secret,
            amount: split.total,
            platform_fee: split.platform_fee,
        })
    }
}
