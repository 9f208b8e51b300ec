//! Account provisioning service: vendor onboarding to the payment provider.

use serde::Serialize;
use tracing::{info, warn};

use vendora_core::{PaymentAccountId, VendorId};

use crate::error::{AppError, Result};
use crate::payments::PaymentProvider;
use crate::store::MarketStore;

/// The onboarding URL the vendor's browser is redirected to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OnboardingRedirect {
    pub url: String,
}

/// Onboards vendors as payment sub-accounts.
pub struct OnboardingService<'a> {
    store: &'a dyn MarketStore,
    payments: &'a dyn PaymentProvider,
}

impl<'a> OnboardingService<'a> {
    /// Create an onboarding service.
    #[must_use]
    pub const fn new(store: &'a dyn MarketStore, payments: &'a dyn PaymentProvider) -> Self {
        Self { store, payments }
    }

    /// Start (or resume) onboarding for a vendor and return the redirect URL.
    ///
    /// If the vendor already carries a sub-account id, that account is
    /// reused and a fresh onboarding link is created for it - re-invoking is
    /// safe and mints no duplicate sub-account. The sub-account id is NOT
    /// persisted here; persistence happens on the return leg via
    /// [`Self::complete`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown vendor and
    /// [`AppError::Payment`] when the provider rejects a call. A sub-account
    /// created just before a failed link creation is left orphaned at the
    /// provider; it is logged and reused on the next attempt.
    pub async fn start(&self, vendor_id: VendorId, origin: &str) -> Result<OnboardingRedirect> {
        let profile = self
            .store
            .vendor_profile(vendor_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("vendor {vendor_id}")))?;

        let account = match profile.payment_account_id {
            Some(existing) => {
                info!(vendor = %vendor_id, account = %existing, "reusing existing sub-account");
                existing
            }
            None => self.payments.create_express_account().await?.id,
        };

        let origin = origin.trim_end_matches('/');
        let refresh_url = format!("{origin}/dashboard");
        let return_url = format!("{origin}/stripe-return?account_id={account}");

        let link = self
            .payments
            .create_onboarding_link(&account, &refresh_url, &return_url)
            .await
            .map_err(|e| {
                warn!(
                    vendor = %vendor_id,
                    account = %account,
                    "onboarding link creation failed; sub-account left at provider"
                );
                AppError::Payment(e)
            })?;

        Ok(OnboardingRedirect { url: link.url })
    }

    /// The return leg: persist the sub-account id on the vendor's profile.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown vendor and
    /// [`AppError::Store`] when the write fails.
    pub async fn complete(&self, vendor_id: VendorId, account: PaymentAccountId) -> Result<()> {
        self.store
            .vendor_profile(vendor_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("vendor {vendor_id}")))?;

        self.store.set_payment_account(vendor_id, &account).await?;
        info!(vendor = %vendor_id, account = %account, "vendor connected to payments");
        Ok(())
    }
}
