//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::SettlementConfig;
use crate::identity::{IdentityProvider, RestIdentityClient};
use crate::payments::{PaymentProvider, StripeClient};
use crate::store::{MarketStore, RestStoreClient, StoreError};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Collaborators are held behind trait objects
/// so tests can swap in in-process doubles; production wiring happens in
/// [`AppState::from_config`].
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SettlementConfig,
    payments: Arc<dyn PaymentProvider>,
    store: Arc<dyn MarketStore>,
    identity: Arc<dyn IdentityProvider>,
}

impl AppState {
    /// Create application state from explicit collaborators.
    #[must_use]
    pub fn new(
        config: SettlementConfig,
        payments: Arc<dyn PaymentProvider>,
        store: Arc<dyn MarketStore>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                payments,
                store,
                identity,
            }),
        }
    }

    /// Create application state with the production collaborator clients.
    ///
    /// # Errors
    ///
    /// Returns an error if the store client cannot be constructed from the
    /// configured credentials.
    pub fn from_config(config: SettlementConfig) -> Result<Self, StoreError> {
        let payments = Arc::new(StripeClient::new(&config.stripe));
        let store = Arc::new(RestStoreClient::new(&config.store)?);
        let identity = Arc::new(RestIdentityClient::new(&config.store));
        Ok(Self::new(config, payments, store, identity))
    }

    /// Get a reference to the service configuration.
    #[must_use]
    pub fn config(&self) -> &SettlementConfig {
        &self.inner.config
    }

    /// Get a reference to the payment provider.
    #[must_use]
    pub fn payments(&self) -> &dyn PaymentProvider {
        self.inner.payments.as_ref()
    }

    /// Get a reference to the relational store.
    #[must_use]
    pub fn store(&self) -> &dyn MarketStore {
        self.inner.store.as_ref()
    }

    /// Get a reference to the identity provider.
    #[must_use]
    pub fn identity(&self) -> &dyn IdentityProvider {
        self.inner.identity.as_ref()
    }
}
