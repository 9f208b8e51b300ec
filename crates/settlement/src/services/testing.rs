//! In-process collaborator doubles for service and router tests.
//!
//! Each mock records its calls so tests can assert call counts - several
//! correctness properties here are of the form "this collaborator was never
//! reached".

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;

use vendora_core::{
    AccountRole, IdentityUserId, NewOrder, NewOrderLine, OrderId, OrderRecord, PaymentAccountId,
    PaymentIntentId, PromotedListing, VendorId, VendorProfile,
};

use crate::identity::{AuthUser, IdentityError, IdentityProvider};
use crate::payments::{
    ChargeSpec, ConnectedAccount, OnboardingLink, PaymentError, PaymentIntent, PaymentProvider,
};
use crate::store::{MarketStore, StoreError};

// =============================================================================
// MockStore
// =============================================================================

#[derive(Default)]
pub struct MockStore {
    vendors: Mutex<HashMap<VendorId, VendorProfile>>,
    orders: Mutex<Vec<OrderRecord>>,
    order_lines: Mutex<Vec<NewOrderLine>>,
    listings: Mutex<Vec<PromotedListing>>,
    profile_lookups: AtomicUsize,
    order_insert_fails: AtomicBool,
    line_insert_fails: AtomicBool,
    listing_query_fails: AtomicBool,
}

impl MockStore {
    /// Register a vendor, optionally already connected to payments.
    pub fn add_vendor(&self, payment_account: Option<&str>) -> VendorId {
        let id = VendorId::generate();
        let profile = VendorProfile {
            id,
            role: AccountRole::Vendor,
            payment_account_id: payment_account.map(PaymentAccountId::new),
            onboarding_completed: payment_account.map(|_| true),
            business_name: None,
        };
        self.vendors
            .lock()
            .expect("mutex poisoned")
            .insert(id, profile);
        id
    }

    pub fn add_listing(&self, listing: PromotedListing) {
        self.listings.lock().expect("mutex poisoned").push(listing);
    }

    pub fn payment_account_for(&self, vendor: VendorId) -> Option<String> {
        self.vendors
            .lock()
            .expect("mutex poisoned")
            .get(&vendor)
            .and_then(|p| p.payment_account_id.as_ref().map(|a| a.as_str().to_string()))
    }

    pub fn orders(&self) -> Vec<OrderRecord> {
        self.orders.lock().expect("mutex poisoned").clone()
    }

    pub fn order_lines(&self) -> Vec<NewOrderLine> {
        self.order_lines.lock().expect("mutex poisoned").clone()
    }

    pub fn profile_lookups(&self) -> usize {
        self.profile_lookups.load(Ordering::SeqCst)
    }

    pub fn fail_order_insert(&self) {
        self.order_insert_fails.store(true, Ordering::SeqCst);
    }

    pub fn fail_line_insert(&self) {
        self.line_insert_fails.store(true, Ordering::SeqCst);
    }

    pub fn fail_listings(&self) {
        self.listing_query_fails.store(true, Ordering::SeqCst);
    }

    fn outage() -> StoreError {
        StoreError::Api {
            status: 503,
            message: "service unavailable".to_string(),
        }
    }
}

#[async_trait]
impl MarketStore for MockStore {
    async fn vendor_profile(&self, vendor: VendorId) -> Result<Option<VendorProfile>, StoreError> {
        self.profile_lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .vendors
            .lock()
            .expect("mutex poisoned")
            .get(&vendor)
            .cloned())
    }

    async fn set_payment_account(
        &self,
        vendor: VendorId,
        account: &PaymentAccountId,
    ) -> Result<(), StoreError> {
        if let Some(profile) = self
            .vendors
            .lock()
            .expect("mutex poisoned")
            .get_mut(&vendor)
        {
            profile.payment_account_id = Some(account.clone());
        }
        Ok(())
    }

    async fn insert_order(&self, order: &NewOrder) -> Result<OrderRecord, StoreError> {
        if self.order_insert_fails.load(Ordering::SeqCst) {
            return Err(Self::outage());
        }
        let record = OrderRecord {
            id: OrderId::generate(),
            buyer_id: order.buyer_id,
            total_price: order.total_price,
            status: order.status,
            created_at: Utc::now(),
        };
        self.orders
            .lock()
            .expect("mutex poisoned")
            .push(record.clone());
        Ok(record)
    }

    async fn insert_order_lines(&self, lines: &[NewOrderLine]) -> Result<(), StoreError> {
        if self.line_insert_fails.load(Ordering::SeqCst) {
            return Err(Self::outage());
        }
        self.order_lines
            .lock()
            .expect("mutex poisoned")
            .extend_from_slice(lines);
        Ok(())
    }

    async fn promoted_listings(&self) -> Result<Vec<PromotedListing>, StoreError> {
        if self.listing_query_fails.load(Ordering::SeqCst) {
            return Err(StoreError::Api {
                status: 500,
                message: "failed to fetch products".to_string(),
            });
        }
        Ok(self.listings.lock().expect("mutex poisoned").clone())
    }
}

// =============================================================================
// MockPayments
// =============================================================================

#[derive(Default)]
pub struct MockPayments {
    account_calls: AtomicUsize,
    intent_calls: AtomicUsize,
    last_account: Mutex<Option<String>>,
    last_link_urls: Mutex<Option<(String, String)>>,
    last_spec: Mutex<Option<ChargeSpec>>,
    last_idempotency_key: Mutex<Option<String>>,
    intent_failure: Mutex<Option<(String, String)>>,
    link_failure: Mutex<Option<(String, String)>>,
}

impl MockPayments {
    pub fn account_calls(&self) -> usize {
        self.account_calls.load(Ordering::SeqCst)
    }

    pub fn intent_calls(&self) -> usize {
        self.intent_calls.load(Ordering::SeqCst)
    }

    pub fn last_created_account(&self) -> Option<String> {
        self.last_account.lock().expect("mutex poisoned").clone()
    }

    pub fn last_link_urls(&self) -> Option<(String, String)> {
        self.last_link_urls.lock().expect("mutex poisoned").clone()
    }

    pub fn last_charge_spec(&self) -> Option<ChargeSpec> {
        self.last_spec.lock().expect("mutex poisoned").clone()
    }

    pub fn last_idempotency_key(&self) -> Option<String> {
        self.last_idempotency_key
            .lock()
            .expect("mutex poisoned")
            .clone()
    }

    pub fn fail_intents_with(&self, message: &str, code: &str) {
        *self.intent_failure.lock().expect("mutex poisoned") =
            Some((message.to_string(), code.to_string()));
    }

    pub fn fail_links_with(&self, message: &str, code: &str) {
        *self.link_failure.lock().expect("mutex poisoned") =
            Some((message.to_string(), code.to_string()));
    }

    fn rejection(message: String, code: String) -> PaymentError {
        PaymentError::Api {
            message,
            code,
            kind: "invalid_request_error".to_string(),
            status: 400,
        }
    }
}

#[async_trait]
impl PaymentProvider for MockPayments {
    async fn create_express_account(&self) -> Result<ConnectedAccount, PaymentError> {
        let n = self.account_calls.fetch_add(1, Ordering::SeqCst) + 1;
        let id = format!("acct_test_{n}");
        *self.last_account.lock().expect("mutex poisoned") = Some(id.clone());
        Ok(ConnectedAccount {
            id: PaymentAccountId::new(id),
        })
    }

    async fn create_onboarding_link(
        &self,
        account: &PaymentAccountId,
        refresh_url: &str,
        return_url: &str,
    ) -> Result<OnboardingLink, PaymentError> {
        if let Some((message, code)) = self.link_failure.lock().expect("mutex poisoned").clone() {
            return Err(Self::rejection(message, code));
        }
        *self.last_link_urls.lock().expect("mutex poisoned") =
            Some((refresh_url.to_string(), return_url.to_string()));
        Ok(OnboardingLink {
            url: format!("https://connect.stripe.test/setup/{account}"),
        })
    }

    async fn create_payment_intent(
        &self,
        spec: &ChargeSpec,
        idempotency_key: Option<&str>,
    ) -> Result<PaymentIntent, PaymentError> {
        let n = self.intent_calls.fetch_add(1, Ordering::SeqCst) + 1;
        *self.last_spec.lock().expect("mutex poisoned") = Some(spec.clone());
        *self.last_idempotency_key.lock().expect("mutex poisoned") =
            idempotency_key.map(String::from);
        if let Some((message, code)) = self.intent_failure.lock().expect("mutex poisoned").clone() {
            return Err(Self::rejection(message, code));
        }
        Ok(PaymentIntent {
            id: PaymentIntentId::new(format!("pi_test_{n}")),
            client_secret: format!("pi_test_{n}_secret_abc"),
        })
    }
}

// =============================================================================
// MockIdentity
// =============================================================================

#[derive(Default)]
pub struct MockIdentity {
    tokens: Mutex<HashMap<String, String>>,
    deleted: Mutex<Vec<String>>,
    delete_failure: Mutex<Option<(u16, String)>>,
}

impl MockIdentity {
    /// Make `token` resolve to `user_id`.
    pub fn grant(&self, token: &str, user_id: &str) {
        self.tokens
            .lock()
            .expect("mutex poisoned")
            .insert(token.to_string(), user_id.to_string());
    }

    pub fn deleted_users(&self) -> Vec<String> {
        self.deleted.lock().expect("mutex poisoned").clone()
    }

    pub fn fail_deletes_with(&self, status: u16, message: &str) {
        *self.delete_failure.lock().expect("mutex poisoned") =
            Some((status, message.to_string()));
    }
}

#[async_trait]
impl IdentityProvider for MockIdentity {
    async fn resolve_token(&self, bearer_token: &str) -> Result<AuthUser, IdentityError> {
        self.tokens
            .lock()
            .expect("mutex poisoned")
            .get(bearer_token)
            .map(|id| AuthUser {
                id: IdentityUserId::new(id.clone()),
            })
            .ok_or(IdentityError::InvalidToken)
    }

    async fn delete_user(&self, user: &IdentityUserId) -> Result<(), IdentityError> {
        if let Some((status, message)) = self.delete_failure.lock().expect("mutex poisoned").clone()
        {
            return Err(IdentityError::Api { status, message });
        }
        self.deleted
            .lock()
            .expect("mutex poisoned")
            .push(user.as_str().to_string());
        Ok(())
    }
}
