//! HTTP route handlers for the settlement service.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Health check
//!
//! # Vendor onboarding
//! POST /accounts/connect           - Create/resume onboarding, returns {url}
//! POST /accounts/connect/complete  - Return leg: persist the sub-account id
//!
//! # Checkout
//! POST /payments/intent            - Split payment authorization, returns {clientSecret}
//! POST /orders/commit              - Persist order after payment confirmation
//!
//! # Account
//! POST /accounts/delete            - Irreversible account deletion (Bearer token)
//!
//! # Feed
//! GET  /feed/promoted              - Promoted-listing CSV merchant feed
//! ```
//!
//! Every handler (success or failure) answers with permissive CORS headers;
//! `OPTIONS` preflight is handled by the CORS layer.

pub mod accounts;
pub mod feed;
pub mod orders;
pub mod payments;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Health check for load balancers.
async fn health() -> &'static str {
    "ok"
}

/// Permissive CORS: the settlement API is called from browser checkout pages
/// on arbitrary storefront origins, and the feed endpoint is fetched by
/// merchant-center crawlers.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/accounts/connect", post(accounts::connect))
        .route("/accounts/connect/complete", post(accounts::connect_complete))
        .route("/accounts/delete", post(accounts::delete))
        .route("/payments/intent", post(payments::create_intent))
        .route("/orders/commit", post(orders::commit))
        .route("/feed/promoted", get(feed::promoted))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
