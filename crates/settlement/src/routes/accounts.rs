//! Vendor onboarding and account deprovisioning handlers.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::HeaderMap,
    http::header::AUTHORIZATION,
};
use serde::{Deserialize, Serialize};

use vendora_core::{PaymentAccountId, VendorId};

use crate::error::{AppError, Result};
use crate::services::account::AccountService;
use crate::services::onboarding::{OnboardingRedirect, OnboardingService};
use crate::state::AppState;

/// `POST /accounts/connect` request body.
#[derive(Debug, Deserialize)]
pub struct ConnectRequest {
    pub vendor_id: VendorId,
    /// Frontend origin for redirect URLs; defaults to the configured base URL.
    #[serde(default)]
    pub origin: Option<String>,
}

/// `POST /accounts/connect/complete` request body (the return leg).
#[derive(Debug, Deserialize)]
pub struct ConnectCompleteRequest {
    pub vendor_id: VendorId,
    pub account_id: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Start (or resume) vendor onboarding and return the redirect URL.
pub async fn connect(
    State(state): State<AppState>,
    body: std::result::Result<Json<ConnectRequest>, JsonRejection>,
) -> Result<Json<OnboardingRedirect>> {
    let Json(request) = body.map_err(|e| AppError::Validation(e.body_text()))?;
    let origin = request
        .origin
        .unwrap_or_else(|| state.config().base_url.clone());

    let redirect = OnboardingService::new(state.store(), state.payments())
        .start(request.vendor_id, &origin)
        .await?;
    Ok(Json(redirect))
}

/// Persist the sub-account id once the vendor returns from the provider.
pub async fn connect_complete(
    State(state): State<AppState>,
    body: std::result::Result<Json<ConnectCompleteRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let Json(request) = body.map_err(|e| AppError::Validation(e.body_text()))?;

    OnboardingService::new(state.store(), state.payments())
        .complete(request.vendor_id, PaymentAccountId::new(request.account_id))
        .await?;
    Ok(Json(MessageResponse {
        message: "Vendor connected to payments".to_string(),
    }))
}

/// Irreversibly delete the calling account. The bearer token is verified
/// server-side; the UI layer has already collected the caller's explicit
/// confirmation.
pub async fn delete(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<MessageResponse>> {
    let token = bearer_token(&headers)?;

    AccountService::new(state.identity()).delete(token).await?;
    Ok(Json(MessageResponse {
        message: "Account deleted successfully".to_string(),
    }))
}

/// Extract the JWT from an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Result<&str> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthenticated("missing authorization header".to_string()))?;

    header
        .strip_prefix("Bearer ")
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Unauthenticated("malformed authorization header".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer jwt-abc"));
        assert_eq!(bearer_token(&headers).expect("extracts"), "jwt-abc");
    }

    #[test]
    fn missing_or_malformed_header_is_unauthenticated() {
        let headers = HeaderMap::new();
        assert!(matches!(
            bearer_token(&headers),
            Err(AppError::Unauthenticated(_))
        ));

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcg=="));
        assert!(matches!(
            bearer_token(&headers),
            Err(AppError::Unauthenticated(_))
        ));

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert!(matches!(
            bearer_token(&headers),
            Err(AppError::Unauthenticated(_))
        ));
    }
}
