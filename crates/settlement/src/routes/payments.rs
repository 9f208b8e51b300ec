//! Payment intent handler.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use vendora_core::{MinorUnits, VendorId};

use crate::error::{AppError, Result};
use crate::services::payment::PaymentService;
use crate::state::AppState;

/// `POST /payments/intent` request body.
#[derive(Debug, Deserialize)]
pub struct CreateIntentRequest {
    pub amount: Decimal,
    pub vendor_id: VendorId,
    /// Caller-supplied key making client retries safe against duplicate
    /// authorizations.
    #[serde(default)]
    pub idempotency_key: Option<String>,
}

/// Wire response, field names kept compatible with the frontend contract.
#[derive(Debug, Serialize)]
pub struct CreateIntentResponse {
    #[serde(rename = "clientSecret")]
    pub client_secret: String,
    pub amount: MinorUnits,
    #[serde(rename = "platformFee")]
    pub platform_fee: MinorUnits,
}

/// Compute a split charge and return the client secret for browser-side
/// confirmation.
pub async fn create_intent(
    State(state): State<AppState>,
    body: std::result::Result<Json<CreateIntentRequest>, JsonRejection>,
) -> Result<Json<CreateIntentResponse>> {
    let Json(request) = body.map_err(|e| AppError::Validation(e.body_text()))?;

    let receipt = PaymentService::new(
        state.store(),
        state.payments(),
        state.config().platform_fee_rate,
    )
    .create_intent(
        request.amount,
        request.vendor_id,
        request.idempotency_key.as_deref(),
    )
    .await?;

    Ok(Json(CreateIntentResponse {
        client_secret: receipt.client_secret,
        amount: receipt.amount,
        platform_fee: receipt.platform_fee,
    }))
}
