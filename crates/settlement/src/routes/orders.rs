//! Order commit handler.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use rust_decimal::Decimal;
use serde::Deserialize;

use vendora_core::{BuyerId, CartLine, PaymentIntentId};

use crate::error::{AppError, Result};
use crate::services::orders::{CommitOrderRequest, OrderReceipt, OrderService};
use crate::state::AppState;

/// `POST /orders/commit` request body. Sent by the client after the payment
/// provider confirmed the charge; the payment intent id rides along so a
/// failed write stays recoverable.
#[derive(Debug, Deserialize)]
pub struct CommitRequest {
    pub buyer_id: BuyerId,
    pub payment_intent_id: PaymentIntentId,
    pub total: Decimal,
    pub lines: Vec<CartLine>,
}

/// Persist the order and its lines; on success the client may clear its
/// local cart.
pub async fn commit(
    State(state): State<AppState>,
    body: std::result::Result<Json<CommitRequest>, JsonRejection>,
) -> Result<Json<OrderReceipt>> {
    let Json(request) = body.map_err(|e| AppError::Validation(e.body_text()))?;

    let receipt = OrderService::new(state.store())
        .commit(CommitOrderRequest {
            buyer_id: request.buyer_id,
            payment_intent_id: request.payment_intent_id,
            total_price: request.total,
            lines: request.lines,
        })
        .await?;
    Ok(Json(receipt))
}
