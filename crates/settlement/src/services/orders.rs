//! Order commit workflow: persist an order strictly after payment success.
//!
//! Payment has already succeeded at the provider before this code runs. The
//! two inserts below can still fail, which makes payment state and
//! order-record state diverge; the job here is to make that divergence
//! detectable (an `inconsistent_state` error carrying the payment intent
//! id), never to pretend it cannot happen. The payment itself is never
//! retried or touched.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{error, info};

use vendora_core::{BuyerId, CartLine, NewOrder, NewOrderLine, OrderId, OrderStatus, PaymentIntentId};

use crate::error::{AppError, Result};
use crate::store::MarketStore;

/// A commit request: the postcondition of external payment confirmation.
#[derive(Debug, Clone)]
pub struct CommitOrderRequest {
    pub buyer_id: BuyerId,
    /// The confirmed authorization, kept for reconciliation if the write fails.
    pub payment_intent_id: PaymentIntentId,
    pub total_price: Decimal,
    pub lines: Vec<CartLine>,
}

/// Proof that the order was fully recorded. `clear_cart` is the client's
/// signal that local cart state may now be dropped; it is never produced on
/// a failed commit, so the buyer keeps seeing their items and can escalate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderReceipt {
    pub order_id: OrderId,
    pub status: OrderStatus,
    pub clear_cart: bool,
}

/// Persists orders after payment confirmation.
pub struct OrderService<'a> {
    store: &'a dyn MarketStore,
}

impl<'a> OrderService<'a> {
    /// Create an order service.
    #[must_use]
    pub const fn new(store: &'a dyn MarketStore) -> Self {
        Self { store }
    }

    /// Commit one paid order: insert the order row, then one line per cart
    /// line carrying its already-captured `price_at_purchase`. Strictly
    /// ordered; not reorderable.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] for an empty line set or a non-positive total
    /// - [`AppError::InconsistentState`] when either insert fails - payment
    ///   already succeeded, so the error names the divergence and carries
    ///   the payment intent id for manual recovery
    pub async fn commit(&self, request: CommitOrderRequest) -> Result<OrderReceipt> {
        if request.lines.is_empty() {
            return Err(AppError::Validation(
                "order must contain at least one line".to_string(),
            ));
        }
        if request.total_price <= Decimal::ZERO {
            return Err(AppError::Validation(
                "order total must be greater than 0".to_string(),
            ));
        }

        let order = self
            .store
            .insert_order(&NewOrder {
                buyer_id: request.buyer_id,
                total_price: request.total_price,
                status: OrderStatus::Paid,
            })
            .await
            .map_err(|source| {
                error!(
                    buyer = %request.buyer_id,
                    payment_intent = %request.payment_intent_id,
                    "order insert failed after successful payment"
                );
                AppError::InconsistentState {
                    payment_intent: request.payment_intent_id.clone(),
                    source,
                }
            })?;

        let lines: Vec<NewOrderLine> = request
            .lines
            .iter()
            .map(|line| NewOrderLine {
                order_id: order.id,
                product_id: line.product_id,
                quantity: line.quantity,
                price_at_purchase: line.price_at_purchase,
            })
            .collect();

        self.store
            .insert_order_lines(&lines)
            .await
            .map_err(|source| {
                error!(
                    order = %order.id,
                    payment_intent = %request.payment_intent_id,
                    "order line insert failed after order row was created"
                );
                AppError::InconsistentState {
                    payment_intent: request.payment_intent_id.clone(),
                    source,
                }
            })?;

        info!(
            order = %order.id,
            buyer = %request.buyer_id,
            lines = lines.len(),
            "order committed"
        );

        Ok(OrderReceipt {
            order_id: order.id,
            status: order.status,
            clear_cart: true,
        })
    }
}
