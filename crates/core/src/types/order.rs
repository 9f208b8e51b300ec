//! Order, cart-line, and listing record shapes.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{BuyerId, OrderId, ProductId, VendorId};

/// Order lifecycle status.
///
/// Orders are created directly in `Paid`: the row only ever exists after the
/// external payment confirmation succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Paid,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Paid => write!(f, "paid"),
            Self::Processing => write!(f, "processing"),
            Self::Shipped => write!(f, "shipped"),
            Self::Delivered => write!(f, "delivered"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// One line of a buyer's cart at checkout time.
///
/// Cart state is client-held and ephemeral; the settlement service only ever
/// sees it inside a commit request. `price_at_purchase` is the unit price
/// snapshot captured when the line entered the cart - it is never re-read
/// from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub vendor_id: VendorId,
    pub quantity: u32,
    pub price_at_purchase: Decimal,
}

/// Payload for inserting an order row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewOrder {
    pub buyer_id: BuyerId,
    pub total_price: Decimal,
    pub status: OrderStatus,
}

/// An order row as returned by the store after insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: OrderId,
    pub buyer_id: BuyerId,
    pub total_price: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// Payload for inserting one order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewOrderLine {
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub price_at_purchase: Decimal,
}

/// A promotion-flagged listing joined with its vendor's display name,
/// as exported into the merchant feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotedListing {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub image_url: Option<String>,
    pub vendor_id: VendorId,
    #[serde(default)]
    pub business_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Paid).expect("serializes"),
            "\"paid\""
        );
        assert_eq!(OrderStatus::default(), OrderStatus::Paid);
    }

    #[test]
    fn cart_line_round_trips() {
        let line = CartLine {
            product_id: ProductId::generate(),
            vendor_id: VendorId::generate(),
            quantity: 3,
            price_at_purchase: dec!(12.50),
        };
        let json = serde_json::to_string(&line).expect("serializes");
        let back: CartLine = serde_json::from_str(&json).expect("parses");
        assert_eq!(line, back);
    }
}
