//! Core types for Vendora.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod account;
pub mod id;
pub mod money;
pub mod order;

pub use account::{AccountRole, VendorProfile};
pub use id::*;
pub use money::{FeeRate, FeeRateError, FeeSplit, MinorUnits, MoneyError};
pub use order::{CartLine, NewOrder, NewOrderLine, OrderRecord, OrderStatus, PromotedListing};
