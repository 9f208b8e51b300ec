//! Vendora Core - Shared types library.
//!
//! This crate provides the common types used across the Vendora marketplace
//! components, most importantly the settlement service.
//!
//! # Architecture
//!
//! The core crate contains only types and pure arithmetic - no I/O, no
//! database access, no HTTP clients. The split-payment fee computation lives
//! here so it can be tested exhaustively without any collaborator in sight.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, minor-unit money
//!   arithmetic, account roles, order statuses, and the record shapes
//!   exchanged with the relational store.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
