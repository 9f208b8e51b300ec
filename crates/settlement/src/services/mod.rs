//! The settlement core's five services.
//!
//! Each service is a stateless request-scoped object borrowing its
//! collaborators; every invocation reads/writes external state and returns a
//! response or a structured [`crate::error::AppError`]. There is no
//! in-process long-lived state and no retry policy anywhere in this layer -
//! retries of payment-affecting calls are explicitly avoided to prevent
//! duplicate charge risk.

pub mod account;
pub mod feed;
pub mod onboarding;
pub mod orders;
pub mod payment;

#[cfg(test)]
pub(crate) mod testing;
