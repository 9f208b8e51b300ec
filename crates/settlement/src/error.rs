//! Unified error handling with Sentry integration.
//!
//! Every handler returns `Result<T, AppError>`. Collaborator errors are
//! converted into the taxonomy below at the service boundary; nothing
//! propagates to a caller as an unstructured failure. Server-class errors
//! are captured to Sentry before the response is built.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use vendora_core::{PaymentIntentId, VendorId};

use crate::identity::IdentityError;
use crate::payments::PaymentError;
use crate::store::StoreError;

/// Application-level error type for the settlement service.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or missing input.
    #[error("{0}")]
    Validation(String),

    /// A referenced entity does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bearer token missing, invalid, or expired.
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// The single most important business-rule gate: an uncommissioned
    /// vendor must never receive a payment authorization.
    #[error("This vendor is not connected to payments and cannot receive payments.")]
    VendorNotConnected(VendorId),

    /// The payment provider rejected a call.
    #[error("Payment provider error: {0}")]
    Payment(#[from] PaymentError),

    /// A store read or write failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Payment succeeded but the order was not recorded. Carries the payment
    /// authorization id so a human or reconciliation job can recover the
    /// order manually.
    #[error("Payment succeeded, order not recorded (payment intent {payment_intent})")]
    InconsistentState {
        payment_intent: PaymentIntentId,
        #[source]
        source: StoreError,
    },
}

impl From<IdentityError> for AppError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::InvalidToken => {
                Self::Unauthenticated("invalid or expired token".to_string())
            }
            other => Self::Store(StoreError::Api {
                status: 500,
                message: other.to_string(),
            }),
        }
    }
}

/// JSON error body returned to clients.
#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    payment_intent: Option<PaymentIntentId>,
}

impl AppError {
    /// HTTP status for this error category.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::VendorNotConnected(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::Payment(_) | Self::Store(_) | Self::InconsistentState { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(
            self,
            Self::Payment(_) | Self::Store(_) | Self::InconsistentState { .. }
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let payment_intent = match &self {
            Self::InconsistentState { payment_intent, .. } => Some(payment_intent.clone()),
            _ => None,
        };

        let body = ErrorBody {
            message: self.to_string(),
            payment_intent,
        };

        (self.status(), Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
