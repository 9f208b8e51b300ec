//! Identity provider collaborator.
//!
//! Account deprovisioning must not trust a client-supplied user id: the
//! bearer token itself is resolved server-side against the identity
//! provider's own verification endpoint, and only the identity it resolves
//! to is ever deleted.

mod rest;

pub use rest::RestIdentityClient;

use async_trait::async_trait;
use thiserror::Error;

use vendora_core::IdentityUserId;

/// Errors that can occur when interacting with the identity provider.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The bearer token is invalid or expired.
    #[error("invalid or expired token")]
    InvalidToken,

    /// The provider rejected an administrative call.
    #[error("identity provider error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to decode a provider response.
    #[error("parse error: {0}")]
    Parse(String),
}

/// A verified user identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: IdentityUserId,
}

/// Identity provider operations used by the settlement core.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve a bearer token to the identity it belongs to. Invalid or
    /// expired tokens yield [`IdentityError::InvalidToken`].
    async fn resolve_token(&self, bearer_token: &str) -> Result<AuthUser, IdentityError>;

    /// Administratively delete an identity. Dependent rows (profile,
    /// products) cascade-delete on the store side and are never enumerated
    /// here.
    async fn delete_user(&self, user: &IdentityUserId) -> Result<(), IdentityError>;
}
