//! Account deprovisioning service.
//!
//! Deletion is irreversible. The caller's out-of-band confirmation happens
//! in the UI layer before this service is ever invoked; no second
//! confirmation is added here. The bearer credential itself is verified
//! against the identity provider - a client-supplied user id is never
//! trusted for an admin-level delete.

use serde::Serialize;
use tracing::info;

use vendora_core::IdentityUserId;

use crate::error::Result;
use crate::identity::IdentityProvider;

/// The identity that was removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletedAccount {
    pub user_id: IdentityUserId,
}

/// Deprovisions caller accounts.
pub struct AccountService<'a> {
    identity: &'a dyn IdentityProvider,
}

impl<'a> AccountService<'a> {
    /// Create an account service.
    #[must_use]
    pub const fn new(identity: &'a dyn IdentityProvider) -> Self {
        Self { identity }
    }

    /// Resolve the bearer token and delete exactly the identity it belongs
    /// to. Dependent rows cascade-delete on the store side.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::AppError::Unauthenticated`] for an invalid or
    /// expired token (no deletion is attempted), or the provider's error
    /// verbatim when the deletion itself fails.
    pub async fn delete(&self, bearer_token: &str) -> Result<DeletedAccount> {
        let user = self.identity.resolve_token(bearer_token).await?;

        self.identity.delete_user(&user.id).await?;
        info!(user = %user.id, "account deleted");

        Ok(DeletedAccount { user_id: user.id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::error::AppError;
    use crate::services::testing::MockIdentity;

    #[tokio::test]
    async fn deletes_exactly_the_resolved_identity() {
        let identity = MockIdentity::default();
        identity.grant("jwt-abc", "user-77");

        let deleted = AccountService::new(&identity)
            .delete("jwt-abc")
            .await
            .expect("deleted");

        assert_eq!(deleted.user_id.as_str(), "user-77");
        assert_eq!(identity.deleted_users(), vec!["user-77".to_string()]);
    }

    #[tokio::test]
    async fn invalid_token_triggers_zero_delete_calls() {
        let identity = MockIdentity::default();

        let err = AccountService::new(&identity)
            .delete("jwt-expired")
            .await
            .expect_err("must fail");

        assert!(matches!(err, AppError::Unauthenticated(_)));
        assert!(identity.deleted_users().is_empty());
    }

    #[tokio::test]
    async fn provider_delete_failure_is_surfaced() {
        let identity = MockIdentity::default();
        identity.grant("jwt-abc", "user-77");
        identity.fail_deletes_with(500, "database error deleting user");

        let err = AccountService::new(&identity)
            .delete("jwt-abc")
            .await
            .expect_err("must fail");

        assert!(err.to_string().contains("database error deleting user"));
    }
}
