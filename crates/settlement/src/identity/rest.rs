//! Identity provider REST client (GoTrue dialect).

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::ExposeSecret;
use serde::Deserialize;
use tracing::instrument;

use vendora_core::IdentityUserId;

use crate::config::StoreConfig;

use super::{AuthUser, IdentityError, IdentityProvider};

/// Client for the hosted identity provider's auth API.
///
/// Token verification uses the caller's own bearer token; administrative
/// deletion authenticates with the service-role key.
#[derive(Clone)]
pub struct RestIdentityClient {
    client: reqwest::Client,
    auth_base: String,
    service_key: String,
}

impl RestIdentityClient {
    /// Create a new identity client.
    #[must_use]
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            auth_base: format!("{}/auth/v1", config.url.trim_end_matches('/')),
            service_key: config.service_key.expose_secret().to_string(),
        }
    }
}

#[async_trait]
impl IdentityProvider for RestIdentityClient {
    #[instrument(skip(self, bearer_token))]
    async fn resolve_token(&self, bearer_token: &str) -> Result<AuthUser, IdentityError> {
        let url = format!("{}/user", self.auth_base);
        let response = self
            .client
            .get(&url)
            .bearer_auth(bearer_token)
            .header("apikey", &self.service_key)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(IdentityError::InvalidToken);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(IdentityError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: UserResponse = response
            .json()
            .await
            .map_err(|e| IdentityError::Parse(e.to_string()))?;
        match body.id {
            Some(id) if !id.is_empty() => Ok(AuthUser {
                id: IdentityUserId::new(id),
            }),
            _ => Err(IdentityError::InvalidToken),
        }
    }

    #[instrument(skip(self))]
    async fn delete_user(&self, user: &IdentityUserId) -> Result<(), IdentityError> {
        let url = format!("{}/admin/users/{}", self.auth_base, user);
        let response = self
            .client
            .delete(&url)
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(IdentityError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    #[serde(default)]
    id: Option<String>,
}
