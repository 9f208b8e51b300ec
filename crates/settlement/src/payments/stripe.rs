//! Stripe API client implementation.
//!
//! Talks to the provider's form-encoded REST API with `reqwest`. The API
//! base is configurable so tests can point the client at a stub server.

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Deserialize;
use tracing::{debug, instrument};

use vendora_core::{PaymentAccountId, PaymentIntentId};

use crate::config::StripeConfig;

use super::{ChargeSpec, ConnectedAccount, OnboardingLink, PaymentError, PaymentIntent, PaymentProvider};

/// Pinned provider API version, sent on every request.
const STRIPE_VERSION: &str = "2023-10-16";

/// Client for the Stripe REST API.
#[derive(Clone)]
pub struct StripeClient {
    client: reqwest::Client,
    api_base: String,
    secret_key: String,
}

impl StripeClient {
    /// Create a new Stripe API client.
    #[must_use]
    pub fn new(config: &StripeConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            secret_key: config.secret_key.expose_secret().to_string(),
        }
    }

    /// POST a form-encoded request and decode the JSON response, converting
    /// provider rejections into [`PaymentError::Api`].
    async fn post_form<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        form: &[(&str, &str)],
        idempotency_key: Option<&str>,
    ) -> Result<T, PaymentError> {
        let url = format!("{}{path}", self.api_base);
        let mut request = self
            .client
            .post(&url)
            .bearer_auth(&self.secret_key)
            .header("Stripe-Version", STRIPE_VERSION)
            .form(form);

        if let Some(key) = idempotency_key {
            request = request.header("Idempotency-Key", key);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let envelope: ErrorEnvelope = response.json().await.unwrap_or_default();
            return Err(PaymentError::Api {
                message: envelope.error.message.unwrap_or_else(|| "unknown provider error".to_string()),
                code: envelope.error.code.unwrap_or_else(|| "unknown".to_string()),
                kind: envelope.error.kind.unwrap_or_else(|| "unknown".to_string()),
                status: status.as_u16(),
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl PaymentProvider for StripeClient {
    #[instrument(skip(self))]
    async fn create_express_account(&self) -> Result<ConnectedAccount, PaymentError> {
        let body: AccountResponse = self
            .post_form(
                "/v1/accounts",
                &[
                    ("type", "express"),
                    ("capabilities[card_payments][requested]", "true"),
                    ("capabilities[transfers][requested]", "true"),
                ],
                None,
            )
            .await?;

        debug!(account = %body.id, "created express sub-account");
        Ok(ConnectedAccount {
            id: PaymentAccountId::new(body.id),
        })
    }

    #[instrument(skip(self, refresh_url, return_url))]
    async fn create_onboarding_link(
        &self,
        account: &PaymentAccountId,
        refresh_url: &str,
        return_url: &str,
    ) -> Result<OnboardingLink, PaymentError> {
        let body: LinkResponse = self
            .post_form(
                "/v1/account_links",
                &[
                    ("account", account.as_str()),
                    ("refresh_url", refresh_url),
                    ("return_url", return_url),
                    ("type", "account_onboarding"),
                ],
                None,
            )
            .await?;

        Ok(OnboardingLink { url: body.url })
    }

    #[instrument(skip(self, spec, idempotency_key), fields(vendor = %spec.vendor_id))]
    async fn create_payment_intent(
        &self,
        spec: &ChargeSpec,
        idempotency_key: Option<&str>,
    ) -> Result<PaymentIntent, PaymentError> {
        let amount = spec.amount.to_string();
        let fee = spec.platform_fee.to_string();
        let vendor_id = spec.vendor_id.to_string();

        let body: IntentResponse = self
            .post_form(
                "/v1/payment_intents",
                &[
                    ("amount", amount.as_str()),
                    ("currency", "usd"),
                    ("application_fee_amount", fee.as_str()),
                    ("transfer_data[destination]", spec.destination.as_str()),
                    ("metadata[vendor_id]", vendor_id.as_str()),
                ],
                idempotency_key,
            )
            .await?;

        let client_secret = body
            .client_secret
            .ok_or(PaymentError::MalformedResponse("client_secret"))?;

        debug!(intent = %body.id, "created payment intent");
        Ok(PaymentIntent {
            id: PaymentIntentId::new(body.id),
            client_secret,
        })
    }
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Deserialize)]
struct AccountResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct LinkResponse {
    url: String,
}

#[derive(Debug, Deserialize)]
struct IntentResponse {
    id: String,
    client_secret: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: ErrorBody,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    code: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_envelope_parses_provider_rejection() {
        let json = r#"{"error":{"message":"No such destination","code":"account_invalid","type":"invalid_request_error"}}"#;
        let envelope: ErrorEnvelope = serde_json::from_str(json).expect("parses");
        assert_eq!(envelope.error.message.as_deref(), Some("No such destination"));
        assert_eq!(envelope.error.code.as_deref(), Some("account_invalid"));
        assert_eq!(envelope.error.kind.as_deref(), Some("invalid_request_error"));
    }

    #[test]
    fn error_envelope_tolerates_empty_body() {
        let envelope: ErrorEnvelope = serde_json::from_str("{}").expect("parses");
        assert_eq!(envelope.error.message, None);
    }

    #[test]
    fn intent_response_without_secret_is_detectable() {
        let json = r#"{"id":"pi_123"}"#;
        let body: IntentResponse = serde_json::from_str(json).expect("parses");
        assert!(body.client_secret.is_none());
    }
}
