//! Settlement service configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SETTLEMENT_BASE_URL` - Public URL of the marketplace frontend, used as
//!   the default origin for onboarding redirect links
//! - `STRIPE_SECRET_KEY` - Platform-level payment provider secret key
//! - `STORE_URL` - Base URL of the hosted store (also serves the identity API)
//! - `STORE_SERVICE_KEY` - Service-role key for admin-level store access
//!
//! ## Optional
//! - `SETTLEMENT_HOST` - Bind address (default: 127.0.0.1)
//! - `SETTLEMENT_PORT` - Listen port (default: 8787)
//! - `STRIPE_API_BASE` - Payment provider API base (default: `https://api.stripe.com`)
//! - `PLATFORM_FEE_RATE` - Fraction retained on every split payment (default: 0.10)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};

use rust_decimal::Decimal;
use secrecy::SecretString;
use thiserror::Error;

use vendora_core::{FeeRate, FeeRateError};

/// Blocklist of common placeholder patterns (case-insensitive). Secret keys
/// accidentally left at their template value must fail fast at startup.
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "fixme",
    "insert",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
    #[error("Invalid platform fee rate: {0}")]
    InvalidFeeRate(#[from] FeeRateError),
}

/// Settlement service configuration.
#[derive(Clone)]
pub struct SettlementConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public frontend URL, the default origin for onboarding redirects
    pub base_url: String,
    /// Payment provider configuration
    pub stripe: StripeConfig,
    /// Hosted store (and identity provider) configuration
    pub store: StoreConfig,
    /// Fraction of every charge retained by the platform
    pub platform_fee_rate: FeeRate,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Payment provider API configuration.
///
/// Implements `Debug` manually to redact the secret key.
#[derive(Clone)]
pub struct StripeConfig {
    /// API base URL; overridable so tests can point at a stub server
    pub api_base: String,
    /// Platform-level secret key
    pub secret_key: SecretString,
}

impl std::fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeConfig")
            .field("api_base", &self.api_base)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

/// Hosted store configuration. The same host serves the row-level REST API
/// and the identity provider's auth API.
#[derive(Clone)]
pub struct StoreConfig {
    /// Base URL of the hosted store project
    pub url: String,
    /// Service-role key for admin-level access
    pub service_key: SecretString,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("url", &self.url)
            .field("service_key", &"[REDACTED]")
            .finish()
    }
}

impl std::fmt::Debug for SettlementConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettlementConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("base_url", &self.base_url)
            .field("stripe", &self.stripe)
            .field("store", &self.store)
            .field("platform_fee_rate", &self.platform_fee_rate)
            .field("sentry_dsn", &self.sentry_dsn)
            .finish()
    }
}

impl SettlementConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail placeholder validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("SETTLEMENT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SETTLEMENT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("SETTLEMENT_PORT", "8787")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SETTLEMENT_PORT".to_string(), e.to_string())
            })?;
        let base_url = get_required_env("SETTLEMENT_BASE_URL")?;
        let platform_fee_rate = parse_fee_rate(&get_env_or_default("PLATFORM_FEE_RATE", "0.10"))?;

        Ok(Self {
            host,
            port,
            base_url,
            stripe: StripeConfig::from_env()?,
            store: StoreConfig::from_env()?,
            platform_fee_rate,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl StripeConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_base: get_env_or_default("STRIPE_API_BASE", "https://api.stripe.com"),
            secret_key: get_validated_secret("STRIPE_SECRET_KEY")?,
        })
    }
}

impl StoreConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: get_required_env("STORE_URL")?,
            service_key: get_validated_secret("STORE_SERVICE_KEY")?,
        })
    }
}

/// Parse the platform fee rate from its string form and range-check it.
fn parse_fee_rate(raw: &str) -> Result<FeeRate, ConfigError> {
    let rate = raw.parse::<Decimal>().map_err(|e| {
        ConfigError::InvalidEnvVar("PLATFORM_FEE_RATE".to_string(), e.to_string())
    })?;
    Ok(FeeRate::new(rate)?)
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate that a secret is not an obvious template placeholder.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }
    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("your-stripe-key-here", "TEST_VAR");
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InsecureSecret(_, _)
        ));
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        let result = validate_secret_strength("sk_test_4eC39HqLyjWDarjtT1zdp7dc", "TEST_VAR");
        assert!(result.is_ok());
    }

    #[test]
    fn test_parse_fee_rate_default() {
        let rate = parse_fee_rate("0.10").unwrap();
        assert_eq!(rate, FeeRate::default());
    }

    #[test]
    fn test_parse_fee_rate_rejects_out_of_range() {
        assert!(matches!(
            parse_fee_rate("1.5").unwrap_err(),
            ConfigError::InvalidFeeRate(_)
        ));
        assert!(parse_fee_rate("not-a-number").is_err());
    }

    #[test]
    fn test_socket_addr() {
        let config = SettlementConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 8787,
            base_url: "http://localhost:5173".to_string(),
            stripe: StripeConfig {
                api_base: "https://api.stripe.com".to_string(),
                secret_key: SecretString::from("sk_test_4eC39HqLyjWDarjtT1zdp7dc"),
            },
            store: StoreConfig {
                url: "https://store.vendora.dev".to_string(),
                service_key: SecretString::from("service-role-9f8e7d6c5b4a"),
            },
            platform_fee_rate: FeeRate::default(),
            sentry_dsn: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 8787);
    }

    #[test]
    fn test_config_debug_redacts_secrets() {
        let config = StripeConfig {
            api_base: "https://api.stripe.com".to_string(),
            secret_key: SecretString::from("sk_live_supersecretvalue"),
        };
        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("sk_live_supersecretvalue"));

        let store = StoreConfig {
            url: "https://store.vendora.dev".to_string(),
            service_key: SecretString::from("service-role-9f8e7d6c5b4a"),
        };
        let debug_output = format!("{store:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("9f8e7d6c5b4a"));
    }
}
