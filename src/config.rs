//! Console configuration module
//! Handles environment variable loading, validation, and backend service addresses

use std::env;

/// Base addresses and transport settings for the orchestration layer.
///
/// Two independently configurable addresses are recognized for merchant
/// operations: the gateway (primary) and the merchant service (secondary,
/// direct). Payment and provider operations each use one address.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Front-door gateway base address (also the URL-normalization base).
    pub gateway_url: String,
    /// Merchant service base address (direct, bypassing the gateway).
    pub merchant_service_url: String,
    /// Payment service base address.
    pub payment_service_url: String,
    /// Per-request timeout applied by the transport client, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            gateway_url: "http://localhost:8000".to_string(),
            merchant_service_url: "http://localhost:8001".to_string(),
            payment_service_url: "http://localhost:8002".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl ConsoleConfig {
    /// Load configuration from environment variables, falling back to the
    /// local-development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenv::dotenv().ok();

        Ok(ConsoleConfig {
            gateway_url: env::var("GATEWAY_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            merchant_service_url: env::var("MERCHANT_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:8001".to_string()),
            payment_service_url: env::var("PAYMENT_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:8002".to_string()),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("REQUEST_TIMEOUT_SECS".to_string()))?,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, url) in [
            ("GATEWAY_URL", &self.gateway_url),
            ("MERCHANT_SERVICE_URL", &self.merchant_service_url),
            ("PAYMENT_SERVICE_URL", &self.payment_service_url),
        ] {
            if url.is_empty() {
                return Err(ConfigError::InvalidValue(format!("{} cannot be empty", name)));
            }
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::InvalidValue(format!(
                    "{} must be a valid URL",
                    name
                )));
            }
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "REQUEST_TIMEOUT_SECS cannot be 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Ordered candidate bases for merchant creation: gateway first, direct
    /// merchant service second.
    pub fn merchant_create_candidates(&self) -> [&str; 2] {
        [&self.gateway_url, &self.merchant_service_url]
    }
}

/// Configuration error types
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for configuration: {0}")]
    InvalidValue(String),
}
