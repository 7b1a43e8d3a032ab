//! # Stripe Configuration
//!
//! Secrets come from environment variables; the API base URL is
//! overridable so tests can point at a mock server.

use checkout_core::CheckoutError;
use std::env;

/// Stripe API configuration
#[derive(Debug, Clone)]
pub struct StripeConfig {
    /// Secret API key (sk_test_... or sk_live_...)
    pub secret_key: String,

    /// API base URL (overridable for testing/mocking)
    pub api_base_url: String,

    /// API version header
    pub api_version: String,
}

impl StripeConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `STRIPE_SECRET_KEY`
    pub fn from_env() -> Result<Self, CheckoutError> {
        dotenvy::dotenv().ok();

        let secret_key = env::var("STRIPE_SECRET_KEY").map_err(|_| {
            CheckoutError::Configuration("STRIPE_SECRET_KEY not set".to_string())
        })?;

        if !secret_key.starts_with("sk_test_") && !secret_key.starts_with("sk_live_") {
            return Err(CheckoutError::Configuration(
                "STRIPE_SECRET_KEY must start with sk_test_ or sk_live_".to_string(),
            ));
        }

        Ok(Self::new(secret_key))
    }

    /// Create config with an explicit key (for testing)
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            api_base_url: "https://api.stripe.com".to_string(),
            api_version: "2024-12-18.acacia".to_string(),
        }
    }

    /// Check if using test keys
    pub fn is_test_mode(&self) -> bool {
        self.secret_key.starts_with("sk_test_")
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.secret_key)
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_header() {
        let config = StripeConfig::new("sk_test_abc123");
        assert_eq!(config.auth_header(), "Bearer sk_test_abc123");
        assert!(config.is_test_mode());
    }

    #[test]
    fn test_base_url_override() {
        let config = StripeConfig::new("sk_test_abc123").with_api_base_url("http://localhost:9999");
        assert_eq!(config.api_base_url, "http://localhost:9999");
    }
}
