//! # Application State
//!
//! Shared state for the Axum application: the injected store and gateway
//! clients, the redirect-route table, and process configuration. Clients
//! are constructed once at startup and passed by reference; nothing here
//! is a process-wide global.

use checkout_core::{
    CheckoutError, CheckoutResult, RedirectRoutes, SharedCommerceStore, SharedPaymentGateway,
};
use checkout_db::PgCommerceStore;
use checkout_stripe::StripeGateway;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Postgres connection string
    pub database_url: String,
    /// Default storefront base URL for redirects
    pub frontend_store_url: String,
    /// Alternate storefront base URL (optional, paired with alt_store_id)
    pub frontend_store_url_alt: Option<String>,
    /// Store id routed to the alternate storefront
    pub alt_store_id: Option<String>,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables.
    ///
    /// Required env vars: `DATABASE_URL`, `FRONTEND_STORE_URL`.
    /// Optional: `FRONTEND_STORE_URL_ALT` + `ALT_STORE_ID` (both must be
    /// set for the alternate routing to take effect).
    pub fn from_env() -> CheckoutResult<Self> {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| CheckoutError::Configuration("DATABASE_URL not set".to_string()))?;

        let frontend_store_url = std::env::var("FRONTEND_STORE_URL").map_err(|_| {
            CheckoutError::Configuration("FRONTEND_STORE_URL not set".to_string())
        })?;

        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database_url,
            frontend_store_url,
            frontend_store_url_alt: std::env::var("FRONTEND_STORE_URL_ALT").ok(),
            alt_store_id: std::env::var("ALT_STORE_ID").ok(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        })
    }

    /// Build the redirect-route table from the configured URLs
    pub fn redirect_routes(&self) -> RedirectRoutes {
        let routes = RedirectRoutes::new(&self.frontend_store_url);
        match (&self.alt_store_id, &self.frontend_store_url_alt) {
            (Some(store_id), Some(base)) => routes.with_override(store_id, base),
            _ => routes,
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> CheckoutResult<std::net::SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| {
                CheckoutError::Configuration(format!(
                    "Invalid bind address {}:{}",
                    self.host, self.port
                ))
            })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Relational data store
    pub store: SharedCommerceStore,
    /// Hosted-payment provider
    pub gateway: SharedPaymentGateway,
    /// Store-id → storefront redirect table
    pub routes: RedirectRoutes,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create state from environment: Postgres store plus Stripe gateway
    pub async fn from_env() -> CheckoutResult<Self> {
        let config = AppConfig::from_env()?;
        let routes = config.redirect_routes();

        let store = PgCommerceStore::connect(&config.database_url).await?;
        let gateway = StripeGateway::from_env()?;

        Ok(Self {
            store: Arc::new(store),
            gateway: Arc::new(gateway),
            routes,
            config,
        })
    }

    /// Assemble state from explicit parts (used by tests with fakes)
    pub fn with_parts(
        store: SharedCommerceStore,
        gateway: SharedPaymentGateway,
        routes: RedirectRoutes,
        config: AppConfig,
    ) -> Self {
        Self {
            store,
            gateway,
            routes,
            config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_fixture() -> AppConfig {
        AppConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            database_url: "postgres://localhost/checkout".to_string(),
            frontend_store_url: "https://shop.example.com".to_string(),
            frontend_store_url_alt: Some("https://alt.example.com".to_string()),
            alt_store_id: Some("store-alt".to_string()),
            environment: "test".to_string(),
        }
    }

    #[test]
    fn test_socket_addr() {
        let config = config_fixture();
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn test_redirect_routes_with_alt() {
        let routes = config_fixture().redirect_routes();

        assert_eq!(routes.base_for("store-alt"), "https://alt.example.com");
        assert_eq!(routes.base_for("other"), "https://shop.example.com");
    }

    #[test]
    fn test_redirect_routes_ignore_unpaired_alt() {
        let mut config = config_fixture();
        config.alt_store_id = None;

        let routes = config.redirect_routes();
        assert_eq!(routes.base_for("store-alt"), "https://shop.example.com");
    }
}
