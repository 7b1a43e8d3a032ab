//! # Stripe Checkout Sessions
//!
//! `PaymentGateway` implementation over Stripe's hosted Checkout Sessions
//! API. Requests are form-encoded, one attempt per call.

use crate::config::StripeConfig;
use async_trait::async_trait;
use checkout_core::{
    CheckoutError, CheckoutResult, HostedSession, PaymentGateway, SessionRequest,
};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info, instrument};

/// Stripe Checkout Session gateway
///
/// Uses Stripe's hosted checkout page; the payer is redirected to the
/// session URL and Stripe collects billing address and phone number.
pub struct StripeGateway {
    config: StripeConfig,
    client: Client,
}

impl StripeGateway {
    /// Create a new Stripe gateway
    pub fn new(config: StripeConfig) -> CheckoutResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| CheckoutError::Configuration(e.to_string()))?;

        info!("Stripe gateway initialized (test_mode={})", config.is_test_mode());

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> CheckoutResult<Self> {
        let config = StripeConfig::from_env()?;
        Self::new(config)
    }

    /// Flatten a session request into Stripe's bracketed form params
    fn form_params(request: &SessionRequest) -> Vec<(String, String)> {
        let mut params: Vec<(String, String)> = vec![
            ("mode".to_string(), "payment".to_string()),
            (
                "billing_address_collection".to_string(),
                "required".to_string(),
            ),
            (
                "phone_number_collection[enabled]".to_string(),
                "true".to_string(),
            ),
            ("success_url".to_string(), request.success_url.clone()),
            ("cancel_url".to_string(), request.cancel_url.clone()),
            ("metadata[orderId]".to_string(), request.order_id.clone()),
        ];

        for (i, item) in request.line_items.iter().enumerate() {
            params.push((
                format!("line_items[{}][price_data][currency]", i),
                item.currency.as_str().to_string(),
            ));
            params.push((
                format!("line_items[{}][price_data][unit_amount]", i),
                item.unit_amount.to_string(),
            ));
            params.push((
                format!("line_items[{}][price_data][product_data][name]", i),
                item.name.clone(),
            ));
            params.push((format!("line_items[{}][quantity]", i), item.quantity.to_string()));
        }

        params
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    #[instrument(skip(self, request), fields(order_id = %request.order_id, items = request.line_items.len()))]
    async fn create_session(&self, request: &SessionRequest) -> CheckoutResult<HostedSession> {
        // An empty line-item list is passed through deliberately; Stripe
        // rejects it and that rejection propagates like any provider error.
        let params = Self::form_params(request);

        debug!(
            "Creating Stripe checkout session: {} line items",
            request.line_items.len()
        );

        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .form(&params)
            .send()
            .await
            .map_err(|e| CheckoutError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CheckoutError::Network(e.to_string()))?;

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);

            if let Ok(error_response) = serde_json::from_str::<StripeErrorResponse>(&body) {
                return Err(CheckoutError::Provider {
                    provider: "stripe".to_string(),
                    message: error_response.error.message,
                });
            }

            return Err(CheckoutError::Provider {
                provider: "stripe".to_string(),
                message: format!("HTTP {}: {}", status, body),
            });
        }

        let session: StripeSessionResponse = serde_json::from_str(&body).map_err(|e| {
            CheckoutError::Serialization(format!("Failed to parse Stripe response: {}", e))
        })?;

        info!(
            "Created Stripe checkout session: id={}, order_id={}",
            session.id, request.order_id
        );

        Ok(HostedSession {
            session_id: session.id,
            url: session.url,
        })
    }

    fn provider_name(&self) -> &'static str {
        "stripe"
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeSessionResponse {
    id: String,
    url: String,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeErrorBody,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    message: String,
}
