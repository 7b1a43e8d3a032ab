//! # Payment Gateway Trait
//!
//! Seam between the checkout flow and the hosted-payment provider.
//! The production implementation is Stripe (checkout-stripe); tests use
//! a recording fake.

use crate::error::CheckoutResult;
use crate::model::LineItem;
use async_trait::async_trait;
use std::sync::Arc;

/// Everything the provider needs to build a hosted checkout session.
#[derive(Debug, Clone)]
pub struct SessionRequest {
    /// Line items the payer is charged for
    pub line_items: Vec<LineItem>,

    /// Redirect destination after successful payment
    pub success_url: String,

    /// Redirect destination if the payer cancels
    pub cancel_url: String,

    /// Our order id, attached as session metadata so the confirmation
    /// webhook (out of scope here) can correlate the payment back
    pub order_id: String,
}

/// A hosted session created by the provider
#[derive(Debug, Clone)]
pub struct HostedSession {
    /// Provider's session id
    pub session_id: String,

    /// URL to redirect the payer to
    pub url: String,
}

/// Core trait for payment provider implementations.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a hosted checkout session and return its redirect URL.
    ///
    /// One-time payment mode; the provider collects billing address and
    /// phone number. Attempted exactly once, no retries.
    async fn create_session(&self, request: &SessionRequest) -> CheckoutResult<HostedSession>;

    /// Provider name (for logging)
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared gateway handle (dynamic dispatch)
pub type SharedPaymentGateway = Arc<dyn PaymentGateway>;
