//! # checkout-stripe
//!
//! Stripe payment gateway for the storefront checkout service.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use checkout_stripe::StripeGateway;
//! use checkout_core::{PaymentGateway, SessionRequest};
//!
//! // Create gateway from environment (STRIPE_SECRET_KEY)
//! let gateway = StripeGateway::from_env()?;
//!
//! let session = gateway.create_session(&SessionRequest {
//!     line_items,
//!     success_url,
//!     cancel_url,
//!     order_id,
//! }).await?;
//!
//! // Redirect the payer to session.url
//! ```

pub mod config;
pub mod gateway;

// Re-exports
pub use config::StripeConfig;
pub use gateway::StripeGateway;
