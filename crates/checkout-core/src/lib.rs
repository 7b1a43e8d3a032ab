//! # checkout-core
//!
//! Core types and traits for the storefront checkout service.
//!
//! This crate provides:
//! - `Product`, `Order`, `OrderItem`, and `LineItem` domain types
//! - `CommerceStore` trait for the relational data store
//! - `PaymentGateway` trait for hosted-payment providers
//! - `RedirectRoutes` for per-store success/cancel destinations
//! - `CheckoutError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use checkout_core::{LineItem, Order, RedirectRoutes, SessionRequest};
//!
//! let products = store.find_products(&product_ids).await?;
//! let line_items: Vec<_> = products.iter().map(LineItem::from_product).collect();
//!
//! let order = store.create_order(&store_id, &product_ids).await?;
//!
//! let session = gateway.create_session(&SessionRequest {
//!     line_items,
//!     success_url: routes.success_url(&store_id),
//!     cancel_url: routes.cancel_url(&store_id),
//!     order_id: order.id,
//! }).await?;
//!
//! // Redirect the payer to session.url
//! ```

pub mod error;
pub mod gateway;
pub mod model;
pub mod redirect;
pub mod store;

// Re-exports for convenience
pub use error::{CheckoutError, CheckoutResult};
pub use gateway::{HostedSession, PaymentGateway, SessionRequest, SharedPaymentGateway};
pub use model::{Currency, LineItem, Order, OrderItem, Product};
pub use redirect::RedirectRoutes;
pub use store::{CommerceStore, SharedCommerceStore};
