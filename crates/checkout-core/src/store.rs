//! # Commerce Store Trait
//!
//! Narrow interface over the relational store consumed by checkout:
//! product lookup by id set and order creation. Implementations:
//! Postgres (checkout-db), in-memory fakes in handler tests.

use crate::error::CheckoutResult;
use crate::model::{Order, Product};
use async_trait::async_trait;
use std::sync::Arc;

/// Data store operations needed by the checkout flow.
#[async_trait]
pub trait CommerceStore: Send + Sync {
    /// Fetch all products whose id appears in `ids`.
    ///
    /// Ids with no matching product are silently absent from the result;
    /// duplicate ids do not duplicate rows. Never errors on a miss.
    async fn find_products(&self, ids: &[String]) -> CheckoutResult<Vec<Product>>;

    /// Persist an unpaid order for `store_id` with one order item per
    /// entry in `product_ids`, in request order.
    ///
    /// The store's referential constraint rejects product ids that do not
    /// exist; that surfaces as a store error, not a validation error.
    async fn create_order(&self, store_id: &str, product_ids: &[String]) -> CheckoutResult<Order>;
}

/// Type alias for a shared store handle (dynamic dispatch)
pub type SharedCommerceStore = Arc<dyn CommerceStore>;
