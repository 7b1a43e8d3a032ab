//! # Domain Types
//!
//! Products, orders, and the ephemeral line items sent to the payment
//! provider. Products are owned by the data store and read-only here;
//! orders are created unpaid and flipped to paid by an external
//! confirmation flow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Supported currencies (ISO 4217)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    USD,
    EUR,
    GBP,
}

impl Currency {
    /// Returns the ISO 4217 currency code
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::USD => "usd",
            Currency::EUR => "eur",
            Currency::GBP => "gbp",
        }
    }

    /// Convert a decimal amount to minor currency units (cents).
    ///
    /// Rounds half away from zero: 19.995 becomes 2000, not 1999. This is
    /// the single place the decimal-to-integer conversion happens.
    pub fn to_minor_units(&self, amount: f64) -> i64 {
        (amount * 100.0).round() as i64
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::USD
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

/// A product in a store's catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Price as a decimal currency amount (e.g., 19.99)
    pub price: f64,
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
        }
    }
}

/// A line item sent to the payment provider.
///
/// Ephemeral: built per-request from found products, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product display name
    pub name: String,

    /// Currency
    pub currency: Currency,

    /// Unit amount in minor currency units (cents for USD)
    pub unit_amount: i64,

    /// Quantity (fixed at 1 for storefront checkout)
    pub quantity: u32,
}

impl LineItem {
    /// Build a line item from a product: quantity 1, USD, price in cents
    pub fn from_product(product: &Product) -> Self {
        let currency = Currency::USD;
        Self {
            name: product.name.clone(),
            unit_amount: currency.to_minor_units(product.price),
            currency,
            quantity: 1,
        }
    }
}

/// A persisted record linking an order to a product.
///
/// Carries no quantity: each requested product id yields exactly one item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub product_id: String,
}

/// An unpaid order awaiting payment confirmation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Unique order id (generated)
    pub id: String,

    /// Owning store
    pub store_id: String,

    /// Payment flag; false at creation, flipped externally on confirmation
    pub is_paid: bool,

    /// Items, one per requested product id (duplicates preserved)
    pub items: Vec<OrderItem>,

    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Create a pending order with one item per requested product id.
    ///
    /// Items are built from the request list as-is: duplicate ids produce
    /// duplicate items, and ids that match no product still get an item
    /// (the store's foreign key is what rejects truly unknown ids).
    pub fn pending(store_id: impl Into<String>, product_ids: &[String]) -> Self {
        let id = Uuid::new_v4().to_string();
        let items = product_ids
            .iter()
            .map(|pid| OrderItem {
                id: Uuid::new_v4().to_string(),
                order_id: id.clone(),
                product_id: pid.clone(),
            })
            .collect();

        Self {
            id,
            store_id: store_id.into(),
            is_paid: false,
            items,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minor_units_conversion() {
        let usd = Currency::USD;
        assert_eq!(usd.to_minor_units(19.99), 1999);
        assert_eq!(usd.to_minor_units(10.00), 1000);
        assert_eq!(usd.to_minor_units(5.50), 550);
        // Half rounds away from zero
        assert_eq!(usd.to_minor_units(0.005), 1);
    }

    #[test]
    fn test_line_item_from_product() {
        let product = Product::new("p1", "Widget", 10.0);
        let item = LineItem::from_product(&product);

        assert_eq!(item.name, "Widget");
        assert_eq!(item.unit_amount, 1000);
        assert_eq!(item.quantity, 1);
        assert_eq!(item.currency, Currency::USD);
    }

    #[test]
    fn test_pending_order_items_follow_request() {
        let ids = vec!["p1".to_string(), "p2".to_string(), "p1".to_string()];
        let order = Order::pending("store-1", &ids);

        assert!(!order.is_paid);
        assert_eq!(order.store_id, "store-1");
        assert_eq!(order.items.len(), 3);
        assert_eq!(order.items[0].product_id, "p1");
        assert_eq!(order.items[2].product_id, "p1");
        assert!(order.items.iter().all(|i| i.order_id == order.id));
    }
}
