//! # checkout-db
//!
//! Postgres implementation of the `CommerceStore` trait for the storefront
//! checkout service. Schema DDL lives in `migrations/0001_init.sql`.
//!
//! ```rust,ignore
//! use checkout_db::PgCommerceStore;
//!
//! let store = PgCommerceStore::connect(&database_url).await?;
//! let products = store.find_products(&ids).await?;
//! ```

pub mod pg;

pub use pg::PgCommerceStore;
