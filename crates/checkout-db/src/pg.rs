//! # Postgres Commerce Store
//!
//! `CommerceStore` implementation backed by sqlx/Postgres. Queries are
//! runtime-checked (`query_as`), schema lives in `migrations/`.

use async_trait::async_trait;
use checkout_core::{CheckoutError, CheckoutResult, CommerceStore, Order, Product};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::FromRow;
use tracing::{debug, instrument};

/// Row shape for product lookups
#[derive(Debug, FromRow)]
struct ProductRow {
    id: String,
    name: String,
    price: f64,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            price: row.price,
        }
    }
}

/// Postgres-backed commerce store
#[derive(Clone)]
pub struct PgCommerceStore {
    pool: PgPool,
}

impl PgCommerceStore {
    /// Wrap an existing connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to the database at `database_url`
    pub async fn connect(database_url: &str) -> CheckoutResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .map_err(store_err)?;

        Ok(Self::new(pool))
    }

    /// Access the underlying pool (for migrations, health checks)
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl CommerceStore for PgCommerceStore {
    #[instrument(skip(self, ids), fields(requested = ids.len()))]
    async fn find_products(&self, ids: &[String]) -> CheckoutResult<Vec<Product>> {
        let rows: Vec<ProductRow> =
            sqlx::query_as("SELECT id, name, price FROM products WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(&self.pool)
                .await
                .map_err(store_err)?;

        debug!("Found {} of {} requested products", rows.len(), ids.len());

        Ok(rows.into_iter().map(Product::from).collect())
    }

    #[instrument(skip(self, product_ids), fields(store_id = %store_id, items = product_ids.len()))]
    async fn create_order(&self, store_id: &str, product_ids: &[String]) -> CheckoutResult<Order> {
        let order = Order::pending(store_id, product_ids);

        // Order and its items commit together; the product_id foreign key
        // rejects ids that match no product row.
        let mut tx = self.pool.begin().await.map_err(store_err)?;

        sqlx::query("INSERT INTO orders (id, store_id, is_paid, created_at) VALUES ($1, $2, $3, $4)")
            .bind(&order.id)
            .bind(&order.store_id)
            .bind(order.is_paid)
            .bind(order.created_at)
            .execute(&mut *tx)
            .await
            .map_err(store_err)?;

        for item in &order.items {
            sqlx::query("INSERT INTO order_items (id, order_id, product_id) VALUES ($1, $2, $3)")
                .bind(&item.id)
                .bind(&item.order_id)
                .bind(&item.product_id)
                .execute(&mut *tx)
                .await
                .map_err(store_err)?;
        }

        tx.commit().await.map_err(store_err)?;

        debug!("Created order {} with {} items", order.id, order.items.len());

        Ok(order)
    }
}

fn store_err(err: sqlx::Error) -> CheckoutError {
    CheckoutError::Store(err.to_string())
}
