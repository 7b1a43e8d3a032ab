//! # Request Handlers
//!
//! Axum request handlers for the checkout API. The checkout flow is
//! strictly linear: validate, look up products, build line items, persist
//! the unpaid order, create the hosted session, respond with its URL.

use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use checkout_core::{CheckoutError, LineItem, SessionRequest};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{error, info, instrument, warn};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Create checkout request body
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    /// Product ids to purchase, quantity 1 each. Optional so an absent
    /// field and an explicit `null` both land on the validation path
    /// instead of a deserialization rejection.
    #[serde(rename = "productIds", default)]
    pub product_ids: Option<Vec<String>>,
}

/// Create checkout response body
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    /// Hosted session URL to redirect the payer to
    pub url: String,
}

/// Error rendered to the caller as a plain-text body.
///
/// Validation failures carry their message; collaborator failures keep
/// their status class but surface a generic body (details go to the log,
/// not the caller).
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if err.is_client_error() {
            Self {
                status,
                message: err.to_string(),
            }
        } else {
            error!("Checkout failed: {}", err);
            Self {
                status,
                message: "Internal server error".to_string(),
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "checkout-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// CORS preflight for the checkout route: empty JSON, 200
pub async fn checkout_preflight() -> impl IntoResponse {
    Json(serde_json::json!({}))
}

/// Create a checkout session for a store.
///
/// `POST /api/{store_id}/checkout` with `{"productIds": [...]}`. Responds
/// `{"url": "..."}` pointing at the provider's hosted session. The order
/// is persisted before the session is requested and is not rolled back if
/// the provider call fails; reconciling such orphans is external.
#[instrument(
    skip(state, request),
    fields(store_id = %store_id, requested = request.product_ids.as_ref().map_or(0, Vec::len))
)]
pub async fn create_checkout(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
    Json(request): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let product_ids = request.product_ids.unwrap_or_default();
    if product_ids.is_empty() {
        return Err(ApiError::bad_request("Product ids are required"));
    }

    // Ids with no matching product shrink this set without error.
    let products = state.store.find_products(&product_ids).await?;

    let distinct: HashSet<&str> = product_ids.iter().map(String::as_str).collect();
    if products.len() < distinct.len() {
        // Order items below still cover the full request; the billed line
        // items cover only what was found. Kept as the storefront behaves
        // today, flagged here so the gap is visible in the logs.
        warn!(
            "{} of {} distinct product ids matched a product; order items will keep the full request",
            products.len(),
            distinct.len()
        );
    }

    let line_items: Vec<LineItem> = products.iter().map(LineItem::from_product).collect();

    // One order item per requested id, duplicates included.
    let order = state.store.create_order(&store_id, &product_ids).await?;

    let session_request = SessionRequest {
        line_items,
        success_url: state.routes.success_url(&store_id),
        cancel_url: state.routes.cancel_url(&store_id),
        order_id: order.id.clone(),
    };

    info!(
        "Creating {} session: order={}, {} line items",
        state.gateway.provider_name(),
        order.id,
        session_request.line_items.len()
    );

    let session = state.gateway.create_session(&session_request).await?;

    info!("Created checkout session: {}", session.session_id);

    Ok(Json(CheckoutResponse { url: session.url }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::create_router;
    use crate::state::AppConfig;
    use async_trait::async_trait;
    use axum::http::{HeaderName, HeaderValue};
    use axum_test::TestServer;
    use checkout_core::{
        CheckoutResult, CommerceStore, HostedSession, Order, PaymentGateway, Product,
    };
    use std::sync::{Arc, Mutex};

    struct FakeStore {
        products: Vec<Product>,
        orders: Mutex<Vec<Order>>,
    }

    impl FakeStore {
        fn with_products(products: Vec<Product>) -> Self {
            Self {
                products,
                orders: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CommerceStore for FakeStore {
        async fn find_products(&self, ids: &[String]) -> CheckoutResult<Vec<Product>> {
            Ok(self
                .products
                .iter()
                .filter(|p| ids.contains(&p.id))
                .cloned()
                .collect())
        }

        async fn create_order(
            &self,
            store_id: &str,
            product_ids: &[String],
        ) -> CheckoutResult<Order> {
            let order = Order::pending(store_id, product_ids);
            self.orders.lock().unwrap().push(order.clone());
            Ok(order)
        }
    }

    struct FakeGateway {
        requests: Mutex<Vec<SessionRequest>>,
        fail: bool,
    }

    impl FakeGateway {
        fn new() -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl PaymentGateway for FakeGateway {
        async fn create_session(&self, request: &SessionRequest) -> CheckoutResult<HostedSession> {
            self.requests.lock().unwrap().push(request.clone());
            if self.fail {
                return Err(CheckoutError::Provider {
                    provider: "fake".to_string(),
                    message: "session rejected".to_string(),
                });
            }
            Ok(HostedSession {
                session_id: "cs_fake_1".to_string(),
                url: "https://pay.example.com/cs_fake_1".to_string(),
            })
        }

        fn provider_name(&self) -> &'static str {
            "fake"
        }
    }

    fn config_fixture() -> AppConfig {
        AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            database_url: "postgres://unused".to_string(),
            frontend_store_url: "https://shop.example.com".to_string(),
            frontend_store_url_alt: Some("https://alt.example.com".to_string()),
            alt_store_id: Some("store-alt".to_string()),
            environment: "test".to_string(),
        }
    }

    fn server_with(store: Arc<FakeStore>, gateway: Arc<FakeGateway>) -> TestServer {
        let config = config_fixture();
        let routes = config.redirect_routes();
        let state = AppState::with_parts(store, gateway, routes, config);
        TestServer::new(create_router(state)).unwrap()
    }

    fn catalog() -> Vec<Product> {
        vec![
            Product::new("p1", "Widget", 10.00),
            Product::new("p2", "Gadget", 5.50),
        ]
    }

    #[tokio::test]
    async fn test_empty_product_ids_is_rejected() {
        let store = Arc::new(FakeStore::with_products(catalog()));
        let gateway = Arc::new(FakeGateway::new());
        let server = server_with(store.clone(), gateway.clone());

        let response = server
            .post("/api/abc/checkout")
            .json(&serde_json::json!({ "productIds": [] }))
            .await;

        assert_eq!(response.status_code(), 400);
        assert_eq!(response.text(), "Product ids are required");
        // No side effects on the rejection path
        assert!(store.orders.lock().unwrap().is_empty());
        assert!(gateway.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_product_ids_is_rejected() {
        let store = Arc::new(FakeStore::with_products(catalog()));
        let gateway = Arc::new(FakeGateway::new());
        let server = server_with(store.clone(), gateway);

        let response = server
            .post("/api/abc/checkout")
            .json(&serde_json::json!({}))
            .await;

        assert_eq!(response.status_code(), 400);
        assert_eq!(response.text(), "Product ids are required");
        assert!(store.orders.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_null_product_ids_is_rejected() {
        let store = Arc::new(FakeStore::with_products(catalog()));
        let gateway = Arc::new(FakeGateway::new());
        let server = server_with(store.clone(), gateway);

        let response = server
            .post("/api/abc/checkout")
            .json(&serde_json::json!({ "productIds": null }))
            .await;

        assert_eq!(response.status_code(), 400);
        assert_eq!(response.text(), "Product ids are required");
        assert!(store.orders.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_checkout_happy_path() {
        let store = Arc::new(FakeStore::with_products(catalog()));
        let gateway = Arc::new(FakeGateway::new());
        let server = server_with(store.clone(), gateway.clone());

        let response = server
            .post("/api/abc/checkout")
            .json(&serde_json::json!({ "productIds": ["p1", "p2"] }))
            .await;

        assert_eq!(response.status_code(), 200);
        let body: serde_json::Value = response.json();
        assert_eq!(body["url"], "https://pay.example.com/cs_fake_1");

        let orders = store.orders.lock().unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].store_id, "abc");
        assert!(!orders[0].is_paid);
        assert_eq!(orders[0].items.len(), 2);

        let requests = gateway.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let line_items = &requests[0].line_items;
        assert_eq!(line_items.len(), 2);
        assert_eq!(line_items[0].unit_amount, 1000);
        assert_eq!(line_items[1].unit_amount, 550);
        assert_eq!(
            requests[0].success_url,
            "https://shop.example.com/cart?success=1"
        );
        assert_eq!(
            requests[0].cancel_url,
            "https://shop.example.com/cart?canceled=1"
        );
        assert_eq!(requests[0].order_id, orders[0].id);
    }

    #[tokio::test]
    async fn test_duplicates_and_misses_diverge() {
        let store = Arc::new(FakeStore::with_products(catalog()));
        let gateway = Arc::new(FakeGateway::new());
        let server = server_with(store.clone(), gateway.clone());

        let response = server
            .post("/api/abc/checkout")
            .json(&serde_json::json!({ "productIds": ["p1", "p1", "missing"] }))
            .await;

        assert_eq!(response.status_code(), 200);

        // Order items follow the request verbatim
        let orders = store.orders.lock().unwrap();
        let item_ids: Vec<&str> = orders[0]
            .items
            .iter()
            .map(|i| i.product_id.as_str())
            .collect();
        assert_eq!(item_ids, vec!["p1", "p1", "missing"]);

        // Line items cover only found products, deduplicated by the lookup
        let requests = gateway.requests.lock().unwrap();
        assert_eq!(requests[0].line_items.len(), 1);
        assert_eq!(requests[0].line_items[0].name, "Widget");
    }

    #[tokio::test]
    async fn test_alt_store_routes_to_alternate_base() {
        let store = Arc::new(FakeStore::with_products(catalog()));
        let gateway = Arc::new(FakeGateway::new());
        let server = server_with(store, gateway.clone());

        let response = server
            .post("/api/store-alt/checkout")
            .json(&serde_json::json!({ "productIds": ["p1"] }))
            .await;

        assert_eq!(response.status_code(), 200);
        let requests = gateway.requests.lock().unwrap();
        assert_eq!(
            requests[0].success_url,
            "https://alt.example.com/cart?success=1"
        );
        assert_eq!(
            requests[0].cancel_url,
            "https://alt.example.com/cart?canceled=1"
        );
    }

    #[tokio::test]
    async fn test_gateway_failure_leaves_orphaned_order() {
        let store = Arc::new(FakeStore::with_products(catalog()));
        let gateway = Arc::new(FakeGateway::failing());
        let server = server_with(store.clone(), gateway);

        let response = server
            .post("/api/abc/checkout")
            .json(&serde_json::json!({ "productIds": ["p1"] }))
            .await;

        assert_eq!(response.status_code(), 502);
        assert_eq!(response.text(), "Internal server error");
        // No compensating rollback: the order stays persisted
        assert_eq!(store.orders.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_preflight_returns_empty_object() {
        let store = Arc::new(FakeStore::with_products(catalog()));
        let gateway = Arc::new(FakeGateway::new());
        let server = server_with(store, gateway);

        let response = server.method(axum::http::Method::OPTIONS, "/api/abc/checkout").await;

        assert_eq!(response.status_code(), 200);
        let body: serde_json::Value = response.json();
        assert_eq!(body, serde_json::json!({}));
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .map(|v| v.to_str().unwrap()),
            Some("*")
        );
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-methods")
                .map(|v| v.to_str().unwrap()),
            Some("GET, POST, PUT, DELETE, OPTIONS")
        );
    }

    #[tokio::test]
    async fn test_cors_headers_on_rejection() {
        let store = Arc::new(FakeStore::with_products(catalog()));
        let gateway = Arc::new(FakeGateway::new());
        let server = server_with(store, gateway);

        let response = server
            .post("/api/abc/checkout")
            .add_header(
                HeaderName::from_static("origin"),
                HeaderValue::from_static("https://shop.example.com"),
            )
            .json(&serde_json::json!({ "productIds": [] }))
            .await;

        assert_eq!(response.status_code(), 400);
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .map(|v| v.to_str().unwrap()),
            Some("*")
        );
    }
}
