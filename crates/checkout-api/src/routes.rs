//! # Routes
//!
//! Axum router for the checkout API. The permissive CORS headers are a
//! constant set attached to every response by a response-mapping layer,
//! including the validation-rejection path; OPTIONS is a real route so
//! preflight answers with an empty JSON object rather than an empty body.

use crate::handlers;
use crate::state::AppState;
use axum::{
    http::{header, HeaderValue},
    middleware::map_response,
    response::Response,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Attach the permissive CORS header set to a response
async fn apply_cors_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, PUT, DELETE, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type, Authorization"),
    );
    response
}

/// Create the main application router
///
/// Routes:
/// - GET     /health                      - Health check
/// - POST    /api/{store_id}/checkout     - Create checkout session
/// - OPTIONS /api/{store_id}/checkout     - CORS preflight (empty JSON)
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/{store_id}/checkout",
            post(handlers::create_checkout).options(handlers::checkout_preflight),
        )
        .layer(map_response(apply_cors_headers))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
