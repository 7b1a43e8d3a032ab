//! # checkout-api
//!
//! HTTP API layer for the storefront checkout service.
//!
//! ## Endpoints
//!
//! | Method  | Path                        | Description             |
//! |---------|-----------------------------|-------------------------|
//! | GET     | `/health`                   | Health check            |
//! | POST    | `/api/{store_id}/checkout`  | Create checkout session |
//! | OPTIONS | `/api/{store_id}/checkout`  | CORS preflight          |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
