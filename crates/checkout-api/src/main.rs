//! # Storefront Checkout API
//!
//! HTTP service that turns a product selection into an unpaid order and a
//! hosted Stripe checkout session.
//!
//! ## Usage
//!
//! ```bash
//! export DATABASE_URL=postgres://...
//! export STRIPE_SECRET_KEY=sk_test_...
//! export FRONTEND_STORE_URL=https://shop.example.com
//!
//! checkout-api
//! ```

use checkout_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let state = AppState::from_env().await?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Payment provider: {}", state.gateway.provider_name());

    let app = routes::create_router(state);

    info!("Checkout API listening on http://{}", addr);

    if !is_prod {
        info!("Health: GET http://{}/health", addr);
        info!("Checkout: POST http://{}/api/{{store_id}}/checkout", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
