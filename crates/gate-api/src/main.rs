//! # paygate
//!
//! Checkout and paid-download gate in front of Stripe and a blob store.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export STRIPE_SECRET_KEY=sk_test_...
//! export FILE_URL=https://<store>.public.blob.vercel-storage.com/guide.pdf
//! export BLOB_READ_WRITE_TOKEN=vercel_blob_rw_...   # optional
//!
//! # Run the server
//! paygate
//! ```

use gate_api::{routes, state::AppConfig, state::AppState};
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let config = AppConfig::from_env();
    let addr = config.socket_addr()?;
    let is_prod = config.is_production();

    info!("Environment: {}", config.environment);
    match &config.stripe {
        Some(stripe) if stripe.is_live_mode() => info!("Stripe: live mode"),
        Some(stripe) if stripe.is_test_mode() => info!("Stripe: test mode"),
        Some(_) => warn!("Stripe: unrecognised key prefix"),
        None => warn!("Stripe: not configured, checkout and download will answer 500"),
    }
    if config.blob.is_none() {
        warn!("File source: not configured, download will answer 500");
    }

    let state = AppState::new(config)?;
    let app = routes::create_router(state);

    info!("paygate starting on http://{}", addr);

    if !is_prod {
        info!("Checkout: POST http://{}/api/checkout", addr);
        info!("Download: GET http://{}/api/download?session_id=...", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
