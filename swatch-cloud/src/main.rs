//! swatch-cloud binary

use swatch_cloud::{AppState, BoxError, Config, create_router};

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "swatch_cloud=info,tower_http=info".into());
    if config.log_json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    tracing::info!("Starting swatch-cloud (env: {})", config.environment);
    if config.is_development() {
        tracing::warn!("Development mode: unset secrets fall back to placeholder values");
    }
    if config.shopify_shop_domain.is_empty() {
        tracing::warn!("SHOPIFY_SHOP_DOMAIN is not set; every scan will be refused");
    }

    let state = AppState::new(&config).await?;
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("swatch-cloud HTTP listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("swatch-cloud stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
}
