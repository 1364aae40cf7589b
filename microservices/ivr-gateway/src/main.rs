//! IVR Gateway entry point

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use ivr_gateway::provider::PlivoClient;
use ivr_gateway::{routes, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .json()
        .init();

    info!("Starting IVR Gateway microservice");

    // Load configuration
    let config = Config::from_env()?;
    let bind_addr = config.bind_address();
    let server_url = config.server_url.clone();

    // One authenticated provider handle for the process lifetime
    let provider = Arc::new(PlivoClient::new(&config.auth_id, &config.auth_token));

    // Build application state and router
    let state = AppState::new(config, provider);
    let app = routes::create_router(state);

    // Start server
    let listener = TcpListener::bind(&bind_addr).await?;
    info!(bind = %bind_addr, server_url = %server_url, "IVR Gateway listening");
    info!("Health check: http://{}/health", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
