use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{info, warn, Level};

use sanad_core::ChatClient;
use sanad_server::config::Config;
use sanad_server::{app_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    info!("Starting social support application service");

    let config =
        Config::from_env().context("Failed to load configuration from environment variables")?;

    let assist_client = config.openai_api_key.clone().map(ChatClient::new);
    if assist_client.is_none() {
        warn!("OPENAI_API_KEY not set; /api/ai-assist will reject requests");
    }

    let state = Arc::new(AppState {
        config,
        assist_client,
    });

    let app = app_router(state.clone())
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    let listener = TcpListener::bind(format!("0.0.0.0:{}", state.config.port)).await?;
    info!("Server listening on port {}", state.config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
