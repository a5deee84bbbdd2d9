mod activity;
mod config;
mod errors;
mod generation;
mod llm_client;
mod models;
mod research;
mod routes;
mod scraper;
mod state;
#[cfg(test)]
mod testing;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::activity::TracingActivitySink;
use crate::config::Config;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::scraper::fetcher::PageFetcher;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},activity=info",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Outreach API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize model gateway
    let llm = GeminiClient::new(config.google_ai_api_key.clone())?
        .with_model(config.gemini_model.clone())
        .with_base_url(config.gemini_api_base_url.clone());
    if config.has_model_credentials() {
        info!("Model gateway initialized (model: {})", llm.model());
    } else {
        warn!("GOOGLE_AI_API_KEY not set; generation and research will be unavailable");
    }

    let fetcher = PageFetcher::new()?;

    let state = AppState {
        fetcher,
        llm: Arc::new(llm),
        activity: Arc::new(TracingActivitySink),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
