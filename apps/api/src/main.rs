mod analysis;
mod config;
mod embeddings;
mod errors;
mod llm_client;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::report::LlmReportGenerator;
use crate::analysis::scoring::EmbeddingMatchScorer;
use crate::config::Config;
use crate::embeddings::EmbeddingClient;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cvmatch API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the scoring collaborator client
    let embeddings = EmbeddingClient::new(
        config.embeddings_api_key.clone(),
        config.embeddings_api_url.clone(),
    );
    info!(
        "Embeddings client initialized (model: {})",
        embeddings::MODEL
    );

    // Initialize the generation collaborator client
    let llm = LlmClient::new(config.anthropic_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Build app state; both pipeline stages sit behind trait objects
    let state = AppState {
        scorer: Arc::new(EmbeddingMatchScorer::new(embeddings)),
        reporter: Arc::new(LlmReportGenerator::new(llm)),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
