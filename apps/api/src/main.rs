mod analysis;
mod config;
mod errors;
mod extraction;
mod llm_client;
mod routes;
mod state;

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extraction::extractor::{ByteScanExtractor, PdfTextExtractor, TextExtractor};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

/// Transport-level body ceiling. Sits above the 5 MiB upload cap so the
/// parse handler sees oversized files and reports them itself instead of
/// Axum cutting the body off first.
const BODY_LIMIT_BYTES: usize = 8 * 1024 * 1024;

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

    info!("Starting ViolaMatch API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(
        &config.ai_gateway_api_key,
        &config.ai_gateway_url,
        &config.ai_model,
    )?;
    info!("LLM client initialized (model: {})", llm.model());

    // Initialize text extractor (ByteScanExtractor by default, swap via ENABLE_PDF_EXTRACTION)
    let extractor: Arc<dyn TextExtractor> = if config.enable_pdf_extraction {
        Arc::new(PdfTextExtractor)
    } else {
        Arc::new(ByteScanExtractor)
    };
    info!("Text extractor initialized (backend: {})", extractor.backend());

    // Build app state
    let state = AppState { llm, extractor };

    // Build router
    let app = build_router(state)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
