use std::sync::Arc;

use crate::extraction::extractor::TextExtractor;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Nothing in here is mutable after startup; clones are cheap (the client
/// holds a connection pool internally, the extractor is an `Arc`).
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    /// Pluggable text extractor. Default: ByteScanExtractor. Swap via ENABLE_PDF_EXTRACTION env.
    pub extractor: Arc<dyn TextExtractor>,
}
