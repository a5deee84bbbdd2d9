use std::sync::Arc;

use crate::activity::ActivitySink;
use crate::config::Config;
use crate::llm_client::ModelGateway;
use crate::scraper::fetcher::PageFetcher;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub fetcher: PageFetcher,
    /// Pluggable model backend. Default: GeminiClient.
    pub llm: Arc<dyn ModelGateway>,
    /// Audit destination. Default: TracingActivitySink.
    pub activity: Arc<dyn ActivitySink>,
    pub config: Config,
}
