use std::sync::Arc;

use crate::config::Config;
use crate::layout::PageConfig;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Suggestion enrichment backend. `DisabledGenerator` when no API key is set.
    pub text_generator: Arc<dyn TextGenerator>,
    /// Page geometry for the one-page fit loop (US letter, 0.5" margins).
    pub page_config: PageConfig,
}
