use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::parsing::pipeline::ResumeParser;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub parser: ResumeParser,
    /// Text generation for the screening agents. `None` when no API key is configured.
    pub llm: Option<Arc<dyn TextGenerator>>,
    pub config: Config,
}
