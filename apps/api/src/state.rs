use std::sync::Arc;

use minijinja::Environment;

use crate::config::Config;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable generation backend. Default: `LlmClient`. Tests swap in stand-ins.
    pub generator: Arc<dyn TextGenerator>,
    pub config: Config,
    /// Page templates, built once at startup.
    pub pages: Arc<Environment<'static>>,
}
