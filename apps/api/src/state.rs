use std::sync::Arc;

use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Model gateway. `LlmClient` in production, a scripted generator in tests.
    pub llm: Arc<dyn TextGenerator>,
}
