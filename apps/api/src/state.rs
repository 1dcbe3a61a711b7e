use std::sync::Arc;

use minijinja::Environment;

use crate::llm::CompletionModel;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The completion service behind a trait so tests can stub it.
    pub llm: Arc<dyn CompletionModel>,
    /// Session Carrier: the redis-backed per-session document store.
    pub sessions: SessionStore,
    /// Template environment built once at startup.
    pub templates: Environment<'static>,
}
