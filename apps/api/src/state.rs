use std::sync::Arc;

use crate::auth::session::SessionStore;
use crate::auth::store::CredentialStore;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable text generator. Production: `LlmClient` (Gemini).
    pub llm: Arc<dyn TextGenerator>,
    pub credentials: CredentialStore,
    pub sessions: SessionStore,
}
