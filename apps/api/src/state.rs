use std::sync::Arc;

use crate::applications::store::ApplicationStore;
use crate::auth::JwtVerifier;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Persistence adapter. Default: PgApplicationStore.
    pub store: Arc<dyn ApplicationStore>,
    /// Model access for the AI flows. Default: LlmClient.
    pub llm: Arc<dyn TextGenerator>,
    pub auth: Arc<JwtVerifier>,
}
