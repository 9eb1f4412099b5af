use sqlx::PgPool;

use crate::auth::IdentityClient;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: LlmClient,
    pub identity: IdentityClient,
    /// In-process session bag — one entry per interactive browser session.
    pub sessions: SessionStore,
    pub config: Config,
}
