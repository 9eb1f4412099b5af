pub mod health;
pub mod page;

use axum::{
    routing::{get, post},
    Router,
};

use crate::auth;
use crate::generation;
use crate::intake;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(page::index_handler))
        .route("/health", get(health::health_handler))
        // Identity gate
        .route("/api/v1/session", post(auth::handlers::handle_create_session))
        .route("/auth/login", get(auth::handlers::handle_login))
        .route("/auth/callback", get(auth::handlers::handle_callback))
        // Data intake
        .route("/api/v1/intake/upload", post(intake::handlers::handle_upload))
        .route("/api/v1/intake/pairs", get(intake::handlers::handle_pairs))
        .route("/api/v1/intake/connect", post(intake::handlers::handle_connect))
        .route("/api/v1/preview", get(intake::handlers::handle_preview))
        // Generation
        .route("/api/v1/prompts", get(generation::handlers::handle_prompts))
        .route("/api/v1/generate", post(generation::handlers::handle_generate))
        .with_state(state)
}
