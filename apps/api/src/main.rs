mod auth;
mod config;
mod db;
mod errors;
mod generation;
mod intake;
mod llm_client;
mod models;
mod prompts;
mod reducer;
mod routes;
mod session;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::IdentityClient;
use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::session::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let crate_name = env!("CARGO_PKG_NAME").replace('-', "_");
            EnvFilter::new(format!("{}={}", crate_name, &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Proposal API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the warehouse pool (opened once, reused for every query)
    let db = create_pool(&config.database_url).await?;

    // Initialize the model client
    let llm = LlmClient::new(
        config.openai_api_key.clone(),
        config.openai_api_endpoint.clone(),
        config.openai_api_version.clone(),
    );
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize the identity-provider client
    let identity = IdentityClient::new(&config);
    info!("Identity client initialized (scope: {})", auth::SCOPE);

    // Session store — one in-process state bag per browser session
    let sessions = SessionStore::new();

    // Build app state
    let state = AppState {
        db,
        llm,
        identity,
        sessions,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // internal tool behind the identity gate

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
