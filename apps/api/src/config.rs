use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub openai_api_key: String,
    pub openai_api_endpoint: String,
    pub openai_api_version: String,
    pub oauth_client_id: String,
    pub oauth_client_secret: String,
    pub oauth_tenant_id: String,
    pub oauth_redirect_uri: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            openai_api_key: require_env("OPENAI_API_KEY")?,
            openai_api_endpoint: require_env("OPENAI_API_ENDPOINT")?,
            openai_api_version: require_env("OPENAI_API_VERSION")?,
            oauth_client_id: require_env("OAUTH_CLIENT_ID")?,
            oauth_client_secret: require_env("OAUTH_CLIENT_SECRET")?,
            oauth_tenant_id: require_env("OAUTH_TENANT_ID")?,
            oauth_redirect_uri: require_env("OAUTH_REDIRECT_URI")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
