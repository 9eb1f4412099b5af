use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates and returns the warehouse connection pool.
/// Opened once at startup and reused for every query; no per-request connections.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to warehouse...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("Warehouse connection pool established");
    Ok(pool)
}
