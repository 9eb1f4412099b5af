//! Warehouse source — two parameterized query shapes against the fixed
//! `captured_proposal_data` table: distinct (client, project) pairs for the
//! selection controls, then the full row fetch for a chosen pair.

use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::errors::AppError;
use crate::models::record::CaptureRecord;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ClientProjectPair {
    pub client: String,
    pub project_name: String,
}

/// Lists distinct (client, project) pairs, optionally restricted to the
/// signed-in user's identifier. Blank clients are excluded.
pub async fn list_pairs(
    pool: &PgPool,
    user_id: Option<&str>,
) -> Result<Vec<ClientProjectPair>, AppError> {
    let pairs: Vec<ClientProjectPair> = match user_id {
        Some(user_id) => {
            sqlx::query_as(
                r#"
                WITH details AS (
                    SELECT DISTINCT client, project_name, session_id
                    FROM captured_proposal_data
                    WHERE user_id = $1
                )
                SELECT client, project_name
                FROM details
                WHERE client != ''
                ORDER BY client
                "#,
            )
            .bind(user_id)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as(
                r#"
                WITH details AS (
                    SELECT DISTINCT client, project_name, session_id
                    FROM captured_proposal_data
                )
                SELECT client, project_name
                FROM details
                WHERE client != ''
                ORDER BY client
                "#,
            )
            .fetch_all(pool)
            .await?
        }
    };
    Ok(pairs)
}

/// Fetches every capture row for one (client, project) pair.
/// An empty result set is an error — the pair came from `list_pairs`, so
/// no rows means the data moved underneath us.
pub async fn fetch_records(
    pool: &PgPool,
    client: &str,
    project_name: &str,
) -> Result<Vec<CaptureRecord>, AppError> {
    let records: Vec<CaptureRecord> = sqlx::query_as(
        r#"
        SELECT client, project_name, solution, category, sub_category,
               importance, user_input, key, user_id, session_id, date_loaded
        FROM captured_proposal_data
        WHERE client = $1 AND project_name = $2
        "#,
    )
    .bind(client)
    .bind(project_name)
    .fetch_all(pool)
    .await?;

    if records.is_empty() {
        return Err(AppError::NotFound(format!(
            "No capture data returned for client '{client}', project '{project_name}'."
        )));
    }
    Ok(records)
}
