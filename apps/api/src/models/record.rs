use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One capture-form row, as produced by the external capture system.
/// This service only reads these — it never writes them back.
///
/// The 11-column shape is shared by the warehouse table and the CSV schema.
#[derive(Debug, Default, Clone, Serialize, Deserialize, FromRow)]
pub struct CaptureRecord {
    pub client: String,
    pub project_name: String,
    pub solution: String,
    pub category: String,
    pub sub_category: String,
    pub importance: String,
    pub user_input: String,
    pub key: String,
    pub user_id: String,
    pub session_id: String,
    pub date_loaded: Option<DateTime<Utc>>,
}
