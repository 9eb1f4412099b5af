use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::intake::csv::parse_capture_csv;
use crate::intake::warehouse::{fetch_records, list_pairs, ClientProjectPair};
use crate::models::record::CaptureRecord;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SessionIdQuery {
    pub session_id: Uuid,
}

#[derive(Deserialize)]
pub struct PairsQuery {
    pub session_id: Uuid,
    /// Restrict the pair listing to the signed-in user. Defaults to true,
    /// matching the capture form's own default.
    #[serde(default = "default_filter_by_user")]
    pub filter_by_user: bool,
}

fn default_filter_by_user() -> bool {
    true
}

#[derive(Serialize)]
pub struct DatasetInstalledResponse {
    pub rows: usize,
    pub message: String,
}

#[derive(Deserialize)]
pub struct ConnectRequest {
    pub session_id: Uuid,
    pub client: String,
    pub project_name: String,
}

/// POST /api/v1/intake/upload
/// Accepts a multipart capture-form CSV. On any validation failure the
/// session dataset is left unchanged.
pub async fn handle_upload(
    State(state): State<AppState>,
    Query(params): Query<SessionIdQuery>,
    mut multipart: Multipart,
) -> Result<Json<DatasetInstalledResponse>, AppError> {
    state.sessions.get(params.session_id).await?;

    let mut file_contents: Option<String> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read the uploaded file: {e}")))?
    {
        if field.name() == Some("file") {
            let text = field
                .text()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read the uploaded file: {e}")))?;
            file_contents = Some(text);
        }
    }

    let contents = file_contents
        .ok_or_else(|| AppError::Validation("No file part found in the upload.".to_string()))?;

    let records = parse_capture_csv(&contents)?;
    let rows = records.len();

    state
        .sessions
        .update(params.session_id, |s| s.install_records(records))
        .await?;

    info!("Session {}: uploaded {rows} capture rows", params.session_id);
    Ok(Json(DatasetInstalledResponse {
        rows,
        message: "File uploaded successfully".to_string(),
    }))
}

/// GET /api/v1/intake/pairs
/// Lists the warehouse's distinct (client, project) pairs for the selectors.
pub async fn handle_pairs(
    State(state): State<AppState>,
    Query(params): Query<PairsQuery>,
) -> Result<Json<Vec<ClientProjectPair>>, AppError> {
    let session = state.sessions.get(params.session_id).await?;

    let user_email = if params.filter_by_user {
        let email = session.user_email.ok_or_else(|| {
            AppError::Auth("Sign in before filtering by your own user.".to_string())
        })?;
        Some(email)
    } else {
        None
    };

    let pairs = list_pairs(&state.db, user_email.as_deref()).await?;
    Ok(Json(pairs))
}

/// POST /api/v1/intake/connect
/// Loads all warehouse rows for the chosen pair into the session.
pub async fn handle_connect(
    State(state): State<AppState>,
    Json(req): Json<ConnectRequest>,
) -> Result<Json<DatasetInstalledResponse>, AppError> {
    state.sessions.get(req.session_id).await?;

    let mut records = fetch_records(&state.db, &req.client, &req.project_name).await?;
    crate::intake::expand_solution_abbreviation(&mut records);
    let rows = records.len();

    state
        .sessions
        .update(req.session_id, |s| s.install_records(records))
        .await?;

    info!(
        "Session {}: connected to warehouse pair ({}, {}) with {rows} rows",
        req.session_id, req.client, req.project_name
    );
    Ok(Json(DatasetInstalledResponse {
        rows,
        message: "Successfully connected to the warehouse".to_string(),
    }))
}

/// GET /api/v1/preview
/// Returns the session's current dataset for the data-preview table.
pub async fn handle_preview(
    State(state): State<AppState>,
    Query(params): Query<SessionIdQuery>,
) -> Result<Json<Vec<CaptureRecord>>, AppError> {
    let session = state.sessions.get(params.session_id).await?;
    Ok(Json(session.records))
}
