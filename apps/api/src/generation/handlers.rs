use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::{generate_proposal, GenerateResponse};
use crate::intake::expand_solution_abbreviation;
use crate::prompts::assembler::build_part1;
use crate::reducer::reduce;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SessionIdQuery {
    pub session_id: Uuid,
}

#[derive(Deserialize)]
pub struct GenerateRequest {
    pub session_id: Uuid,
}

#[derive(Serialize)]
pub struct PromptsResponse {
    pub prompt_part1: Option<String>,
    pub prompt_part2: Option<String>,
}

/// POST /api/v1/generate
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let response = generate_proposal(&state.llm, &state.sessions, req.session_id).await?;
    Ok(Json(response))
}

/// GET /api/v1/prompts
/// Diagnostic view of the raw prompts. The part-1 prompt is recomputed from
/// the current dataset; the part-2 prompt exists only after a generation run
/// (it embeds the part-1 output).
pub async fn handle_prompts(
    State(state): State<AppState>,
    Query(params): Query<SessionIdQuery>,
) -> Result<Json<PromptsResponse>, AppError> {
    let session = state.sessions.get(params.session_id).await?;

    let prompt_part1 = if session.records.is_empty() {
        session.prompt_part1
    } else {
        let mut records = session.records;
        expand_solution_abbreviation(&mut records);
        let prompt = build_part1(&reduce(&records));
        state
            .sessions
            .update(params.session_id, |s| {
                s.prompt_part1 = Some(prompt.clone());
            })
            .await?;
        Some(prompt)
    };

    Ok(Json(PromptsResponse {
        prompt_part1,
        prompt_part2: session.prompt_part2,
    }))
}
