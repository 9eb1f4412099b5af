//! Proposal generation — orchestrates the two chained model calls.
//!
//! Flow: reduce dataset → build part-1 prompt → call model → build part-2
//! prompt (embedding the part-1 output) → call model → store everything on
//! the session → return both blocks.
//!
//! The second call sees the first call's full output for continuity. Both
//! calls are synchronous from the user's point of view; a failure in either
//! is surfaced as a visible message and nothing is retried.

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::intake::expand_solution_abbreviation;
use crate::llm_client::LlmClient;
use crate::prompts::assembler::{build_part1, build_part2};
use crate::prompts::SYSTEM_MESSAGE;
use crate::reducer::reduce;
use crate::session::SessionStore;

pub mod handlers;

/// The two generated text blocks and their concatenation.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateResponse {
    pub part1: String,
    pub part2: String,
    pub full_proposal: String,
}

/// Runs the full two-call generation pipeline for one session.
pub async fn generate_proposal(
    llm: &LlmClient,
    sessions: &SessionStore,
    session_id: Uuid,
) -> Result<GenerateResponse, AppError> {
    let session = sessions.get(session_id).await?;

    if session.records.is_empty() {
        return Err(AppError::Validation(
            "Please upload a file or connect to the warehouse before generating.".to_string(),
        ));
    }

    // Re-apply the solution substitution before reduction; idempotent.
    let mut records = session.records;
    expand_solution_abbreviation(&mut records);
    let fields = reduce(&records);

    info!(
        "Session {session_id}: generating proposal for client '{}', project '{}'",
        fields.client_name, fields.project_name
    );

    // Part 1: executive summary + client background.
    let prompt_part1 = build_part1(&fields);
    sessions
        .update(session_id, |s| s.prompt_part1 = Some(prompt_part1.clone()))
        .await?;

    let part1 = llm
        .complete(SYSTEM_MESSAGE, &prompt_part1)
        .await
        .map_err(|e| AppError::Llm(format!("Failed to generate the proposal: {e}")))?;

    // Part 2: remaining four sections, with part 1 as context.
    let prompt_part2 = build_part2(&fields, &part1);
    sessions
        .update(session_id, |s| s.prompt_part2 = Some(prompt_part2.clone()))
        .await?;

    let part2 = llm
        .complete(SYSTEM_MESSAGE, &prompt_part2)
        .await
        .map_err(|e| AppError::Llm(format!("Failed to generate the proposal: {e}")))?;

    let full_proposal = format!("{part1}\n\n{part2}");

    sessions
        .update(session_id, |s| {
            s.generated_part1 = Some(part1.clone());
            s.generated_part2 = Some(part2.clone());
        })
        .await?;

    info!(
        "Session {session_id}: proposal generated ({} chars)",
        full_proposal.len()
    );

    Ok(GenerateResponse {
        part1,
        part2,
        full_proposal,
    })
}
