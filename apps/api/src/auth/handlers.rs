use axum::{
    extract::{Query, State},
    response::Redirect,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SessionIdQuery {
    pub session_id: Uuid,
}

#[derive(Serialize)]
pub struct SessionCreatedResponse {
    pub session_id: Uuid,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub auth_url: String,
}

#[derive(Deserialize)]
pub struct CallbackQuery {
    pub code: String,
    /// The session id, threaded through the provider as OAuth `state`.
    pub state: Uuid,
}

/// POST /api/v1/session
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> Result<Json<SessionCreatedResponse>, AppError> {
    let session_id = state.sessions.create().await;
    info!("Created session {session_id}");
    Ok(Json(SessionCreatedResponse { session_id }))
}

/// GET /auth/login
/// Returns the identity provider's authorization URL for this session.
pub async fn handle_login(
    State(state): State<AppState>,
    Query(params): Query<SessionIdQuery>,
) -> Result<Json<LoginResponse>, AppError> {
    // Confirm the session exists before handing out a URL tied to it.
    state.sessions.get(params.session_id).await?;
    Ok(Json(LoginResponse {
        auth_url: state.identity.authorize_url(params.session_id),
    }))
}

/// GET /auth/callback
/// Exchanges the authorization code, resolves the user's email, and stores
/// both on the session. On failure the session is left without a token.
pub async fn handle_callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackQuery>,
) -> Result<Redirect, AppError> {
    let session_id = params.state;
    state.sessions.get(session_id).await?;

    let token = state.identity.exchange_code(&params.code).await?;
    let email = state.identity.fetch_profile(&token).await?;

    state
        .sessions
        .update(session_id, |s| {
            s.token = Some(token);
            s.user_email = Some(email.clone());
        })
        .await?;

    info!("Session {session_id} authenticated as {email}");
    Ok(Redirect::to(&format!("/?session_id={session_id}")))
}
