//! Typing test session endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;
use crate::AppState;

/// POST /api/sessions
pub async fn start(
    State(state): State<AppState>,
    Json(payload): Json<StartSessionRequest>,
) -> Result<(StatusCode, Json<SessionView>)> {
    let settings = payload.settings();
    let total_cards = payload.cards.len();
    let session = typing_test_core::start_session(payload.cards, settings)?;
    let session_id = state.sessions.insert(session)?;

    tracing::info!(%session_id, total_cards, "Started typing test");

    let view = state
        .sessions
        .with_session(session_id, |s| Ok(SessionView::from_session(session_id, s)))?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/sessions/:id
pub async fn get(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionView>> {
    let view = state
        .sessions
        .with_session(session_id, |s| Ok(SessionView::from_session(session_id, s)))?;
    Ok(Json(view))
}

/// DELETE /api/sessions/:id
pub async fn discard(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    let deleted = state.sessions.remove(session_id)?;
    if deleted {
        tracing::info!(%session_id, "Discarded typing test");
    }
    Ok(Json(serde_json::json!({ "deleted": deleted })))
}

/// PUT /api/sessions/:id/input
pub async fn update_input(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<InputRequest>,
) -> Result<Json<SessionView>> {
    let view = state.sessions.with_session(session_id, |s| {
        s.set_input(payload.text);
        Ok(SessionView::from_session(session_id, s))
    })?;
    Ok(Json(view))
}

/// POST /api/sessions/:id/check
pub async fn check(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<CheckAnswerRequest>,
) -> Result<Json<CheckAnswerResponse>> {
    let result = state
        .sessions
        .with_session(session_id, |s| s.check_answer(&payload.text))?;
    Ok(Json(result.into()))
}

/// POST /api/sessions/:id/advance
pub async fn advance(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<AdvanceRequest>,
) -> Result<Json<AdvanceResponse>> {
    let response = state.sessions.with_session(session_id, |s| {
        let advance = s.advance(payload.direction)?;
        Ok(AdvanceResponse::new(advance, SessionView::from_session(session_id, s)))
    })?;
    Ok(Json(response))
}

/// POST /api/sessions/:id/finish
pub async fn finish(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionResults>> {
    let results = state.sessions.with_session(session_id, |s| s.finish())?;
    Ok(Json(results))
}

/// POST /api/sessions/:id/retake
pub async fn retake(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionView>> {
    let view = state.sessions.with_session(session_id, |s| {
        s.retake()?;
        Ok(SessionView::from_session(session_id, s))
    })?;
    Ok(Json(view))
}

/// POST /api/sessions/:id/review
pub async fn review(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionView>> {
    let view = state.sessions.with_session(session_id, |s| {
        s.review()?;
        Ok(SessionView::from_session(session_id, s))
    })?;
    Ok(Json(view))
}

/// GET /api/sessions/:id/score
pub async fn score(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ScoreResponse>> {
    let score = state.sessions.with_session(session_id, |s| s.score())?;
    Ok(Json(score.into()))
}
