//! Axum route handlers for the interview round lifecycle.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::ledger::AnswerPair;
use crate::interview::orchestrator;
use crate::models::question_answer::QuestionAnswerRow;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub questions: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct FinishRoundRequest {
    pub answers: Vec<AnswerPair>,
}

#[derive(Debug, Serialize)]
pub struct FollowUpResponse {
    pub question: String,
}

/// POST /api/v1/spaces/:id/rounds/:round_name/questions
///
/// Generates the question list for a round. No state change — pair with the
/// `/start` endpoint to mark the round in progress.
pub async fn handle_generate_questions(
    State(state): State<AppState>,
    Path((space_id, round_name)): Path<(Uuid, String)>,
) -> Result<Json<QuestionsResponse>, AppError> {
    let questions = orchestrator::start_round(
        state.spaces.as_ref(),
        state.generator.as_ref(),
        space_id,
        &round_name,
    )
    .await?;
    Ok(Json(QuestionsResponse { questions }))
}

/// POST /api/v1/spaces/:id/rounds/:round_name/finish
///
/// Records the submitted answers, generates the round summary and marks the
/// round completed.
pub async fn handle_finish_round(
    State(state): State<AppState>,
    Path((space_id, round_name)): Path<(Uuid, String)>,
    Json(request): Json<FinishRoundRequest>,
) -> Result<StatusCode, AppError> {
    if request.answers.is_empty() {
        return Err(AppError::Validation(
            "answers cannot be empty".to_string(),
        ));
    }
    if request.answers.iter().any(|p| p.question.trim().is_empty()) {
        return Err(AppError::Validation(
            "every answer must reference a non-empty question".to_string(),
        ));
    }

    orchestrator::finish_round(
        state.spaces.as_ref(),
        state.questions.as_ref(),
        state.generator.as_ref(),
        space_id,
        &round_name,
        &request.answers,
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/questions/:id/follow-up
///
/// Derives one follow-up question from an answered pair.
pub async fn handle_follow_up(
    State(state): State<AppState>,
    Path(question_id): Path<Uuid>,
) -> Result<Json<FollowUpResponse>, AppError> {
    let question = orchestrator::generate_follow_up(
        state.spaces.as_ref(),
        state.questions.as_ref(),
        state.generator.as_ref(),
        question_id,
    )
    .await?;
    Ok(Json(FollowUpResponse { question }))
}

/// GET /api/v1/rounds/:round_id/questions
///
/// Lists every question/answer recorded for a round, oldest first. The
/// owning space is resolved by scanning embedded rounds for the id.
pub async fn handle_round_questions(
    State(state): State<AppState>,
    Path(round_id): Path<Uuid>,
) -> Result<Json<Vec<QuestionAnswerRow>>, AppError> {
    let space = state
        .spaces
        .find_space_by_round(round_id)
        .await?
        .ok_or_else(|| AppError::RoundNotFound(round_id.to_string()))?;
    let round = space
        .rounds
        .0
        .iter()
        .find(|r| r.id == round_id)
        .ok_or_else(|| AppError::RoundNotFound(round_id.to_string()))?;

    let rows = state.questions.list_by_round(space.id, &round.name).await?;
    Ok(Json(rows))
}
