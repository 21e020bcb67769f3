//! Interview Orchestrator — drives one round through generation.
//!
//! Flow per round: `start_round` builds a prompt from the space context and
//! parses the model output into an ordered question list (no state change);
//! `finish_round` records the answers, asks for a round summary and completes
//! the round; `generate_follow_up` derives one extra question from an
//! answered pair.

use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::ledger::{self, AnswerPair, QaStore};
use crate::interview::prompts::{FOLLOW_UP_TEMPLATE, QUESTIONS_TEMPLATE, ROUND_SUMMARY_TEMPLATE};
use crate::llm_client::TextGenerator;
use crate::models::question_answer::QuestionAnswerRow;
use crate::models::space::SpaceRow;
use crate::space::repo::SpaceStore;
use crate::space::rounds;

pub fn build_question_prompt(space: &SpaceRow, round_name: &str) -> String {
    QUESTIONS_TEMPLATE
        .replace("{job_position}", &space.job_position)
        .replace("{company_name}", &space.company_name)
        .replace("{job_description}", &space.job_description)
        .replace("{purified_summary}", &space.purified_summary)
        .replace("{round_name}", round_name)
}

pub fn build_round_summary_prompt(answers: &[AnswerPair]) -> String {
    let transcript = answers
        .iter()
        .map(|pair| format!("Q: {}\nA: {}\n", pair.question, pair.answer))
        .collect::<String>();
    ROUND_SUMMARY_TEMPLATE.replace("{questions_and_answers}", &transcript)
}

pub fn build_follow_up_prompt(space: &SpaceRow, qa: &QuestionAnswerRow) -> String {
    FOLLOW_UP_TEMPLATE
        .replace("{question}", &qa.question)
        .replace("{answer}", &qa.answer)
        .replace("{job_position}", &space.job_position)
        .replace("{company_name}", &space.company_name)
        .replace("{round_name}", &qa.round_name)
}

/// Splits `"12. Question text"` into the question text, or `None` when the
/// line does not carry the `<number>. ` prefix.
fn strip_number_prefix(line: &str) -> Option<&str> {
    let dot = line.find('.')?;
    if dot == 0 || !line[..dot].bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let rest = &line[dot + 1..];
    if !rest.starts_with(|c: char| c.is_whitespace()) {
        return None;
    }
    Some(rest.trim())
}

/// Extracts the numbered question lines from raw model output, in order,
/// with the numeric prefix stripped. Lines that do not match are dropped —
/// a deliberate tolerance for model formatting noise — and reported back as
/// a count so callers can log it. Blank lines are ignored outright.
pub fn parse_numbered_questions(raw: &str) -> (Vec<String>, usize) {
    let mut questions = Vec::new();
    let mut discarded = 0usize;

    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match strip_number_prefix(line) {
            Some(question) if !question.is_empty() => questions.push(question.to_string()),
            _ => discarded += 1,
        }
    }

    (questions, discarded)
}

/// Generates the ordered question list for a round.
///
/// Persists nothing and does not touch round state — the in-progress
/// transition is the separate, idempotent `rounds::start` call.
pub async fn start_round(
    spaces: &dyn SpaceStore,
    generator: &dyn TextGenerator,
    space_id: Uuid,
    round_name: &str,
) -> Result<Vec<String>, AppError> {
    let space = spaces
        .find_space(space_id)
        .await?
        .ok_or(AppError::SpaceNotFound(space_id))?;
    if rounds::find(&space.rounds.0, round_name).is_none() {
        return Err(AppError::RoundNotFound(round_name.to_string()));
    }

    let prompt = build_question_prompt(&space, round_name);
    let raw = generator
        .generate_text(&prompt)
        .await
        .map_err(|e| AppError::Generation(format!("question generation failed: {e}")))?;

    let (questions, discarded) = parse_numbered_questions(&raw);
    if discarded > 0 {
        warn!(
            "Discarded {discarded} non-question lines from model output for round '{round_name}'"
        );
    }
    info!(
        "Generated {} questions for round '{round_name}' of space {space_id}",
        questions.len()
    );
    Ok(questions)
}

/// Records the submitted answers, generates the round summary and completes
/// the round.
///
/// The two writes are deliberately asymmetric: answers are recorded first and
/// survive a summarization failure, so a retry re-runs summarization without
/// losing the candidate's answers (at the cost of re-appending them unless
/// the caller de-duplicates).
pub async fn finish_round(
    spaces: &dyn SpaceStore,
    questions: &dyn QaStore,
    generator: &dyn TextGenerator,
    space_id: Uuid,
    round_name: &str,
    answers: &[AnswerPair],
) -> Result<(), AppError> {
    let mut space = spaces
        .find_space(space_id)
        .await?
        .ok_or(AppError::SpaceNotFound(space_id))?;

    ledger::record_batch(questions, &space, round_name, answers).await?;

    let prompt = build_round_summary_prompt(answers);
    let summary = generator
        .generate_text(&prompt)
        .await
        .map_err(|e| AppError::Generation(format!("round summarization failed: {e}")))?;
    let summary = summary.trim();
    if summary.is_empty() {
        return Err(AppError::Generation(
            "round summarization returned no text".to_string(),
        ));
    }

    rounds::complete(&mut space.rounds.0, round_name, summary.to_string())?;
    spaces.save_rounds(space_id, &space.rounds.0).await?;
    info!("Round '{round_name}' of space {space_id} completed");
    Ok(())
}

/// Derives one follow-up question from an answered pair and appends it to
/// the ledger. Round status is not touched.
pub async fn generate_follow_up(
    spaces: &dyn SpaceStore,
    questions: &dyn QaStore,
    generator: &dyn TextGenerator,
    question_id: Uuid,
) -> Result<String, AppError> {
    let qa = questions
        .get(question_id)
        .await?
        .ok_or(AppError::QuestionNotFound(question_id))?;
    if qa.answer.trim().is_empty() {
        return Err(AppError::AnswerMissing(question_id));
    }

    let space = spaces
        .find_space(qa.space_id)
        .await?
        .ok_or(AppError::SpaceNotFound(qa.space_id))?;

    let prompt = build_follow_up_prompt(&space, &qa);
    let question = generator
        .generate_text(&prompt)
        .await
        .map_err(|e| AppError::Generation(format!("follow-up generation failed: {e}")))?;
    let question = question.trim().to_string();
    if question.is_empty() {
        return Err(AppError::Generation(
            "follow-up generation returned no text".to_string(),
        ));
    }

    ledger::record_follow_up(questions, qa.space_id, &qa.round_name, &question).await?;
    info!(
        "Follow-up recorded for question {question_id} in round '{}'",
        qa.round_name
    );
    Ok(question)
}
