//! Round State Machine — lifecycle of one named round inside a space.
//!
//! Operates on the in-memory round list only; persistence is the repo's job
//! (the caller writes the whole list back as one unit). Transitions are
//! forward-only: NotStarted → InProgress → Completed.

use thiserror::Error;

use crate::errors::AppError;
use crate::models::space::{Round, RoundStatus};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoundError {
    #[error("round '{0}' not found")]
    NotFound(String),

    #[error("round '{0}' is already completed")]
    AlreadyCompleted(String),

    #[error("duplicate round name '{0}'")]
    DuplicateName(String),

    #[error("round name cannot be empty")]
    EmptyName,
}

impl From<RoundError> for AppError {
    fn from(err: RoundError) -> Self {
        match err {
            RoundError::NotFound(name) => AppError::RoundNotFound(name),
            RoundError::AlreadyCompleted(name) => AppError::RoundAlreadyCompleted(name),
            RoundError::DuplicateName(name) => {
                AppError::Validation(format!("duplicate round name '{name}'"))
            }
            RoundError::EmptyName => AppError::Validation("round name cannot be empty".to_string()),
        }
    }
}

/// Builds the round list for a new space. Names are trimmed; empty names and
/// duplicates (exact match after trim) are rejected.
pub fn build_rounds(names: &[String]) -> Result<Vec<Round>, RoundError> {
    let mut rounds: Vec<Round> = Vec::with_capacity(names.len());
    for raw in names {
        let name = raw.trim();
        if name.is_empty() {
            return Err(RoundError::EmptyName);
        }
        if rounds.iter().any(|r| r.name == name) {
            return Err(RoundError::DuplicateName(name.to_string()));
        }
        rounds.push(Round::new(name));
    }
    Ok(rounds)
}

pub fn find<'a>(rounds: &'a [Round], name: &str) -> Option<&'a Round> {
    rounds.iter().find(|r| r.name == name)
}

/// Marks a round as in-progress. Idempotent: starting an already-started
/// round changes nothing and reports `false` so the caller can skip the
/// write-back. Starting a completed round is an error.
pub fn start(rounds: &mut [Round], name: &str) -> Result<bool, RoundError> {
    let round = rounds
        .iter_mut()
        .find(|r| r.name == name)
        .ok_or_else(|| RoundError::NotFound(name.to_string()))?;

    match round.status {
        RoundStatus::Completed => Err(RoundError::AlreadyCompleted(name.to_string())),
        RoundStatus::InProgress => Ok(false),
        RoundStatus::NotStarted => {
            round.status = RoundStatus::InProgress;
            Ok(true)
        }
    }
}

/// Marks a round completed with the given summary, unconditionally: a round
/// that was never started may be completed directly (skip-ahead), and
/// re-completing overwrites the previous summary (last write wins).
pub fn complete(rounds: &mut [Round], name: &str, summary: String) -> Result<(), RoundError> {
    let round = rounds
        .iter_mut()
        .find(|r| r.name == name)
        .ok_or_else(|| RoundError::NotFound(name.to_string()))?;

    round.summary = summary;
    round.status = RoundStatus::Completed;
    Ok(())
}
