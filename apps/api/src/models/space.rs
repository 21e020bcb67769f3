use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Lifecycle status of one interview round. Transitions are forward-only:
/// `NotStarted` → `InProgress` → `Completed` (see `space::rounds`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

/// One named interview stage embedded in a Space.
///
/// Invariant: `summary` is non-empty if and only if `status == Completed`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Round {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub status: RoundStatus,
    #[serde(default)]
    pub summary: String,
}

impl Round {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            status: RoundStatus::NotStarted,
            summary: String::new(),
        }
    }
}

/// One candidate's interview-preparation workspace for a company/role.
///
/// Rounds are embedded as a JSONB array with value semantics: every round
/// mutation loads the full row, edits the round in memory and writes the
/// whole array back as one unit (last writer wins).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SpaceRow {
    pub id: Uuid,
    pub owner_id: String,
    pub company_name: String,
    pub job_position: String,
    pub job_description: String,
    /// Object-storage key of the uploaded resume file.
    pub resume_key: String,
    /// Plain text extracted from the resume at creation time.
    pub resume_text: String,
    /// AI-condensed resume text used as context for question generation.
    /// Produced once at creation, never regenerated.
    pub purified_summary: String,
    pub rounds: Json<Vec<Round>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
