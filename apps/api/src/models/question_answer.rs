use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One persisted question for a round, optionally answered. Append-only:
/// rows are inserted in bulk at round finish (originals) or one at a time
/// (follow-ups) and never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QuestionAnswerRow {
    pub id: Uuid,
    /// Monotonic insertion counter; `list_by_round` orders by this so batch
    /// order survives timestamp ties.
    pub seq: i64,
    pub space_id: Uuid,
    pub round_name: String,
    pub question: String,
    pub answer: String,
    /// Distinguishes orchestrator-generated follow-ups from the original
    /// question batch.
    pub is_follow_up: bool,
    pub created_at: DateTime<Utc>,
}
