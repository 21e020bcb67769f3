//! Question/Answer Ledger — append-only store of question/answer pairs keyed
//! by space + round. Rows are never updated or deleted; insertion order is
//! preserved by the `seq` column.
//!
//! `QaStore` is the row-level persistence seam (`PgQaStore` in production,
//! in-memory in tests); the batch and follow-up semantics live here, shared
//! by every implementation.

use async_trait::async_trait;
use serde::Deserialize;
use sqlx::PgPool;
use tracing::error;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::question_answer::QuestionAnswerRow;
use crate::models::space::SpaceRow;
use crate::space::rounds;

/// One question with the candidate's answer, as submitted at round finish.
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerPair {
    pub question: String,
    pub answer: String,
}

/// Row-level access to the question/answer collection. The store assigns
/// `id`, `seq` and `created_at` on insert.
#[async_trait]
pub trait QaStore: Send + Sync {
    async fn insert(
        &self,
        space_id: Uuid,
        round_name: &str,
        question: &str,
        answer: &str,
        is_follow_up: bool,
    ) -> Result<(), AppError>;

    /// All rows for a round, oldest first. Re-querying is safe and repeatable.
    async fn list_by_round(
        &self,
        space_id: Uuid,
        round_name: &str,
    ) -> Result<Vec<QuestionAnswerRow>, AppError>;

    async fn get(&self, id: Uuid) -> Result<Option<QuestionAnswerRow>, AppError>;
}

/// Records the original question batch for a round, one row per pair in the
/// given order, all with `is_follow_up = false`.
///
/// The store inserts per record, so a mid-batch failure leaves a prefix of
/// the batch recorded; that is surfaced as `PartialWrite` rather than being
/// retried or rolled back.
pub async fn record_batch(
    store: &dyn QaStore,
    space: &SpaceRow,
    round_name: &str,
    pairs: &[AnswerPair],
) -> Result<(), AppError> {
    if rounds::find(&space.rounds.0, round_name).is_none() {
        return Err(AppError::RoundNotFound(round_name.to_string()));
    }

    let total = pairs.len();
    for (written, pair) in pairs.iter().enumerate() {
        if let Err(e) = store
            .insert(space.id, round_name, &pair.question, &pair.answer, false)
            .await
        {
            if written == 0 {
                return Err(e);
            }
            error!("Answer batch failed after {written}/{total} inserts: {e}");
            return Err(AppError::PartialWrite { written, total });
        }
    }
    Ok(())
}

/// Records a single orchestrator-generated follow-up question with an empty
/// answer.
pub async fn record_follow_up(
    store: &dyn QaStore,
    space_id: Uuid,
    round_name: &str,
    question: &str,
) -> Result<(), AppError> {
    store.insert(space_id, round_name, question, "", true).await
}

pub struct PgQaStore {
    pool: PgPool,
}

impl PgQaStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QaStore for PgQaStore {
    async fn insert(
        &self,
        space_id: Uuid,
        round_name: &str,
        question: &str,
        answer: &str,
        is_follow_up: bool,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO question_answers (id, space_id, round_name, question, answer, is_follow_up)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(space_id)
        .bind(round_name)
        .bind(question)
        .bind(answer)
        .bind(is_follow_up)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_by_round(
        &self,
        space_id: Uuid,
        round_name: &str,
    ) -> Result<Vec<QuestionAnswerRow>, AppError> {
        let rows = sqlx::query_as::<_, QuestionAnswerRow>(
            "SELECT * FROM question_answers WHERE space_id = $1 AND round_name = $2 ORDER BY seq ASC",
        )
        .bind(space_id)
        .bind(round_name)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get(&self, id: Uuid) -> Result<Option<QuestionAnswerRow>, AppError> {
        let row =
            sqlx::query_as::<_, QuestionAnswerRow>("SELECT * FROM question_answers WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_space, MemQaStore};

    fn pairs(entries: &[(&str, &str)]) -> Vec<AnswerPair> {
        entries
            .iter()
            .map(|(q, a)| AnswerPair {
                question: q.to_string(),
                answer: a.to_string(),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_batch_round_trips_in_insertion_order() {
        let space = sample_space(&["HR"]);
        let store = MemQaStore::new();
        let batch = pairs(&[("Q1", "A1"), ("Q2", "A2"), ("Q3", "A3")]);

        record_batch(&store, &space, "HR", &batch).await.unwrap();

        let rows = store.list_by_round(space.id, "HR").await.unwrap();
        assert_eq!(rows.len(), 3);
        for (row, pair) in rows.iter().zip(&batch) {
            assert_eq!(row.question, pair.question);
            assert_eq!(row.answer, pair.answer);
            assert!(!row.is_follow_up);
        }
        assert!(rows.windows(2).all(|w| w[0].seq < w[1].seq));

        // Re-querying is repeatable.
        let again = store.list_by_round(space.id, "HR").await.unwrap();
        assert_eq!(again.len(), 3);
        assert_eq!(again[0].id, rows[0].id);
    }

    #[tokio::test]
    async fn test_batch_requires_round_in_space() {
        let space = sample_space(&["HR"]);
        let store = MemQaStore::new();
        let err = record_batch(&store, &space, "Culture", &pairs(&[("Q", "A")]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::RoundNotFound(_)));
        assert!(store.rows().is_empty());
    }

    #[tokio::test]
    async fn test_mid_batch_failure_surfaces_partial_write() {
        let space = sample_space(&["HR"]);
        let store = MemQaStore::failing_from(2);
        let batch = pairs(&[("Q1", "A1"), ("Q2", "A2"), ("Q3", "A3")]);

        let err = record_batch(&store, &space, "HR", &batch).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::PartialWrite {
                written: 2,
                total: 3
            }
        ));
        assert_eq!(store.rows().len(), 2);
    }

    #[tokio::test]
    async fn test_first_insert_failure_is_not_partial() {
        let space = sample_space(&["HR"]);
        let store = MemQaStore::failing_from(0);
        let err = record_batch(&store, &space, "HR", &pairs(&[("Q", "A")]))
            .await
            .unwrap_err();
        assert!(!matches!(err, AppError::PartialWrite { .. }));
        assert!(store.rows().is_empty());
    }

    #[tokio::test]
    async fn test_follow_up_row_is_flagged_and_unanswered() {
        let space = sample_space(&["HR"]);
        let store = MemQaStore::new();
        record_follow_up(&store, space.id, "HR", "Tell me more.")
            .await
            .unwrap();

        let rows = store.rows();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].is_follow_up);
        assert!(rows[0].answer.is_empty());
        assert_eq!(rows[0].question, "Tell me more.");
    }
}
