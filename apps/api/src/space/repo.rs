//! Space Repository — persistence for the `spaces` aggregate.
//!
//! `SpaceStore` is the seam the core talks through; `PgSpaceStore` is the
//! production implementation, unit tests substitute an in-memory store.
//! Rounds live inside the row as JSONB; `save_rounds` replaces the whole
//! array in one statement, which is the only way round state is ever written.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::space::{Round, SpaceRow};

#[async_trait]
pub trait SpaceStore: Send + Sync {
    async fn insert_space(&self, space: &SpaceRow) -> Result<(), AppError>;

    async fn find_space(&self, id: Uuid) -> Result<Option<SpaceRow>, AppError>;

    /// Resolves the space owning a round by scanning the embedded round list
    /// for the round id.
    async fn find_space_by_round(&self, round_id: Uuid) -> Result<Option<SpaceRow>, AppError>;

    async fn list_spaces(&self, owner_id: &str) -> Result<Vec<SpaceRow>, AppError>;

    /// Writes the full round list back as one unit (last writer wins).
    async fn save_rounds(&self, space_id: Uuid, rounds: &[Round]) -> Result<(), AppError>;
}

pub struct PgSpaceStore {
    pool: PgPool,
}

impl PgSpaceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SpaceStore for PgSpaceStore {
    async fn insert_space(&self, space: &SpaceRow) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO spaces
                (id, owner_id, company_name, job_position, job_description,
                 resume_key, resume_text, purified_summary, rounds, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(space.id)
        .bind(&space.owner_id)
        .bind(&space.company_name)
        .bind(&space.job_position)
        .bind(&space.job_description)
        .bind(&space.resume_key)
        .bind(&space.resume_text)
        .bind(&space.purified_summary)
        .bind(&space.rounds)
        .bind(space.created_at)
        .bind(space.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_space(&self, id: Uuid) -> Result<Option<SpaceRow>, AppError> {
        let space = sqlx::query_as::<_, SpaceRow>("SELECT * FROM spaces WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(space)
    }

    async fn find_space_by_round(&self, round_id: Uuid) -> Result<Option<SpaceRow>, AppError> {
        // JSONB containment on the embedded round id.
        let space = sqlx::query_as::<_, SpaceRow>("SELECT * FROM spaces WHERE rounds @> $1")
            .bind(serde_json::json!([{ "id": round_id }]))
            .fetch_optional(&self.pool)
            .await?;
        Ok(space)
    }

    async fn list_spaces(&self, owner_id: &str) -> Result<Vec<SpaceRow>, AppError> {
        let spaces = sqlx::query_as::<_, SpaceRow>(
            "SELECT * FROM spaces WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(spaces)
    }

    async fn save_rounds(&self, space_id: Uuid, rounds: &[Round]) -> Result<(), AppError> {
        sqlx::query("UPDATE spaces SET rounds = $2, updated_at = now() WHERE id = $1")
            .bind(space_id)
            .bind(sqlx::types::Json(rounds))
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
