//! In-memory stores and canned generators shared by unit tests.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json as SqlJson;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::ledger::QaStore;
use crate::llm_client::{LlmError, TextGenerator};
use crate::models::question_answer::QuestionAnswerRow;
use crate::models::space::SpaceRow;
use crate::space::repo::SpaceStore;
use crate::space::rounds;

/// Always replies with the same text.
pub struct CannedGenerator {
    reply: String,
}

impl CannedGenerator {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
        }
    }
}

#[async_trait]
impl TextGenerator for CannedGenerator {
    async fn generate_text(&self, _prompt: &str) -> Result<String, LlmError> {
        Ok(self.reply.clone())
    }
}

/// Always fails, standing in for a generation-capability outage.
pub struct FailingGenerator;

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate_text(&self, _prompt: &str) -> Result<String, LlmError> {
        Err(LlmError::Api {
            status: 500,
            message: "synthetic outage".to_string(),
        })
    }
}

/// A space with the given round names, ready to seed a store.
pub fn sample_space(round_names: &[&str]) -> SpaceRow {
    let names: Vec<String> = round_names.iter().map(|n| n.to_string()).collect();
    let now = Utc::now();
    SpaceRow {
        id: Uuid::new_v4(),
        owner_id: "candidate-1".to_string(),
        company_name: "Acme".to_string(),
        job_position: "Backend Engineer".to_string(),
        job_description: "N/A".to_string(),
        resume_key: "resumes/x/resume.pdf".to_string(),
        resume_text: "resume body".to_string(),
        purified_summary: "Strong backend engineer.".to_string(),
        rounds: SqlJson(rounds::build_rounds(&names).unwrap()),
        created_at: now,
        updated_at: now,
    }
}

#[derive(Default)]
pub struct MemSpaceStore {
    spaces: Mutex<Vec<SpaceRow>>,
}

impl MemSpaceStore {
    pub fn with(space: SpaceRow) -> Self {
        Self {
            spaces: Mutex::new(vec![space]),
        }
    }

    /// Current state of a space, for assertions.
    pub fn snapshot(&self, id: Uuid) -> SpaceRow {
        self.spaces
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .expect("space not in store")
    }
}

#[async_trait]
impl SpaceStore for MemSpaceStore {
    async fn insert_space(&self, space: &SpaceRow) -> Result<(), AppError> {
        self.spaces.lock().unwrap().push(space.clone());
        Ok(())
    }

    async fn find_space(&self, id: Uuid) -> Result<Option<SpaceRow>, AppError> {
        Ok(self
            .spaces
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }

    async fn find_space_by_round(&self, round_id: Uuid) -> Result<Option<SpaceRow>, AppError> {
        Ok(self
            .spaces
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.rounds.0.iter().any(|r| r.id == round_id))
            .cloned())
    }

    async fn list_spaces(&self, owner_id: &str) -> Result<Vec<SpaceRow>, AppError> {
        Ok(self
            .spaces
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn save_rounds(
        &self,
        space_id: Uuid,
        rounds: &[crate::models::space::Round],
    ) -> Result<(), AppError> {
        let mut spaces = self.spaces.lock().unwrap();
        let space = spaces
            .iter_mut()
            .find(|s| s.id == space_id)
            .ok_or(AppError::SpaceNotFound(space_id))?;
        space.rounds = SqlJson(rounds.to_vec());
        space.updated_at = Utc::now();
        Ok(())
    }
}

#[derive(Default)]
pub struct MemQaStore {
    rows: Mutex<Vec<QuestionAnswerRow>>,
    next_seq: AtomicI64,
    /// When set, the Nth insert (zero-based) and all later ones fail.
    fail_from: Option<usize>,
}

impl MemQaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_from(n: usize) -> Self {
        Self {
            fail_from: Some(n),
            ..Self::default()
        }
    }

    pub fn rows(&self) -> Vec<QuestionAnswerRow> {
        self.rows.lock().unwrap().clone()
    }

    /// Seeds a row directly, bypassing the failure hook.
    pub fn seed(
        &self,
        space_id: Uuid,
        round_name: &str,
        question: &str,
        answer: &str,
    ) -> QuestionAnswerRow {
        let row = QuestionAnswerRow {
            id: Uuid::new_v4(),
            seq: self.next_seq.fetch_add(1, Ordering::SeqCst),
            space_id,
            round_name: round_name.to_string(),
            question: question.to_string(),
            answer: answer.to_string(),
            is_follow_up: false,
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(row.clone());
        row
    }
}

#[async_trait]
impl QaStore for MemQaStore {
    async fn insert(
        &self,
        space_id: Uuid,
        round_name: &str,
        question: &str,
        answer: &str,
        is_follow_up: bool,
    ) -> Result<(), AppError> {
        if let Some(n) = self.fail_from {
            if self.rows.lock().unwrap().len() >= n {
                return Err(AppError::Internal(anyhow::anyhow!(
                    "synthetic insert failure"
                )));
            }
        }
        let row = QuestionAnswerRow {
            id: Uuid::new_v4(),
            seq: self.next_seq.fetch_add(1, Ordering::SeqCst),
            space_id,
            round_name: round_name.to_string(),
            question: question.to_string(),
            answer: answer.to_string(),
            is_follow_up,
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(row);
        Ok(())
    }

    async fn list_by_round(
        &self,
        space_id: Uuid,
        round_name: &str,
    ) -> Result<Vec<QuestionAnswerRow>, AppError> {
        let mut rows: Vec<QuestionAnswerRow> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.space_id == space_id && r.round_name == round_name)
            .cloned()
            .collect();
        rows.sort_by_key(|r| r.seq);
        Ok(rows)
    }

    async fn get(&self, id: Uuid) -> Result<Option<QuestionAnswerRow>, AppError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }
}
