//! Axum route handlers for the Space API: creation (resume upload →
//! extraction → summarization → persist), listing, detail, resume download,
//! and the round-start state transition.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use aws_sdk_s3::primitives::ByteStream;
use chrono::Utc;
use serde::Deserialize;
use sqlx::types::Json as SqlJson;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::{self, ResumeFormat};
use crate::models::space::SpaceRow;
use crate::space::rounds;
use crate::space::summarize::{self, JOB_DESCRIPTION_SENTINEL};
use crate::state::AppState;

/// Parsed multipart payload for space creation.
#[derive(Debug, Default)]
struct CreateSpaceForm {
    owner_id: String,
    company_name: String,
    job_position: String,
    job_description: Option<String>,
    round_names: Vec<String>,
    resume: Option<(String, bytes::Bytes)>,
}

async fn read_create_form(mut multipart: Multipart) -> Result<CreateSpaceForm, AppError> {
    let mut form = CreateSpaceForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart payload: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "owner_id" => form.owner_id = read_text(field).await?,
            "company_name" => form.company_name = read_text(field).await?,
            "job_position" => form.job_position = read_text(field).await?,
            "job_description" => form.job_description = Some(read_text(field).await?),
            "round" => form.round_names.push(read_text(field).await?),
            "resume" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("failed to read resume: {e}")))?;
                form.resume = Some((filename, data));
            }
            _ => {}
        }
    }

    Ok(form)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart field: {e}")))
}

/// POST /api/v1/spaces
///
/// Creates an interview space. The pipeline is all-or-nothing: resume
/// extraction and summarization must both succeed before anything persists.
pub async fn handle_create_space(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = read_create_form(multipart).await?;

    if form.owner_id.trim().is_empty() {
        return Err(AppError::Validation("owner_id is required".to_string()));
    }
    if form.company_name.trim().is_empty() || form.job_position.trim().is_empty() {
        return Err(AppError::Validation(
            "company_name and job_position are required".to_string(),
        ));
    }
    if form.round_names.is_empty() {
        return Err(AppError::Validation(
            "at least one interview round is required".to_string(),
        ));
    }
    let (filename, data) = form
        .resume
        .ok_or_else(|| AppError::Validation("a resume file is required".to_string()))?;
    if data.is_empty() {
        return Err(AppError::Validation("resume file is empty".to_string()));
    }

    let format = ResumeFormat::from_filename(&filename)?;
    let round_list = rounds::build_rounds(&form.round_names)?;

    // Spool the upload to disk; both extractors read from a path.
    let tmp = tempfile::Builder::new()
        .suffix(&format!(".{}", format.extension()))
        .tempfile()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to spool resume upload: {e}")))?;
    std::fs::write(tmp.path(), &data)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to spool resume upload: {e}")))?;

    let path = tmp.path().to_path_buf();
    let resume_text = tokio::task::spawn_blocking(move || extract::extract_text(&path, format))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("extraction task panicked: {e}")))??;

    let job_description = summarize::effective_job_description(form.job_description.as_deref());
    let purified_summary =
        summarize::purify(state.generator.as_ref(), &resume_text, job_description).await?;

    let space_id = Uuid::new_v4();
    let resume_key = format!("resumes/{space_id}/{filename}");
    state
        .s3
        .put_object()
        .bucket(&state.config.s3_bucket)
        .key(&resume_key)
        .body(ByteStream::from(data.to_vec()))
        .send()
        .await
        .map_err(|e| AppError::Storage(format!("failed to archive resume: {e}")))?;

    let now = Utc::now();
    let space = SpaceRow {
        id: space_id,
        owner_id: form.owner_id.trim().to_string(),
        company_name: form.company_name.trim().to_string(),
        job_position: form.job_position.trim().to_string(),
        job_description: job_description
            .map(str::to_string)
            .unwrap_or_else(|| JOB_DESCRIPTION_SENTINEL.to_string()),
        resume_key,
        resume_text,
        purified_summary,
        rounds: SqlJson(round_list),
        created_at: now,
        updated_at: now,
    };

    state.spaces.insert_space(&space).await?;
    info!(
        "Created space {} for '{}' / '{}' with {} rounds",
        space.id,
        space.company_name,
        space.job_position,
        space.rounds.0.len()
    );

    Ok((StatusCode::CREATED, Json(space)))
}

#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    pub owner_id: String,
}

/// GET /api/v1/spaces?owner_id=
pub async fn handle_list_spaces(
    State(state): State<AppState>,
    Query(params): Query<OwnerQuery>,
) -> Result<Json<Vec<SpaceRow>>, AppError> {
    let spaces = state.spaces.list_spaces(&params.owner_id).await?;
    Ok(Json(spaces))
}

/// GET /api/v1/spaces/:id
pub async fn handle_get_space(
    State(state): State<AppState>,
    Path(space_id): Path<Uuid>,
) -> Result<Json<SpaceRow>, AppError> {
    let space = state.spaces.find_space(space_id).await?
        .ok_or(AppError::SpaceNotFound(space_id))?;
    Ok(Json(space))
}

/// GET /api/v1/spaces/:id/resume
///
/// Streams back the archived resume upload.
pub async fn handle_download_resume(
    State(state): State<AppState>,
    Path(space_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let space = state.spaces.find_space(space_id).await?
        .ok_or(AppError::SpaceNotFound(space_id))?;

    let object = state
        .s3
        .get_object()
        .bucket(&state.config.s3_bucket)
        .key(&space.resume_key)
        .send()
        .await
        .map_err(|e| AppError::Storage(format!("failed to fetch resume: {e}")))?;
    let data = object
        .body
        .collect()
        .await
        .map_err(|e| AppError::Storage(format!("failed to read resume body: {e}")))?
        .into_bytes();

    let filename = space
        .resume_key
        .rsplit('/')
        .next()
        .unwrap_or("resume")
        .to_string();

    Ok((
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        data,
    ))
}

/// POST /api/v1/spaces/:id/rounds/:round_name/start
///
/// State-machine `start`: marks the round in-progress. Idempotent — calling
/// it again while in-progress changes nothing and skips the write-back.
pub async fn handle_start_round(
    State(state): State<AppState>,
    Path((space_id, round_name)): Path<(Uuid, String)>,
) -> Result<StatusCode, AppError> {
    let mut space = state.spaces.find_space(space_id).await?
        .ok_or(AppError::SpaceNotFound(space_id))?;

    let changed = rounds::start(&mut space.rounds.0, &round_name)?;
    if changed {
        state.spaces.save_rounds(space_id, &space.rounds.0).await?;
        info!("Round '{round_name}' of space {space_id} is now in progress");
    }

    Ok(StatusCode::NO_CONTENT)
}
