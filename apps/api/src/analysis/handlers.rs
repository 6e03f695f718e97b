//! Axum route handlers for the Analysis API. Every route requires a session.

use axum::{
    extract::{Multipart, State},
    http::header,
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::analysis::analyzer::{analyze, AnalysisRequest, AnalysisResult};
use crate::analysis::extract::{extract, ExtractionError};
use crate::analysis::insights::{
    career_roadmap, skill_gap, CareerRoadmap, RoadmapRequest, SkillGapReport, SkillGapRequest,
};
use crate::auth::session::AuthSession;
use crate::errors::AppError;
use crate::state::AppState;

/// Multipart field carrying the uploaded résumé.
const RESUME_FIELD: &str = "resume";

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub text: String,
    pub length: usize,
}

/// POST /api/analyze/extract-pdf
///
/// Accepts a multipart upload with a `resume` PDF field and returns its normalized text.
pub async fn handle_extract_pdf(
    AuthSession(session): AuthSession,
    mut multipart: Multipart,
) -> Result<Json<ExtractResponse>, AppError> {
    let mut upload: Option<Bytes> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.body_text()))?
    {
        if field.name() == Some(RESUME_FIELD) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(e.body_text()))?;
            upload = Some(bytes);
            break;
        }
    }
    let bytes = upload.ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;

    info!(
        "{} uploaded a {} byte resume",
        session.username,
        bytes.len()
    );

    // pdf-extract is CPU-bound and may panic on malformed input.
    let document = tokio::task::spawn_blocking(move || extract(&bytes))
        .await
        .map_err(|e| ExtractionError::Failed(format!("PDF parser crashed: {e}")))??;

    Ok(Json(ExtractResponse {
        length: document.char_count,
        text: document.text,
    }))
}

/// POST /api/analyze/run
pub async fn handle_analyze(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<AnalysisResult>, AppError> {
    info!("{} requested a {:?} analysis", session.username, request.mode);
    let result = analyze(state.llm.as_ref(), &request).await?;
    Ok(Json(result))
}

/// POST /api/analyze/download
///
/// Same as `/run`, but the report comes back as a plain-text attachment.
pub async fn handle_download_report(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Json(request): Json<AnalysisRequest>,
) -> Result<impl IntoResponse, AppError> {
    info!("{} requested a {:?} report download", session.username, request.mode);
    let result = analyze(state.llm.as_ref(), &request).await?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        result.mode.report_file_name()
    );
    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        result.report_text,
    ))
}

/// POST /api/analyze/skill-gap
pub async fn handle_skill_gap(
    State(state): State<AppState>,
    AuthSession(_session): AuthSession,
    Json(request): Json<SkillGapRequest>,
) -> Result<Json<SkillGapReport>, AppError> {
    let report = skill_gap(state.llm.as_ref(), &request).await?;
    Ok(Json(report))
}

/// POST /api/analyze/career-roadmap
pub async fn handle_career_roadmap(
    State(state): State<AppState>,
    AuthSession(_session): AuthSession,
    Json(request): Json<RoadmapRequest>,
) -> Result<Json<CareerRoadmap>, AppError> {
    let roadmap = career_roadmap(state.llm.as_ref(), &request).await?;
    Ok(Json(roadmap))
}
