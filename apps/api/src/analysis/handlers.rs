//! Axum route handlers for the Resume Analysis API.

use axum::{
    extract::{multipart::MultipartRejection, rejection::JsonRejection, Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analysis::match_score::score_match;
use crate::analysis::{analyze_resume, ResumeAnalysis};
use crate::errors::AppError;
use crate::extraction::{extract_document_text, is_pdf_upload};
use crate::state::AppState;

const UPLOAD_FIELD: &str = "file";
const MODEL_NOT_LOADED: &str = "NLP model not loaded.";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub file_name: Option<String>,
    pub raw_text: String,
    /// `None` when the NLP model is unavailable; the raw text is still returned.
    pub analysis: Option<ResumeAnalysis>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub resume_text: String,
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub score: f64,
    pub score_display: String,
    pub progress: u8,
    pub matched_keywords: Vec<String>,
}

struct Upload {
    file_name: Option<String>,
    content_type: Option<String>,
    data: Bytes,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/analyze
///
/// Multipart upload (field `file`, PDF only). Extracts the text, then detects
/// skills and display entities. Extraction failure stops the request; a
/// missing NLP model only drops the analysis panel.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let mut multipart = multipart?;
    let upload = read_upload(&mut multipart).await?;

    if upload.data.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }
    if !is_pdf_upload(
        upload.file_name.as_deref(),
        upload.content_type.as_deref(),
        &upload.data,
    ) {
        return Err(AppError::Validation("Only PDF uploads are accepted".to_string()));
    }

    let source = state.text_source.clone();
    let model = state.model.clone();
    let vocabulary = state.vocabulary.clone();
    let Upload { file_name, data, .. } = upload;

    let response = tokio::task::spawn_blocking(move || -> Result<AnalyzeResponse, AppError> {
        let raw_text = extract_document_text(source.as_ref(), &data)?;

        let (analysis, warnings) = match model {
            Some(model) => (
                Some(analyze_resume(&raw_text, &vocabulary, model.as_ref())),
                Vec::new(),
            ),
            None => {
                warn!("Skipping analysis panel: {MODEL_NOT_LOADED}");
                (None, vec![MODEL_NOT_LOADED.to_string()])
            }
        };

        Ok(AnalyzeResponse {
            file_name,
            raw_text,
            analysis,
            warnings,
        })
    })
    .await
    .map_err(|e| AppError::Internal(e.into()))??;

    info!(
        chars = response.raw_text.len(),
        skills = response.analysis.as_ref().map(|a| a.skills.len()).unwrap_or(0),
        entities = response.analysis.as_ref().map(|a| a.entities.len()).unwrap_or(0),
        "Resume analyzed"
    );

    Ok(Json(response))
}

/// POST /api/v1/resumes/match
///
/// Keyword-overlap score of `resume_text` against `job_description`.
/// A blank resume is scored like any other and yields 0.
pub async fn handle_match(
    State(state): State<AppState>,
    payload: Result<Json<MatchRequest>, JsonRejection>,
) -> Result<Json<MatchResponse>, AppError> {
    let Json(request) = payload?;
    if request.job_description.trim().is_empty() {
        return Err(AppError::EmptyJobDescription);
    }

    let model = state.model.clone().ok_or(AppError::ModelUnavailable)?;

    let result = tokio::task::spawn_blocking(move || {
        score_match(&request.resume_text, &request.job_description, model.as_ref())
    })
    .await
    .map_err(|e| AppError::Internal(e.into()))??;

    info!(
        score = result.score,
        matched = result.matched_keywords.len(),
        "Match score computed"
    );

    Ok(Json(MatchResponse {
        score: result.score,
        score_display: result.score_display(),
        progress: result.progress(),
        matched_keywords: result.matched_keywords.into_iter().collect(),
    }))
}

async fn read_upload(multipart: &mut Multipart) -> Result<Upload, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(String::from);
        let content_type = field.content_type().map(String::from);
        let data = field.bytes().await?;
        return Ok(Upload {
            file_name,
            content_type,
            data,
        });
    }

    Err(AppError::Validation(format!("Missing multipart field '{UPLOAD_FIELD}'")))
}
