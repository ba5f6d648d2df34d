//! Axum route handler for the analysis API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::analysis::pdf::{extract_text, is_pdf_name};
use crate::analysis::review::review_resume;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub result: String,
}

#[derive(Debug, Default)]
struct AnalyzeUpload {
    resume: Option<UploadedFile>,
    jd: Option<String>,
}

#[derive(Debug)]
struct UploadedFile {
    file_name: String,
    bytes: Bytes,
}

/// POST /analyze
///
/// Multipart form with `resume` (PDF file) and `jd` (job description text).
/// Returns `{ "result": <report text> }`; failures return `{ "error": <message> }`.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let request_id = Uuid::new_v4();
    analyze(state, multipart)
        .instrument(info_span!("analyze", %request_id))
        .await
}

async fn analyze(state: AppState, multipart: Multipart) -> Result<Json<AnalyzeResponse>, AppError> {
    let upload = read_upload(multipart).await?;
    let (resume, jd) = match (upload.resume, upload.jd) {
        (Some(resume), Some(jd)) => (resume, jd),
        _ => {
            return Err(AppError::Validation(
                "Resume or Job Description missing".to_string(),
            ))
        }
    };

    if resume.file_name.is_empty() {
        return Err(AppError::Validation("No file selected".to_string()));
    }
    if !is_pdf_name(&resume.file_name) {
        return Err(AppError::Validation("Only PDF files are allowed".to_string()));
    }

    info!(
        file_name = %resume.file_name,
        bytes = resume.bytes.len(),
        jd_chars = jd.chars().count(),
        "Analyzing resume"
    );

    let resume_text = extract_text(resume.bytes).await?;
    let result = review_resume(&resume_text, &jd, state.generator.as_ref()).await?;

    info!("Analysis complete");
    Ok(Json(AnalyzeResponse { result }))
}

async fn read_upload(mut multipart: Multipart) -> Result<AnalyzeUpload, AppError> {
    let mut upload = AnalyzeUpload::default();

    while let Some(field) = multipart.next_field().await.map_err(invalid_upload)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(invalid_upload)?;
                upload.resume = Some(UploadedFile { file_name, bytes });
            }
            "jd" => upload.jd = Some(field.text().await.map_err(invalid_upload)?),
            _ => {}
        }
    }

    Ok(upload)
}

fn invalid_upload(err: MultipartError) -> AppError {
    AppError::Validation(format!("Invalid upload: {}", err.body_text()))
}
