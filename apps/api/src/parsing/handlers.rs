//! Axum route handlers for the Parsing API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::models::ResumeRecord;
use crate::parsing::pdf::{extract_lines_blocking, PdfError};
use crate::parsing::segmenter::SectionSplit;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LinesRequest {
    pub lines: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ParsedFile {
    pub filename: String,
    pub record: ResumeRecord,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/parse
/// Multipart upload of one or more PDF résumés. Every file part is parsed in
/// upload order; a file that fails to decode fails the whole request.
pub async fn handle_parse_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Vec<ParsedFile>>, AppError> {
    let mut parsed = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read '{filename}': {e}")))?;

        let lines = extract_lines_blocking(bytes.to_vec())
            .await
            .map_err(|e| match e {
                PdfError::Decode(msg) => PdfError::Decode(format!("{filename}: {msg}")),
                other => other,
            })?;

        let record = state.parser.parse(&lines).await;
        info!(file = %filename, lines = lines.len(), "resume parsed");
        parsed.push(ParsedFile { filename, record });
    }

    if parsed.is_empty() {
        return Err(AppError::Validation(
            "Upload at least one PDF file".to_string(),
        ));
    }
    Ok(Json(parsed))
}

/// POST /api/v1/resumes/extract
/// Runs the full pipeline over pre-extracted lines.
pub async fn handle_extract(
    State(state): State<AppState>,
    Json(req): Json<LinesRequest>,
) -> Result<Json<ResumeRecord>, AppError> {
    Ok(Json(state.parser.parse(&req.lines).await))
}

/// POST /api/v1/resumes/sections
/// Heuristic segmentation only; never calls the model.
pub async fn handle_sections(
    State(state): State<AppState>,
    Json(req): Json<LinesRequest>,
) -> Result<Json<SectionSplit>, AppError> {
    Ok(Json(state.parser.sections(&req.lines)))
}
