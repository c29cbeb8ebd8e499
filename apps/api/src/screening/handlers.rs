//! Axum route handlers for the Screening API.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::TextGenerator;
use crate::models::ResumeRecord;
use crate::screening::agents::{describe_job, interview_questions, score_candidate};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct JobBriefRequest {
    pub brief: String,
}

#[derive(Debug, Serialize)]
pub struct JobDescriptionResponse {
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct CandidateRequest {
    pub job_description: String,
    pub resume: ResumeRecord,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub analysis: String,
}

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub questions: String,
}

fn generator(state: &AppState) -> Result<Arc<dyn TextGenerator>, AppError> {
    state.llm.clone().ok_or_else(|| {
        AppError::Unavailable("No language model is configured (set ANTHROPIC_API_KEY)".to_string())
    })
}

/// POST /api/v1/jobs/description
pub async fn handle_job_description(
    State(state): State<AppState>,
    Json(req): Json<JobBriefRequest>,
) -> Result<Json<JobDescriptionResponse>, AppError> {
    let llm = generator(&state)?;
    let description = describe_job(llm.as_ref(), &req.brief).await?;
    Ok(Json(JobDescriptionResponse { description }))
}

/// POST /api/v1/resumes/score
pub async fn handle_score(
    State(state): State<AppState>,
    Json(req): Json<CandidateRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    let llm = generator(&state)?;
    let analysis = score_candidate(llm.as_ref(), &req.job_description, &req.resume).await?;
    Ok(Json(ScoreResponse { analysis }))
}

/// POST /api/v1/interviews/questions
pub async fn handle_interview_questions(
    State(state): State<AppState>,
    Json(req): Json<CandidateRequest>,
) -> Result<Json<QuestionsResponse>, AppError> {
    let llm = generator(&state)?;
    let questions = interview_questions(llm.as_ref(), &req.job_description, &req.resume).await?;
    Ok(Json(QuestionsResponse { questions }))
}
