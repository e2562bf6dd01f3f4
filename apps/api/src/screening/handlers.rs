//! Axum route handlers for the screening API.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::scoring::{JobProfile, ScoringConfig};
use crate::screening::ranking::{
    evaluate_document, rank_candidates, CandidateScore, FailedCandidate,
};
use crate::screening::upload::{parse_screening_form, validate_min_experience, SkillListInput};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub candidate_id: Option<String>,
    pub resume_text: String,
    #[serde(default)]
    pub job_text: String,
    #[serde(default)]
    pub required_skills: SkillListInput,
    #[serde(default)]
    pub optional_skills: SkillListInput,
    #[serde(default)]
    pub min_experience_years: f64,
}

#[derive(Debug, Serialize)]
pub struct RankingResponse {
    pub evaluation_id: Uuid,
    pub evaluated_at: DateTime<Utc>,
    pub candidates: Vec<CandidateScore>,
    pub failures: Vec<FailedCandidate>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/ats/score
///
/// Scores already-extracted résumé text against a job profile.
pub async fn handle_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<CandidateScore>, AppError> {
    let job = JobProfile {
        job_text: request.job_text,
        required: request.required_skills.into(),
        optional: request.optional_skills.into(),
        min_experience_years: validate_min_experience(request.min_experience_years)?,
    };

    let breakdown = state.engine.score(&request.resume_text, &job);

    Ok(Json(CandidateScore {
        candidate_id: request.candidate_id.unwrap_or_else(|| "resume-1".to_string()),
        breakdown,
    }))
}

/// POST /api/v1/ats/evaluate
///
/// Single-résumé multipart upload. A corrupt document fails the request
/// with 422 instead of becoming a failure row.
pub async fn handle_evaluate(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<CandidateScore>, AppError> {
    let form = parse_screening_form(multipart).await?;

    let mut documents = form.documents.into_iter();
    let document = documents
        .next()
        .ok_or_else(|| AppError::Validation("a 'resume' file is required".to_string()))?;
    if documents.next().is_some() {
        return Err(AppError::Validation(
            "evaluate accepts one résumé; use /api/v1/ats/rank for batches".to_string(),
        ));
    }

    let engine = Arc::clone(&state.engine);
    let job = form.job;
    let candidate = tokio::task::spawn_blocking(move || evaluate_document(&engine, &job, &document))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("evaluation task failed: {e}")))??;

    info!(
        candidate_id = %candidate.candidate_id,
        final_score = candidate.breakdown.final_score,
        "Evaluated candidate"
    );

    Ok(Json(candidate))
}

/// POST /api/v1/ats/rank
///
/// Multipart batch: job configuration plus one or more `resume` files.
/// Returns candidates ranked by final score; unreadable documents are
/// reported in `failures`.
pub async fn handle_rank(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<RankingResponse>, AppError> {
    let form = parse_screening_form(multipart).await?;
    if form.documents.is_empty() {
        return Err(AppError::Validation(
            "at least one 'resume' file is required".to_string(),
        ));
    }

    let report = rank_candidates(
        Arc::clone(&state.engine),
        Arc::new(form.job),
        form.documents,
    )
    .await;

    Ok(Json(RankingResponse {
        evaluation_id: Uuid::new_v4(),
        evaluated_at: Utc::now(),
        candidates: report.candidates,
        failures: report.failures,
    }))
}

/// GET /api/v1/ats/config
///
/// Returns the active scoring configuration (weights, bounds, penalty rules).
pub async fn handle_get_config(State(state): State<AppState>) -> Json<ScoringConfig> {
    Json(state.engine.config().clone())
}
