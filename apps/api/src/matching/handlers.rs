//! Axum route handlers for the Matching API.

use std::time::Duration;

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::matching::scorer::{analyze_with_enrichment, MatchResult};
use crate::models::profile::ProfileSnapshot;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub resume_text: String,
    /// Fallback source for the resume text when `resume_text` is empty.
    pub profile: Option<ProfileSnapshot>,
}

/// Picks the explicit resume text, else the text assembled from the profile.
fn resolve_resume_text(req: &AnalyzeRequest) -> Option<String> {
    if !req.resume_text.trim().is_empty() {
        return Some(req.resume_text.clone());
    }
    req.profile
        .as_ref()
        .filter(|p| p.has_content())
        .map(ProfileSnapshot::resume_text)
}

/// POST /api/v1/resumes/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<MatchResult>, AppError> {
    if req.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "Job description is required".to_string(),
        ));
    }

    let resume_text = resolve_resume_text(&req)
        .ok_or_else(|| AppError::Validation("Resume content not found".to_string()))?;

    let result = analyze_with_enrichment(
        &resume_text,
        &req.job_description,
        state.text_generator.as_ref(),
        Duration::from_secs(state.config.llm_timeout_secs),
    )
    .await;

    info!(
        match_score = result.match_score,
        missing = result.missing_keywords.len(),
        "Resume analyzed"
    );

    Ok(Json(result))
}
