//! Axum route handlers for the Documents API.

use std::time::Duration;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::documents::cover_letter::generate_cover_letter;
use crate::documents::portfolio::generate_portfolio;
use crate::documents::DocumentSource;
use crate::errors::AppError;
use crate::models::profile::ProfileSnapshot;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CoverLetterRequest {
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub profile: ProfileSnapshot,
}

#[derive(Debug, Serialize)]
pub struct CoverLetterResponse {
    pub cover_letter: String,
    pub source: DocumentSource,
}

fn default_use_ai() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct PortfolioRequest {
    #[serde(default = "default_use_ai")]
    pub use_ai: bool,
    #[serde(default)]
    pub profile: ProfileSnapshot,
}

#[derive(Debug, Serialize)]
pub struct PortfolioResponse {
    pub portfolio: String,
    pub source: DocumentSource,
}

fn require_name(profile: &ProfileSnapshot) -> Result<(), AppError> {
    if profile.name.trim().is_empty() {
        return Err(AppError::Validation("Profile name is required".to_string()));
    }
    Ok(())
}

/// POST /api/v1/cover-letters
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    Json(req): Json<CoverLetterRequest>,
) -> Result<Json<CoverLetterResponse>, AppError> {
    require_name(&req.profile)?;

    let doc = generate_cover_letter(
        &req.profile,
        &req.job_title,
        &req.company_name,
        &req.job_description,
        state.text_generator.as_ref(),
        Duration::from_secs(state.config.llm_timeout_secs),
    )
    .await;

    info!(source = ?doc.source, len = doc.text.len(), "Cover letter generated");
    Ok(Json(CoverLetterResponse {
        cover_letter: doc.text,
        source: doc.source,
    }))
}

/// POST /api/v1/portfolios
pub async fn handle_portfolio(
    State(state): State<AppState>,
    Json(req): Json<PortfolioRequest>,
) -> Result<Json<PortfolioResponse>, AppError> {
    require_name(&req.profile)?;

    let doc = generate_portfolio(
        &req.profile,
        req.use_ai,
        state.text_generator.as_ref(),
        Duration::from_secs(state.config.llm_timeout_secs),
    )
    .await;

    info!(source = ?doc.source, use_ai = req.use_ai, "Portfolio generated");
    Ok(Json(PortfolioResponse {
        portfolio: doc.text,
        source: doc.source,
    }))
}
