//! Axum route handlers for the Export API.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::layout::compressor::compress_profile;
use crate::layout::fitter::{fit_to_page, FitOutcome};
use crate::layout::pdf::{download_filename, render_pdf, PDF_CONTENT_TYPE};
use crate::layout::template::{build_document, ResumeTemplate, TemplateDescriptor};
use crate::models::profile::ProfileSnapshot;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Txt,
    Html,
    Pdf,
    Docx,
}

impl ExportFormat {
    /// Unrecognized or empty formats fall back to plain text.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "html" => ExportFormat::Html,
            "pdf" => ExportFormat::Pdf,
            "docx" => ExportFormat::Docx,
            _ => ExportFormat::Txt,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FormatDescriptor {
    pub id: ExportFormat,
    pub name: &'static str,
    pub available: bool,
}

#[derive(Debug, Serialize)]
pub struct ExportFormatsResponse {
    pub formats: Vec<FormatDescriptor>,
}

#[derive(Debug, Serialize)]
pub struct TemplatesResponse {
    pub templates: Vec<TemplateDescriptor>,
}

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    #[serde(default)]
    pub format: String,
    pub template: Option<String>,
    #[serde(default)]
    pub profile: ProfileSnapshot,
}

/// `?debug=true` returns the fitted pdf layout as JSON instead of the document.
#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub debug: bool,
}

#[derive(Debug, Serialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum ExportResponse {
    Txt { resume: String },
    Html { resume: String },
    Pdf { layout: FitOutcome },
}

#[derive(Debug, Deserialize)]
pub struct CompressRequest {
    #[serde(default)]
    pub profile: ProfileSnapshot,
}

#[derive(Debug, Serialize)]
pub struct CompressResponse {
    pub profile: ProfileSnapshot,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<TemplatesResponse> {
    Json(TemplatesResponse {
        templates: ResumeTemplate::ALL.iter().map(|t| t.descriptor()).collect(),
    })
}

/// GET /api/v1/export-formats
pub async fn handle_export_formats() -> Json<ExportFormatsResponse> {
    Json(ExportFormatsResponse {
        formats: vec![
            FormatDescriptor {
                id: ExportFormat::Txt,
                name: "Plain Text",
                available: true,
            },
            FormatDescriptor {
                id: ExportFormat::Html,
                name: "HTML",
                available: true,
            },
            FormatDescriptor {
                id: ExportFormat::Pdf,
                name: "PDF Document",
                available: true,
            },
            FormatDescriptor {
                id: ExportFormat::Docx,
                name: "Word Document",
                available: false,
            },
        ],
    })
}

/// Missing, blank and unknown names all resolve to the default template.
fn resolve_template(name: Option<&str>) -> ResumeTemplate {
    match name.map(str::trim).filter(|n| !n.is_empty()) {
        None => ResumeTemplate::default(),
        Some(n) => ResumeTemplate::from_name(n).unwrap_or_else(|| {
            warn!(template = n, "Unknown template, using default");
            ResumeTemplate::default()
        }),
    }
}

/// POST /api/v1/resumes/export
pub async fn handle_export(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
    Json(req): Json<ExportRequest>,
) -> Result<Response, AppError> {
    let template = resolve_template(req.template.as_deref());
    let format = ExportFormat::parse(&req.format);

    let response = match format {
        ExportFormat::Txt => Json(ExportResponse::Txt {
            resume: build_document(&req.profile, template).to_plain_text(),
        })
        .into_response(),
        ExportFormat::Html => Json(ExportResponse::Html {
            resume: build_document(&req.profile, template).to_html(),
        })
        .into_response(),
        ExportFormat::Pdf => {
            let page = state.page_config.clone();
            let profile = req.profile;
            let debug = query.debug;
            // Fitting and PDF serialization are CPU-bound.
            let (layout, bytes) = tokio::task::spawn_blocking(move || {
                let layout = fit_to_page(profile, template, &page);
                let bytes = if debug { None } else { Some(render_pdf(&layout, &page)) };
                (layout, bytes)
            })
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in pdf export: {e}")))?;

            match bytes {
                None => Json(ExportResponse::Pdf { layout }).into_response(),
                Some(bytes) => {
                    let disposition = format!(
                        "attachment; filename=\"{}\"",
                        download_filename(&layout.profile.name)
                    );
                    (
                        StatusCode::OK,
                        [
                            (header::CONTENT_TYPE, PDF_CONTENT_TYPE.to_string()),
                            (header::CONTENT_DISPOSITION, disposition),
                        ],
                        bytes?,
                    )
                        .into_response()
                }
            }
        }
        ExportFormat::Docx => {
            return Err(AppError::Validation(
                "DOCX export is not available; use txt, html or pdf".to_string(),
            ))
        }
    };

    info!(?format, ?template, "Resume exported");
    Ok(response)
}

/// POST /api/v1/resumes/compress
pub async fn handle_compress(Json(req): Json<CompressRequest>) -> Json<CompressResponse> {
    Json(CompressResponse {
        profile: compress_profile(&req.profile),
    })
}
