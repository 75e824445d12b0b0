pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::documents::handlers as document_handlers;
use crate::layout::handlers as layout_handlers;
use crate::matching::handlers as matching_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Catalog
        .route(
            "/api/v1/templates",
            get(layout_handlers::handle_list_templates),
        )
        .route(
            "/api/v1/export-formats",
            get(layout_handlers::handle_export_formats),
        )
        // Resume API
        .route(
            "/api/v1/resumes/analyze",
            post(matching_handlers::handle_analyze),
        )
        .route("/api/v1/resumes/export", post(layout_handlers::handle_export))
        .route(
            "/api/v1/resumes/compress",
            post(layout_handlers::handle_compress),
        )
        // Documents API
        .route(
            "/api/v1/cover-letters",
            post(document_handlers::handle_cover_letter),
        )
        .route(
            "/api/v1/portfolios",
            post(document_handlers::handle_portfolio),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, HeaderMap, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::layout::default_page_config;
    use crate::llm_client::DisabledGenerator;

    fn test_router() -> Router {
        build_router(AppState {
            config: Config::for_tests(),
            text_generator: Arc::new(DisabledGenerator),
            page_config: default_page_config(),
        })
    }

    async fn send_raw(
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, HeaderMap, Vec<u8>) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(b) => builder
                .header("content-type", "application/json")
                .body(Body::from(b.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = test_router().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, bytes.to_vec())
    }

    async fn send(method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, _, bytes) = send_raw(method, uri, body).await;
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send("GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "folio-api");
    }

    #[tokio::test]
    async fn test_list_templates() {
        let (status, body) = send("GET", "/api/v1/templates", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["templates"].as_array().unwrap().len(), 6);
        assert_eq!(body["templates"][0]["id"], "professional");
    }

    #[tokio::test]
    async fn test_export_formats_mark_docx_unavailable() {
        let (_, body) = send("GET", "/api/v1/export-formats", None).await;
        let docx = body["formats"]
            .as_array()
            .unwrap()
            .iter()
            .find(|f| f["id"] == "docx")
            .unwrap();
        assert_eq!(docx["available"], false);
    }

    #[tokio::test]
    async fn test_analyze_requires_job_description() {
        let (status, body) = send(
            "POST",
            "/api/v1/resumes/analyze",
            Some(json!({"resume_text": "Rust developer"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Job description is required");
    }

    #[tokio::test]
    async fn test_analyze_requires_resume_content() {
        let (status, body) = send(
            "POST",
            "/api/v1/resumes/analyze",
            Some(json!({"job_description": "Rust developer", "profile": {}})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Resume content not found");
    }

    #[tokio::test]
    async fn test_analyze_scores_resume() {
        let (status, body) = send(
            "POST",
            "/api/v1/resumes/analyze",
            Some(json!({
                "job_description": "Looking for a Python developer with AWS and Docker experience",
                "resume_text": "Experienced Python developer skilled in Docker and CI/CD"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["match_score"].as_u64().unwrap() > 0);
        assert!(body["missing_keywords"]
            .as_array()
            .unwrap()
            .contains(&json!("aws")));
        assert!(body["suggestions"].as_array().unwrap().len() <= 5);
    }

    #[tokio::test]
    async fn test_analyze_falls_back_to_profile() {
        let (status, body) = send(
            "POST",
            "/api/v1/resumes/analyze",
            Some(json!({
                "job_description": "Rust engineer with tokio experience",
                "profile": {"name": "Ada", "skills": "Rust, tokio"}
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["overlapping_keywords"]
            .as_array()
            .unwrap()
            .contains(&json!("rust")));
    }

    #[tokio::test]
    async fn test_export_txt_and_unknown_format_fallback() {
        for format in ["txt", "rtf"] {
            let (status, body) = send(
                "POST",
                "/api/v1/resumes/export",
                Some(json!({"format": format, "profile": {"name": "Ada Lovelace"}})),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["format"], "txt");
            assert!(body["resume"].as_str().unwrap().starts_with("ADA LOVELACE"));
        }
    }

    #[tokio::test]
    async fn test_export_html() {
        let (status, body) = send(
            "POST",
            "/api/v1/resumes/export",
            Some(json!({"format": "html", "template": "modern", "profile": {"name": "Ada"}})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["resume"].as_str().unwrap().contains("Segoe UI"));
    }

    #[tokio::test]
    async fn test_export_pdf_returns_document() {
        let (status, headers, bytes) = send_raw(
            "POST",
            "/api/v1/resumes/export",
            Some(json!({
                "format": "pdf",
                "profile": {"name": "Ada Lovelace", "summary": "Engineer.", "skills": "Rust"}
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"resume_ada_lovelace.pdf\""
        );
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn test_export_pdf_debug_returns_layout() {
        let (status, body) = send(
            "POST",
            "/api/v1/resumes/export?debug=true",
            Some(json!({
                "format": "pdf",
                "profile": {"name": "Ada Lovelace", "summary": "Engineer.", "skills": "Rust"}
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["format"], "pdf");
        // A sparse profile is underfilled and runs the whole degradation budget.
        assert_eq!(body["layout"]["verdict"], "underfilled");
        assert!(body["layout"]["iterations"].as_u64().unwrap() > 1);
        assert_eq!(body["layout"]["blocks"][0]["text"], "Ada Lovelace");
    }

    #[tokio::test]
    async fn test_export_docx_rejected() {
        let (status, _) = send(
            "POST",
            "/api/v1/resumes/export",
            Some(json!({"format": "docx", "profile": {}})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_export_unknown_template_uses_default() {
        let (status, body) = send(
            "POST",
            "/api/v1/resumes/export",
            Some(json!({"format": "txt", "template": "fancy", "profile": {"name": "Ada Lovelace"}})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["resume"].as_str().unwrap().starts_with("ADA LOVELACE"));
    }

    #[tokio::test]
    async fn test_compress_profile() {
        let (status, body) = send(
            "POST",
            "/api/v1/resumes/compress",
            Some(json!({"profile": {
                "summary": "One.\nTwo.\nThree.\nFour.",
                "projects": "ProjectA\n- bullet1\n- bullet2\n- bullet3"
            }})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["profile"]["summary"], "One.\nTwo.\nThree.");
        assert_eq!(body["profile"]["projects"], "ProjectA\n- bullet1\n- bullet2");
    }

    #[tokio::test]
    async fn test_cover_letter_falls_back_to_template() {
        let (status, body) = send(
            "POST",
            "/api/v1/cover-letters",
            Some(json!({
                "job_title": "Backend Engineer",
                "company_name": "Initech",
                "profile": {"name": "Ada Lovelace"}
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "template");
        let letter = body["cover_letter"].as_str().unwrap();
        assert!(letter.starts_with("Dear Hiring Manager,"));
        assert!(letter.contains("Backend Engineer position at Initech"));
        assert!(letter.ends_with("Ada Lovelace"));
    }

    #[tokio::test]
    async fn test_cover_letter_requires_name() {
        let (status, body) = send("POST", "/api/v1/cover-letters", Some(json!({"profile": {}}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Profile name is required");
    }

    #[tokio::test]
    async fn test_portfolio_template() {
        let (status, body) = send(
            "POST",
            "/api/v1/portfolios",
            Some(json!({
                "use_ai": false,
                "profile": {"name": "Ada", "email": "ada@example.com", "skills": "Rust"}
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "template");
        let portfolio = body["portfolio"].as_str().unwrap();
        assert!(portfolio.starts_with("Ada's Portfolio\n"));
        assert!(portfolio.contains("Skills:\nRust"));
        assert!(portfolio.ends_with("Contact: ada@example.com\n"));
    }
}
