pub mod health;
pub mod roles;

use axum::{
    extract::DefaultBodyLimit,
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::analysis::{Document, Resume};
use crate::interview::handlers as interview;
use crate::state::AppState;
use crate::view_state::handlers as view;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/backend/health", get(health::backend_health_handler))
        .route("/api/roles", get(roles::roles_handler))
        // View state
        .route("/api/view", get(view::handle_get_view))
        .route("/api/view/tab", post(view::handle_select_tab))
        .route("/api/view/sidebar/toggle", post(view::handle_toggle_sidebar))
        .route("/api/view/sidebar/collapse", post(view::handle_toggle_collapsed))
        .route("/api/history/:id/select", post(view::handle_select_recent))
        // Resume analysis
        .route("/api/resume", get(analysis::handle_snapshot::<Resume>))
        .route(
            "/api/resume/analyze",
            post(analysis::handle_analyze::<Resume>).layer(upload_limit),
        )
        .route("/api/resume/history", get(analysis::handle_history::<Resume>))
        .route(
            "/api/resume/history/:id/select",
            post(analysis::handle_select_history::<Resume>),
        )
        .route("/api/resume/chart", get(analysis::handle_resume_chart))
        .route("/api/resume/export", get(analysis::handle_export::<Resume>))
        // Document analysis
        .route("/api/document", get(analysis::handle_snapshot::<Document>))
        .route(
            "/api/document/analyze",
            post(analysis::handle_analyze::<Document>).layer(upload_limit),
        )
        .route("/api/document/history", get(analysis::handle_history::<Document>))
        .route(
            "/api/document/history/:id/select",
            post(analysis::handle_select_history::<Document>),
        )
        .route("/api/document/export", get(analysis::handle_export::<Document>))
        // Interview prep
        .route(
            "/api/interview/questions",
            get(interview::handle_get_questions).post(interview::handle_generate_questions),
        )
        .route("/api/interview/export", get(interview::handle_export_questions))
        .with_state(state)
}

/// `text/plain` download with a suggested file name.
pub fn text_attachment(file_name: &str, body: String) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", file_name.replace('"', "'"));
    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::backend_client::{envelope, TransportError};
    use crate::config::Config;
    use crate::test_support::{document_payload, resume_payload, FakeTransport};

    const BOUNDARY: &str = "docusense-test-boundary";

    fn app(transport: Arc<FakeTransport>) -> Router {
        app_with_upload_limit(transport, 25 * 1024 * 1024)
    }

    fn app_with_upload_limit(transport: Arc<FakeTransport>, max_upload_bytes: usize) -> Router {
        let config = Config {
            backend_url: "http://backend.test".to_string(),
            port: 0,
            rust_log: "info".to_string(),
            max_upload_bytes,
        };
        build_router(AppState::new(config, transport))
    }

    enum FormPart<'a> {
        File { filename: &'a str, bytes: &'a [u8] },
        Text { name: &'a str, value: &'a str },
    }

    fn multipart(uri: &str, parts: &[FormPart<'_>]) -> Request<Body> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                FormPart::File { filename, bytes } => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(bytes);
                }
                FormPart::Text { name, value } => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}").as_bytes(),
                    );
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::post(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn post_empty(uri: &str) -> Request<Body> {
        Request::post(uri).body(Body::empty()).unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    async fn send_text(app: &Router, request: Request<Body>) -> (StatusCode, Option<String>, String) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, disposition, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn resume_upload(filename: &str) -> Request<Body> {
        multipart(
            "/api/resume/analyze",
            &[
                FormPart::File { filename, bytes: b"%PDF-1.4" },
                FormPart::Text { name: "job_role", value: "Data Scientist" },
            ],
        )
    }

    #[tokio::test]
    async fn test_health() {
        let app = app(Arc::new(FakeTransport::new()));
        let (status, body) = send(&app, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "docusense");
    }

    #[tokio::test]
    async fn test_backend_health_reports_probe() {
        let app = app(Arc::new(FakeTransport::new().healthy()));
        let (_, body) = send(&app, get("/api/backend/health")).await;
        assert_eq!(body["reachable"], true);
        assert_eq!(body["backend_url"], "http://backend.test");
    }

    #[tokio::test]
    async fn test_roles_catalog() {
        let app = app(Arc::new(FakeTransport::new()));
        let (_, body) = send(&app, get("/api/roles")).await;
        assert_eq!(body["roles"].as_array().unwrap().len(), 10);
        assert_eq!(body["default_role"], "Software Engineer");
    }

    #[tokio::test]
    async fn test_resume_submission_end_to_end() {
        let transport = Arc::new(FakeTransport::new().respond_ok(resume_payload()));
        let app = app(transport.clone());

        let (status, entry) = send(&app, resume_upload("r.pdf")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(entry["analysis"]["metrics"]["ats_score"], 82.0);
        assert_eq!(entry["filename"], "r.pdf");
        assert_eq!(entry["role"], "Data Scientist");

        let (_, snapshot) = send(&app, get("/api/resume")).await;
        assert_eq!(snapshot["phase"], "succeeded");
        assert_eq!(snapshot["history_len"], 1);
        assert_eq!(snapshot["result"]["analysis"]["keywords_matched"], json!(["python", "sql"]));

        let (_, history) = send(&app, get("/api/resume/history")).await;
        assert_eq!(history[0]["filename"], "r.pdf");

        let (_, form) = transport.last_call().unwrap();
        assert_eq!(form.field("job_role"), Some("Data Scientist"));
        assert_eq!(form.field("job_description"), None);
    }

    #[tokio::test]
    async fn test_submission_without_file_makes_no_backend_call() {
        let transport = Arc::new(FakeTransport::new().respond_ok(resume_payload()));
        let app = app(transport.clone());

        let request = multipart(
            "/api/resume/analyze",
            &[FormPart::Text { name: "job_role", value: "Data Scientist" }],
        );
        let (status, body) = send(&app, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Please upload a resume file!");
        assert_eq!(transport.call_count(), 0);

        let (_, snapshot) = send(&app, get("/api/resume")).await;
        assert_eq!(snapshot["phase"], "idle");
        assert_eq!(snapshot["result"], Value::Null);
        assert_eq!(snapshot.get("message"), None);
    }

    #[tokio::test]
    async fn test_backend_failure_recorded_with_detail() {
        let transport = Arc::new(FakeTransport::new().respond_err(TransportError::Server {
            status: 500,
            message: "internal error".to_string(),
        }));
        let app = app(transport);

        let (status, body) = send(&app, resume_upload("r.pdf")).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "ANALYSIS_FAILED");
        assert_eq!(body["error"]["message"], "internal error");
        assert!(body["error"]["hint"].is_string());

        let (_, snapshot) = send(&app, get("/api/resume")).await;
        assert_eq!(snapshot["phase"], "failed");
        assert_eq!(snapshot["message"], "internal error");
        assert_eq!(snapshot["result"], Value::Null);
        assert_eq!(snapshot["history_len"], 0);
    }

    #[tokio::test]
    async fn test_resume_chart_series() {
        let app = app(Arc::new(FakeTransport::new().respond_ok(resume_payload())));

        let (_, empty) = send(&app, get("/api/resume/chart")).await;
        assert_eq!(empty["series"], json!([]));

        send(&app, resume_upload("r.pdf")).await;
        let (_, chart) = send(&app, get("/api/resume/chart")).await;
        assert_eq!(chart["series"][0]["name"], "python");
        assert_eq!(chart["series"][0]["value"], 40);
        assert_eq!(chart["series"][1]["value"], 31);
        assert_eq!(chart["series"][2]["fill"], "#10b981");
    }

    #[tokio::test]
    async fn test_chart_keeps_backend_skill_order() {
        let body = r#"{"status":"ok","skill_distribution":{"sql":20.5,"python":45,"aws":34.5}}"#;
        let payload = envelope::interpret(200, body, "Resume analysis failed").unwrap();
        let app = app(Arc::new(FakeTransport::new().respond_ok(payload)));

        send(&app, resume_upload("r.pdf")).await;
        let (_, chart) = send(&app, get("/api/resume/chart")).await;

        let names: Vec<&str> = chart["series"]
            .as_array()
            .unwrap()
            .iter()
            .map(|slice| slice["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["sql", "python", "aws"]);
        assert_eq!(chart["series"][0]["value"], 21);

        let (_, snapshot) = send(&app, get("/api/resume")).await;
        let keys: Vec<&str> = snapshot["result"]["analysis"]["skill_distribution"]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["sql", "python", "aws"]);
    }

    #[tokio::test]
    async fn test_multi_megabyte_upload_reaches_backend() {
        let transport = Arc::new(FakeTransport::new().respond_ok(resume_payload()));
        let app = app(transport.clone());
        let scan = vec![b'a'; 3 * 1024 * 1024];

        let request = multipart(
            "/api/resume/analyze",
            &[FormPart::File { filename: "scan.pdf", bytes: &scan }],
        );
        let (status, _) = send(&app, request).await;

        assert_eq!(status, StatusCode::OK);
        let (_, form) = transport.last_call().unwrap();
        assert_eq!(form.file.bytes.len(), scan.len());
    }

    #[tokio::test]
    async fn test_upload_over_configured_limit_rejected() {
        let transport = Arc::new(FakeTransport::new().respond_ok(document_payload()));
        let app = app_with_upload_limit(transport.clone(), 1024);
        let big = vec![b'a'; 4096];

        let request = multipart(
            "/api/document/analyze",
            &[FormPart::File { filename: "memo.txt", bytes: &big }],
        );
        let (status, body) = send(&app, request).await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"]["code"], "PAYLOAD_TOO_LARGE");
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_document_export_download() {
        let app = app(Arc::new(FakeTransport::new().respond_ok(document_payload())));

        let (status, body) = send(&app, get("/api/document/export")).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["message"], "Please analyze a document first!");

        let upload = multipart(
            "/api/document/analyze",
            &[FormPart::File { filename: "memo.txt", bytes: b"hello" }],
        );
        let (status, _) = send(&app, upload).await;
        assert_eq!(status, StatusCode::OK);

        let (status, disposition, text) = send_text(&app, get("/api/document/export")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            disposition.as_deref(),
            Some("attachment; filename=\"analysis-memo.txt.txt\"")
        );
        assert!(text.starts_with("Document Analysis Report\n\nFilename: memo.txt\n"));
        assert!(text.ends_with("Sentiment: neutral"));
    }

    #[tokio::test]
    async fn test_resume_export_is_summary() {
        let app = app(Arc::new(FakeTransport::new().respond_ok(resume_payload())));
        send(&app, resume_upload("r.pdf")).await;

        let (_, disposition, text) = send_text(&app, get("/api/resume/export")).await;
        assert_eq!(text, "Strong data background.");
        assert_eq!(
            disposition.as_deref(),
            Some("attachment; filename=\"resume-summary.txt\"")
        );
    }

    #[tokio::test]
    async fn test_history_selection_by_kind_and_by_tab() {
        let transport = FakeTransport::new()
            .respond_ok(resume_payload())
            .respond_ok(resume_payload())
            .respond_ok(document_payload());
        let app = app(Arc::new(transport));

        let (_, first) = send(&app, resume_upload("first.pdf")).await;
        send(&app, resume_upload("second.pdf")).await;
        let upload = multipart(
            "/api/document/analyze",
            &[FormPart::File { filename: "memo.txt", bytes: b"hello" }],
        );
        let (_, doc) = send(&app, upload).await;

        let first_id = first["id"].as_str().unwrap();
        let (status, selected) = send(
            &app,
            post_empty(&format!("/api/resume/history/{first_id}/select")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(selected["filename"], "first.pdf");
        let (_, snapshot) = send(&app, get("/api/resume")).await;
        assert_eq!(snapshot["result"]["filename"], "first.pdf");

        // Resume tab is active: a document id is unknown there.
        let doc_id = doc["id"].as_str().unwrap();
        let (status, _) = send(&app, post_empty(&format!("/api/history/{doc_id}/select"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        send(&app, post_json("/api/view/tab", json!({ "tab": "document" }))).await;
        let (status, selected) =
            send(&app, post_empty(&format!("/api/history/{doc_id}/select"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(selected["kind"], "document");
        assert_eq!(selected["entry"]["analysis"]["document_type"], "Memo");
    }

    #[tokio::test]
    async fn test_view_state_endpoints() {
        let app = app(Arc::new(FakeTransport::new()));

        let (_, view) = send(&app, post_empty("/api/view/sidebar/toggle")).await;
        assert_eq!(view["sidebar_open"], true);

        let (_, view) = send(&app, post_json("/api/view/tab", json!({ "tab": "interview" }))).await;
        assert_eq!(view["active_tab"], "interview");
        assert_eq!(view["sidebar_open"], false);

        let (_, view) = send(&app, post_empty("/api/view/sidebar/collapse")).await;
        assert_eq!(view["sidebar_collapsed"], true);

        let (_, view) = send(&app, get("/api/view")).await;
        assert_eq!(view["active_tab"], "interview");
        assert_eq!(view["sidebar_collapsed"], true);
    }

    #[tokio::test]
    async fn test_interview_questions_flow() {
        let app = app(Arc::new(FakeTransport::new().respond_ok(resume_payload())));

        let (status, body) = send(&app, post_empty("/api/interview/questions")).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["message"], "Please analyze a resume first!");

        let (status, _) = send(&app, get("/api/interview/export")).await;
        assert_eq!(status, StatusCode::CONFLICT);

        send(&app, resume_upload("r.pdf")).await;
        let (status, set) = send(&app, post_empty("/api/interview/questions")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(set["role"], "Data Scientist");
        assert_eq!(set["questions"].as_array().unwrap().len(), 5);
        assert_eq!(
            set["questions"][1],
            "How would you approach learning new technologies to enhance your skillset for this Data Scientist position?"
        );

        let (_, set) = send(
            &app,
            post_json("/api/interview/questions", json!({ "role": "Product Manager" })),
        )
        .await;
        assert_eq!(set["role"], "Product Manager");
        let (_, current) = send(&app, get("/api/interview/questions")).await;
        assert_eq!(current, set);

        let (_, disposition, text) = send_text(&app, get("/api/interview/export")).await;
        assert_eq!(
            disposition.as_deref(),
            Some("attachment; filename=\"interview-questions-product-manager.txt\"")
        );
        assert!(text.starts_with("Interview Questions for Product Manager\n\n1. Based on your experience with python and sql"));
    }
}
