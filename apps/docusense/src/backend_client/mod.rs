/// Backend Client — the single point of entry for all calls to the analysis backend.
///
/// ARCHITECTURAL RULE: orchestrators never build HTTP requests themselves.
/// Every upload goes through `AnalysisTransport`, so tests can swap in a fake.
///
/// No retries and no timeout: a hung backend keeps the submission in flight.
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

pub mod envelope;

const ANALYZE_RESUME_PATH: &str = "/api/analyze-resume";
const ANALYZE_DOCUMENT_PATH: &str = "/api/analyze-document";
const HEALTH_PATH: &str = "/health";
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// The fixed set of backend analysis endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    AnalyzeResume,
    AnalyzeDocument,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::AnalyzeResume => ANALYZE_RESUME_PATH,
            Endpoint::AnalyzeDocument => ANALYZE_DOCUMENT_PATH,
        }
    }

    /// Message used when the backend answers 2xx but refuses the analysis without a `detail`.
    pub fn failure_label(self) -> &'static str {
        match self {
            Endpoint::AnalyzeResume => "Resume analysis failed",
            Endpoint::AnalyzeDocument => "Document analysis failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    #[error("Failed to reach analysis backend: {0}")]
    Unreachable(String),

    #[error("Invalid response from server: {0}")]
    InvalidBody(String),

    /// Non-2xx answer. The message is the backend `detail` or `Server error: <status>`.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// 2xx answer whose envelope status is not `"ok"`.
    #[error("{0}")]
    Rejected(String),
}

/// A file captured from the browser upload, held in memory for one submission.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    #[cfg(test)]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Browsers post an empty, nameless part when no file was chosen.
    pub fn is_empty(&self) -> bool {
        self.filename.trim().is_empty() && self.bytes.is_empty()
    }

    /// Declared content type, or one inferred from the file extension.
    pub fn content_type(&self) -> &str {
        match self.content_type.as_deref() {
            Some(declared) if !declared.trim().is_empty() && declared != FALLBACK_CONTENT_TYPE => {
                declared
            }
            _ => content_type_for(&self.filename),
        }
    }
}

fn content_type_for(filename: &str) -> &'static str {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "pdf" => "application/pdf",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "doc" => "application/msword",
        "txt" => "text/plain",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        _ => FALLBACK_CONTENT_TYPE,
    }
}

/// Multipart form for one analysis call: exactly one `file` part plus text fields.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisForm {
    pub file: UploadedFile,
    pub fields: Vec<(String, String)>,
}

impl AnalysisForm {
    pub fn new(file: UploadedFile) -> Self {
        Self {
            file,
            fields: Vec::new(),
        }
    }

    pub fn with_fields(mut self, fields: Vec<(String, String)>) -> Self {
        self.fields.extend(fields);
        self
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn into_multipart(self) -> Form {
        let AnalysisForm { file, fields } = self;
        let content_type = file.content_type().to_string();
        let length = file.bytes.len() as u64;
        // `Bytes` clones share one buffer.
        let part = || {
            Part::stream_with_length(file.bytes.clone(), length).file_name(file.filename.clone())
        };
        let file_part = part().mime_str(&content_type).unwrap_or_else(|_| part());

        fields
            .into_iter()
            .fold(Form::new().part("file", file_part), |form, (name, value)| {
                form.text(name, value)
            })
    }
}

/// Seam between orchestrators and the network.
///
/// `submit` resolves with the parsed envelope when the backend answered 2xx
/// with `status == "ok"`, and with a `TransportError` otherwise.
#[async_trait]
pub trait AnalysisTransport: Send + Sync {
    async fn submit(&self, endpoint: Endpoint, form: AnalysisForm) -> Result<Value, TransportError>;

    /// True when the backend health probe answered 2xx.
    async fn health(&self) -> bool;
}

/// reqwest-backed transport against `{base_url}{endpoint}`.
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl AnalysisTransport for BackendClient {
    async fn submit(&self, endpoint: Endpoint, form: AnalysisForm) -> Result<Value, TransportError> {
        let url = self.url(endpoint.path());
        debug!("POST {} ({} bytes)", url, form.file.bytes.len());

        let response = self
            .client
            .post(&url)
            .multipart(form.into_multipart())
            .send()
            .await
            .map_err(|e| {
                warn!("Analysis backend unreachable at {}: {}", url, e);
                TransportError::Unreachable(e.to_string())
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Unreachable(e.to_string()))?;

        debug!("Backend answered {} for {}", status, endpoint.path());
        envelope::interpret(status, &body, endpoint.failure_label())
    }

    async fn health(&self) -> bool {
        match self.client.get(self.url(HEALTH_PATH)).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!("Backend health probe failed: {}", e);
                false
            }
        }
    }
}
