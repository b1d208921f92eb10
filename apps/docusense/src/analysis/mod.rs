// Request orchestration for the two analysis kinds (resume, document).
// One `Orchestrator` per kind owns phase, current result and history.
// All backend traffic goes through backend_client.

pub mod handlers;
pub mod orchestrator;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::backend_client::{Endpoint, UploadedFile};
use crate::derived::export::ExportSubject;
use crate::models::analysis::{DocumentAnalysis, ResumeAnalysis};
use crate::models::roles::resolve_role;

pub use orchestrator::{Orchestrator, Phase, Snapshot, SubmitError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Resume,
    Document,
}

/// One submission as captured from the upload form. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct AnalysisRequest {
    pub file: Option<UploadedFile>,
    pub role: Option<String>,
    pub job_description: Option<String>,
}

#[cfg(test)]
impl AnalysisRequest {
    pub fn with_file(file: UploadedFile) -> Self {
        Self {
            file: Some(file),
            ..Self::default()
        }
    }

    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn job_description(mut self, job_description: impl Into<String>) -> Self {
        self.job_description = Some(job_description.into());
        self
    }
}

/// Static description of an analysis kind: where it posts, which form fields
/// it sends, and what payload comes back.
pub trait AnalysisKind: Send + Sync + 'static {
    type Payload: DeserializeOwned + Serialize + Clone + Send + Sync + 'static;

    const NAME: &'static str;
    const ENDPOINT: Endpoint;
    const MISSING_FILE_MESSAGE: &'static str;
    const MISSING_RESULT_MESSAGE: &'static str;

    /// Text fields sent next to the `file` part.
    fn form_fields(request: &AnalysisRequest) -> Vec<(String, String)>;

    /// Role recorded on the history entry.
    fn entry_role(request: &AnalysisRequest) -> Option<String>;

    fn export_subject(payload: &Self::Payload) -> ExportSubject<'_>;
}

pub struct Resume;

impl AnalysisKind for Resume {
    type Payload = ResumeAnalysis;

    const NAME: &'static str = "resume";
    const ENDPOINT: Endpoint = Endpoint::AnalyzeResume;
    const MISSING_FILE_MESSAGE: &'static str = "Please upload a resume file!";
    const MISSING_RESULT_MESSAGE: &'static str = "Please analyze a resume first!";

    fn form_fields(request: &AnalysisRequest) -> Vec<(String, String)> {
        let mut fields = vec![(
            "job_role".to_string(),
            resolve_role(request.role.as_deref()),
        )];
        if let Some(description) = request
            .job_description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
        {
            fields.push(("job_description".to_string(), description.to_string()));
        }
        fields
    }

    fn entry_role(request: &AnalysisRequest) -> Option<String> {
        Some(resolve_role(request.role.as_deref()))
    }

    fn export_subject(payload: &ResumeAnalysis) -> ExportSubject<'_> {
        ExportSubject::Resume(payload)
    }
}

pub struct Document;

impl AnalysisKind for Document {
    type Payload = DocumentAnalysis;

    const NAME: &'static str = "document";
    const ENDPOINT: Endpoint = Endpoint::AnalyzeDocument;
    const MISSING_FILE_MESSAGE: &'static str = "Please upload a document file!";
    const MISSING_RESULT_MESSAGE: &'static str = "Please analyze a document first!";

    fn form_fields(_request: &AnalysisRequest) -> Vec<(String, String)> {
        Vec::new()
    }

    fn entry_role(_request: &AnalysisRequest) -> Option<String> {
        None
    }

    fn export_subject(payload: &DocumentAnalysis) -> ExportSubject<'_> {
        ExportSubject::Document(payload)
    }
}
