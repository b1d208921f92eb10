// Interview prep: question set derived from the displayed resume result.
// Generated locally from templates; no backend call.

pub mod handlers;

use serde::Serialize;

use crate::analysis::{AnalysisKind, Resume};
use crate::derived::interview::to_interview_questions;
use crate::errors::AppError;
use crate::models::analysis::ResumeAnalysis;
use crate::models::history::HistoryEntry;
use crate::models::roles::resolve_role;

pub const NO_QUESTIONS_MESSAGE: &str = "Please generate interview questions first!";

/// The current question set. Regenerating replaces it wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InterviewSet {
    pub role: Option<String>,
    pub questions: Vec<String>,
}

impl InterviewSet {
    /// Builds a set from the displayed resume result.
    ///
    /// Role precedence: explicit request, then the role the resume was analyzed
    /// for, then the default role.
    pub fn generate(
        resume: Option<&HistoryEntry<ResumeAnalysis>>,
        requested_role: Option<&str>,
    ) -> Result<Self, AppError> {
        let resume = resume.ok_or_else(|| AppError::Precondition(Resume::MISSING_RESULT_MESSAGE.to_string()))?;

        let requested = requested_role.map(str::trim).filter(|r| !r.is_empty());
        let role = resolve_role(requested.or(resume.role.as_deref()));

        Ok(Self {
            questions: to_interview_questions(&resume.result, &role),
            role: Some(role),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
