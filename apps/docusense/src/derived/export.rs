//! Plain-text exports offered as downloads.

use crate::models::analysis::{DocumentAnalysis, ResumeAnalysis};

const EMPTY_LIST: &str = "N/A";

/// What is being exported. The variant decides the template.
#[derive(Debug, Clone, Copy)]
pub enum ExportSubject<'a> {
    Resume(&'a ResumeAnalysis),
    Document(&'a DocumentAnalysis),
}

/// Resumes export their summary verbatim; documents get the full report.
pub fn to_export_text(subject: ExportSubject<'_>) -> String {
    match subject {
        ExportSubject::Resume(resume) => resume.summary.clone(),
        ExportSubject::Document(doc) => format!(
            "Document Analysis Report\n\nFilename: {}\nType: {}\n\nSummary:\n{}\n\nKey Points:\n{}\n\nSentiment: {}",
            doc.filename,
            doc.document_type,
            doc.summary,
            numbered(&doc.key_points, "\n"),
            doc.sentiment,
        ),
    }
}

pub fn export_file_name(subject: ExportSubject<'_>) -> String {
    match subject {
        ExportSubject::Resume(_) => "resume-summary.txt".to_string(),
        ExportSubject::Document(doc) => format!("analysis-{}.txt", doc.filename),
    }
}

pub fn to_interview_export_text(role: &str, questions: &[String]) -> String {
    format!("Interview Questions for {role}\n\n{}", numbered(questions, "\n\n"))
}

pub fn interview_export_file_name(role: &str) -> String {
    format!("interview-questions-{}.txt", slug(role))
}

/// `1. a<sep>2. b`, or `N/A` for an empty list.
fn numbered(items: &[String], separator: &str) -> String {
    if items.is_empty() {
        return EMPTY_LIST.to_string();
    }
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item))
        .collect::<Vec<_>>()
        .join(separator)
}

/// Lowercases and collapses whitespace runs into `-`.
fn slug(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}
