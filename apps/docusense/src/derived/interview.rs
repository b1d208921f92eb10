use crate::models::analysis::ResumeAnalysis;

const MISSING_SKILL_FALLBACK: &str = "learning new technologies";

/// Builds the five interview questions for `role` from a resume analysis.
///
/// Deterministic: only the first two matched keywords and the first missing
/// skill are read.
pub fn to_interview_questions(resume: &ResumeAnalysis, role: &str) -> Vec<String> {
    let experience = resume
        .keywords_matched
        .iter()
        .take(2)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" and ");
    let growth_area = resume
        .missing_skills
        .first()
        .map(String::as_str)
        .unwrap_or(MISSING_SKILL_FALLBACK);

    vec![
        format!(
            "Based on your experience with {experience}, can you describe a challenging project you worked on?"
        ),
        format!(
            "How would you approach {growth_area} to enhance your skillset for this {role} position?"
        ),
        "Tell me about a time when you demonstrated leadership or took initiative in your previous role."
            .to_string(),
        format!(
            "What interests you most about working as a {role}, and how does your background align with this role?"
        ),
        "Can you walk me through your problem-solving process when faced with a complex technical challenge?"
            .to_string(),
    ]
}
