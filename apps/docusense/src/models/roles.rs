/// Roles offered by the role picker, in display order.
///
/// Requests may still name any other role; the backend falls back on its own.
pub const JOB_ROLES: [&str; 10] = [
    "Software Engineer",
    "Data Scientist",
    "DevOps Engineer",
    "Product Manager",
    "Full Stack Developer",
    "Machine Learning Engineer",
    "UI/UX Designer",
    "Frontend Developer",
    "Backend Developer",
    "Mobile Developer",
];

pub const DEFAULT_ROLE: &str = JOB_ROLES[0];

/// Trims `role`, falling back to `DEFAULT_ROLE` when it is blank or absent.
pub fn resolve_role(role: Option<&str>) -> String {
    role.map(str::trim)
        .filter(|r| !r.is_empty())
        .unwrap_or(DEFAULT_ROLE)
        .to_string()
}
