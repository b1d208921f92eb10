use axum::Json;
use serde::Serialize;

use crate::models::roles::{DEFAULT_ROLE, JOB_ROLES};

#[derive(Debug, Serialize)]
pub struct RolesResponse {
    pub roles: &'static [&'static str],
    pub default_role: &'static str,
}

/// GET /api/roles
pub async fn roles_handler() -> Json<RolesResponse> {
    Json(RolesResponse {
        roles: &JOB_ROLES,
        default_role: DEFAULT_ROLE,
    })
}
