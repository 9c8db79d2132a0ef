//! Handlers for the `/admin` resource: profile administration.
//!
//! Roles are assigned here and only here; registration always yields the
//! `public` role and nothing in the API lets a profile raise its own
//! capability.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use bluecarbon_core::error::CoreError;
use bluecarbon_core::roles::UserRole;
use bluecarbon_core::types::DbId;
use bluecarbon_db::repositories::{ProfileRepo, ProjectRepo, SessionRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /admin/users/{id}/role`.
#[derive(Debug, Deserialize)]
pub struct SetRoleRequest {
    pub role: String,
}

/// GET /api/v1/admin/users
///
/// List all profiles, newest first.
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let profiles = ProfileRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: profiles }))
}

/// GET /api/v1/admin/projects
///
/// Projects awaiting a review decision, oldest first.
pub async fn list_review_queue(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let projects = ProjectRepo::list_in_review(&state.pool).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// PUT /api/v1/admin/users/{id}/role
///
/// Reassign a profile's role. Admins cannot demote themselves, which keeps
/// at least the acting admin in place. Active sessions are revoked so
/// outstanding tokens with the old capability stop being refreshable.
pub async fn set_role(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SetRoleRequest>,
) -> AppResult<impl IntoResponse> {
    let role = UserRole::from_name(&input.role)?;

    if id == admin.profile_id && !role.is_admin() {
        return Err(AppError::Core(CoreError::Validation(
            "Admins cannot revoke their own admin role".into(),
        )));
    }

    let updated = ProfileRepo::set_role(&state.pool, id, role)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Profile",
                id,
            })
        })?;

    SessionRepo::revoke_for_profile(&state.pool, id).await?;

    tracing::info!(profile_id = %id, role = %role, admin_id = %admin.profile_id, "Role reassigned");
    Ok(Json(DataResponse { data: updated }))
}
