//! Handlers for the `/projects` resource: registration, listing, and the
//! lifecycle transitions.
//!
//! Every transition handler follows the same shape: load the project (404),
//! check who may act (owner for submit, admin for the rest, enforced by the
//! extractors), check the transition against the lifecycle table (409 on an
//! illegal move), then apply the conditional UPDATE. A `None` from the
//! repository at that point means a concurrent actor won the race.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use bluecarbon_core::error::CoreError;
use bluecarbon_core::hashing::sha256_hex;
use bluecarbon_core::project::{self, ProjectStatus};
use bluecarbon_core::types::DbId;
use bluecarbon_db::models::project::{CreateProject, Project};
use bluecarbon_db::repositories::ProjectRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/projects
///
/// List the caller's projects; admins see every project.
pub async fn list_projects(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let projects = if auth.is_admin() {
        ProjectRepo::list_all(&state.pool).await?
    } else {
        ProjectRepo::list_for_owner(&state.pool, auth.profile_id).await?
    };
    Ok(Json(DataResponse { data: projects }))
}

/// POST /api/v1/projects
///
/// Register a new project. Any authenticated profile may register; the
/// project starts in `draft` unless the body asks for `submitted`.
pub async fn create_project(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    project::validate_new_project(
        &input.name,
        &input.project_type,
        input.area_hectares,
        input.projected_sequestration,
        &input.location,
    )?;

    let status = input.status.unwrap_or(ProjectStatus::Draft);
    if !matches!(status, ProjectStatus::Draft | ProjectStatus::Submitted) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "A new project may only start as 'draft' or 'submitted', not '{status}'"
        ))));
    }

    // Opaque registry token recorded at creation for later audit reference.
    let registry_hash = sha256_hex(
        format!(
            "{}|{}|{}|{}",
            auth.profile_id,
            input.name,
            input.project_type,
            chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
        )
        .as_bytes(),
    );

    let created =
        ProjectRepo::create(&state.pool, auth.profile_id, &input, status, &registry_hash).await?;

    tracing::info!(
        project_id = %created.id,
        owner_id = %auth.profile_id,
        status = %created.status,
        "Project registered"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/v1/projects/{id}
///
/// Fetch a single project. Owner or admin only.
pub async fn get_project(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let project = load_project(&state, id).await?;
    ensure_owner_or_admin(&auth, &project)?;
    Ok(Json(DataResponse { data: project }))
}

/// POST /api/v1/projects/{id}/submit
///
/// Owner submits a draft for review: `draft -> submitted`.
pub async fn submit_project(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let current = load_project(&state, id).await?;
    if current.owner_id != auth.profile_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the project owner may submit it for review".into(),
        )));
    }
    project::ensure_transition(current.status, ProjectStatus::Submitted)?;

    let updated = ProjectRepo::submit(&state.pool, id, auth.profile_id)
        .await?
        .ok_or_else(lost_race)?;

    tracing::info!(project_id = %id, "Project submitted for review");
    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/projects/{id}/review
///
/// Admin takes a submission into review: `submitted -> under_review`.
pub async fn start_review(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let current = load_project(&state, id).await?;
    project::ensure_transition(current.status, ProjectStatus::UnderReview)?;

    let updated = ProjectRepo::start_review(&state.pool, id)
        .await?
        .ok_or_else(lost_race)?;

    tracing::info!(project_id = %id, admin_id = %admin.profile_id, "Project review started");
    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/projects/{id}/approve
///
/// Admin approves: `submitted | under_review -> approved`. Stamps
/// `approved_by`/`approved_at` exactly once.
pub async fn approve_project(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let current = load_project(&state, id).await?;
    project::ensure_transition(current.status, ProjectStatus::Approved)?;

    let updated = ProjectRepo::approve(&state.pool, id, admin.profile_id)
        .await?
        .ok_or_else(lost_race)?;

    tracing::info!(project_id = %id, admin_id = %admin.profile_id, "Project approved");
    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/projects/{id}/reject
///
/// Admin rejects: `submitted | under_review -> rejected`. Terminal; a new
/// review cycle requires a new project registration.
pub async fn reject_project(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let current = load_project(&state, id).await?;
    project::ensure_transition(current.status, ProjectStatus::Rejected)?;

    let updated = ProjectRepo::reject(&state.pool, id)
        .await?
        .ok_or_else(lost_race)?;

    tracing::info!(project_id = %id, admin_id = %admin.profile_id, "Project rejected");
    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/projects/{id}/activate
///
/// Admin activates an approved project: `approved -> active`.
pub async fn activate_project(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let current = load_project(&state, id).await?;
    project::ensure_transition(current.status, ProjectStatus::Active)?;

    let updated = ProjectRepo::activate(&state.pool, id)
        .await?
        .ok_or_else(lost_race)?;

    tracing::info!(project_id = %id, admin_id = %admin.profile_id, "Project activated");
    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/projects/{id}/complete
///
/// Admin completes an active project: `active -> completed`. Terminal.
pub async fn complete_project(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let current = load_project(&state, id).await?;
    project::ensure_transition(current.status, ProjectStatus::Completed)?;

    let updated = ProjectRepo::complete(&state.pool, id)
        .await?
        .ok_or_else(lost_race)?;

    tracing::info!(project_id = %id, admin_id = %admin.profile_id, "Project completed");
    Ok(Json(DataResponse { data: updated }))
}

/* --------------------------------------------------------------------------
Helpers
-------------------------------------------------------------------------- */

/// Load a project or fail with 404.
pub(crate) async fn load_project(state: &AppState, id: DbId) -> AppResult<Project> {
    ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Project",
                id,
            })
        })
}

/// Reject callers that are neither the owner nor an admin.
pub(crate) fn ensure_owner_or_admin(auth: &AuthUser, project: &Project) -> AppResult<()> {
    if auth.is_admin() || project.owner_id == auth.profile_id {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(
            "Not the owner of this project".into(),
        )))
    }
}

/// Conflict returned when a conditional transition updated zero rows.
fn lost_race() -> AppError {
    AppError::Core(CoreError::Conflict(
        "Project status changed concurrently; reload and retry".into(),
    ))
}
