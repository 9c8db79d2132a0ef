//! Handlers for MRV submissions: upload, listing, and the single
//! verification decision.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use bluecarbon_core::error::CoreError;
use bluecarbon_core::hashing::sha256_hex;
use bluecarbon_core::mrv::{self, VerificationStatus};
use bluecarbon_core::types::DbId;
use bluecarbon_db::models::mrv_submission::{CreateMrvSubmission, MrvSubmission};
use bluecarbon_db::repositories::MrvRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::project::{ensure_owner_or_admin, load_project};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for the verify/reject decision endpoints.
#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
    /// Free-text review notes persisted alongside the decision.
    pub notes: Option<String>,
}

/// GET /api/v1/mrv
///
/// List the caller's submissions across their projects; admins get the
/// pending review queue instead.
pub async fn list_submissions(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let submissions = if auth.is_admin() {
        MrvRepo::list_pending(&state.pool).await?
    } else {
        MrvRepo::list_for_owner(&state.pool, auth.profile_id).await?
    };
    Ok(Json(DataResponse { data: submissions }))
}

/// GET /api/v1/projects/{project_id}/mrv
///
/// List all submissions for a project. Owner or admin only.
pub async fn list_for_project(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let project = load_project(&state, project_id).await?;
    ensure_owner_or_admin(&auth, &project)?;

    let submissions = MrvRepo::list_for_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: submissions }))
}

/// POST /api/v1/projects/{project_id}/mrv
///
/// Create a submission from a multipart form. Accepts an optional `file`
/// part (stored under the caller's scope) plus text parts for the remaining
/// fields. The data source falls back to the file extension when not
/// stated. Owner only.
pub async fn create_submission(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let project = load_project(&state, project_id).await?;
    if project.owner_id != auth.profile_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the project owner may upload monitoring data".into(),
        )));
    }

    let mut submission_date: Option<NaiveDate> = None;
    let mut data_source: Option<String> = None;
    let mut carbon_measurement: Option<f64> = None;
    let mut biomass_data: Option<serde_json::Value> = None;
    let mut data_summary: Option<serde_json::Value> = None;
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field
                    .file_name()
                    .unwrap_or("upload")
                    .to_string();
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::Core(CoreError::TransientIo(format!("Upload interrupted: {e}")))
                })?;
                upload = Some((file_name, bytes.to_vec()));
            }
            "submission_date" => {
                let text = read_text_field(field).await?;
                let parsed = text.parse::<NaiveDate>().map_err(|_| {
                    AppError::Core(CoreError::Validation(format!(
                        "Invalid submission_date '{text}'. Expected YYYY-MM-DD"
                    )))
                })?;
                submission_date = Some(parsed);
            }
            "data_source" => data_source = Some(read_text_field(field).await?),
            "carbon_measurement" => {
                let text = read_text_field(field).await?;
                let parsed = text.parse::<f64>().map_err(|_| {
                    AppError::Core(CoreError::Validation(format!(
                        "Invalid carbon_measurement '{text}'"
                    )))
                })?;
                carbon_measurement = Some(parsed);
            }
            "biomass_data" => biomass_data = Some(read_json_field(field).await?),
            "data_summary" => data_summary = Some(read_json_field(field).await?),
            // Unknown parts are ignored rather than rejected.
            _ => {}
        }
    }

    let file_path = match &upload {
        Some((file_name, bytes)) => Some(
            state
                .storage
                .store(auth.profile_id, file_name, bytes)
                .await?,
        ),
        None => None,
    };

    let data_source = data_source.unwrap_or_else(|| {
        upload
            .as_ref()
            .map(|(name, _)| mrv::infer_data_source(name).to_string())
            .unwrap_or_else(|| mrv::SOURCE_OTHER.to_string())
    });

    let input = CreateMrvSubmission {
        submission_date: submission_date
            .unwrap_or_else(|| chrono::Utc::now().date_naive()),
        data_source,
        carbon_measurement,
        biomass_data,
        data_summary,
        file_path,
    };
    input.validate()?;
    mrv::validate_new_submission(&input.data_source, input.carbon_measurement)?;

    // Opaque audit token over the submission's identifying content.
    let ledger_hash = sha256_hex(
        format!(
            "{}|{}|{}|{}",
            project_id,
            input.submission_date,
            input.data_source,
            input.file_path.as_deref().unwrap_or("-")
        )
        .as_bytes(),
    );

    let created = MrvRepo::create(&state.pool, project_id, &input, &ledger_hash).await?;

    tracing::info!(
        submission_id = %created.id,
        project_id = %project_id,
        data_source = %created.data_source,
        "MRV submission created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// POST /api/v1/mrv/{id}/verify
///
/// Admin verifies a pending submission. Stamps `verified_by`/`verified_at`
/// and persists the review notes; the measurement itself is untouched.
pub async fn verify_submission(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<DecisionRequest>,
) -> AppResult<impl IntoResponse> {
    decide(state, id, VerificationStatus::Verified, admin.profile_id, input.notes).await
}

/// POST /api/v1/mrv/{id}/reject
///
/// Admin rejects a pending submission. Terminal; there is no re-queue.
pub async fn reject_submission(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<DecisionRequest>,
) -> AppResult<impl IntoResponse> {
    decide(state, id, VerificationStatus::Rejected, admin.profile_id, input.notes).await
}

/* --------------------------------------------------------------------------
Helpers
-------------------------------------------------------------------------- */

/// Shared decision path for verify/reject.
async fn decide(
    state: AppState,
    id: DbId,
    decision: VerificationStatus,
    admin_id: DbId,
    notes: Option<String>,
) -> AppResult<Json<DataResponse<MrvSubmission>>> {
    let current = MrvRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "MrvSubmission",
                id,
            })
        })?;

    mrv::ensure_decision(current.verification_status, decision)?;

    let updated = MrvRepo::decide(&state.pool, id, decision, admin_id, notes.as_deref())
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Submission was decided concurrently; reload to see the outcome".into(),
            ))
        })?;

    tracing::info!(
        submission_id = %id,
        admin_id = %admin_id,
        decision = %decision,
        "MRV submission decided"
    );

    Ok(Json(DataResponse { data: updated }))
}

/// Read a multipart text part.
async fn read_text_field(field: axum::extract::multipart::Field<'_>) -> AppResult<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Unreadable form field: {e}")))
}

/// Read a multipart part as JSON.
async fn read_json_field(
    field: axum::extract::multipart::Field<'_>,
) -> AppResult<serde_json::Value> {
    let text = read_text_field(field).await?;
    serde_json::from_str(&text)
        .map_err(|e| AppError::Core(CoreError::Validation(format!("Invalid JSON field: {e}"))))
}
