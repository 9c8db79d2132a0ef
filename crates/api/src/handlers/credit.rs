//! Handlers for the credit ledger: issuance, transfer, retirement, and
//! transaction history.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Datelike;
use serde::Deserialize;

use bluecarbon_core::error::CoreError;
use bluecarbon_core::ledger::{self, RetirementReason};
use bluecarbon_core::serial::generate_serial;
use bluecarbon_core::types::DbId;
use bluecarbon_db::models::credit::{CarbonCredit, IssueCredit};
use bluecarbon_db::repositories::{CreditRepo, ProfileRepo, TransactionRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::project::load_project;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/* --------------------------------------------------------------------------
Request types
-------------------------------------------------------------------------- */

/// Request body for `POST /projects/{id}/credits`.
#[derive(Debug, Deserialize)]
pub struct IssueRequest {
    pub credit_amount: f64,
    /// Defaults to the current year.
    pub vintage_year: Option<i32>,
}

/// Request body for `POST /credits/{id}/transfer`.
#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    pub amount: f64,
    pub recipient_id: DbId,
    pub price_per_credit: Option<f64>,
    pub notes: Option<String>,
}

/// Request body for `POST /credits/{id}/retire`.
#[derive(Debug, Deserialize)]
pub struct RetireRequest {
    pub reason: String,
}

/* --------------------------------------------------------------------------
Handlers
-------------------------------------------------------------------------- */

/// POST /api/v1/projects/{project_id}/credits
///
/// Admin issues a new credit lot against an approved (or later) project.
/// The issuing admin becomes the initial owner.
pub async fn issue_credits(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<IssueRequest>,
) -> AppResult<impl IntoResponse> {
    ledger::validate_issue_amount(input.credit_amount)?;

    let project = load_project(&state, project_id).await?;
    ledger::ensure_project_eligible(project.status)?;

    let vintage_year = input
        .vintage_year
        .unwrap_or_else(|| chrono::Utc::now().date_naive().year());
    let issue = IssueCredit {
        project_id,
        serial_number: generate_serial(vintage_year),
        credit_amount: input.credit_amount,
        vintage_year,
        current_owner_id: admin.profile_id,
        issue_date: chrono::Utc::now().date_naive(),
    };

    let outcome = CreditRepo::issue(&state.pool, &issue).await?;

    tracing::info!(
        credit_id = %outcome.credit.id,
        project_id = %project_id,
        amount = outcome.credit.credit_amount,
        serial = %outcome.credit.serial_number,
        "Credit lot issued"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: outcome })))
}

/// GET /api/v1/credits
///
/// List the lots currently owned by the caller.
pub async fn list_credits(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let credits = CreditRepo::list_for_owner(&state.pool, auth.profile_id).await?;
    Ok(Json(DataResponse { data: credits }))
}

/// GET /api/v1/projects/{project_id}/credits
///
/// List the lots issued against a project. Project owner or admin only.
pub async fn list_project_credits(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let project = load_project(&state, project_id).await?;
    crate::handlers::project::ensure_owner_or_admin(&auth, &project)?;

    let credits = CreditRepo::list_for_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: credits }))
}

/// GET /api/v1/credits/{id}
///
/// Fetch a single lot. Owner or admin only.
pub async fn get_credit(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let credit = load_credit(&state, id).await?;
    ensure_owner_or_admin(&auth, &credit)?;
    Ok(Json(DataResponse { data: credit }))
}

/// POST /api/v1/credits/{id}/transfer
///
/// Transfer all or part of a lot to another profile. A partial transfer
/// splits the lot: the recipient gets a lot of the requested amount and the
/// sender keeps a remainder lot.
pub async fn transfer_credit(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<TransferRequest>,
) -> AppResult<impl IntoResponse> {
    let credit = load_credit(&state, id).await?;
    if credit.current_owner_id != auth.profile_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the current owner may transfer this lot".into(),
        )));
    }

    // Cheap rejections before touching the ledger: closed lot, bad amount,
    // unknown recipient, self-transfer.
    ledger::ensure_transferable(credit.status)?;
    ledger::validate_transfer_amount(input.amount, credit.credit_amount)?;
    if input.recipient_id == auth.profile_id {
        return Err(AppError::Core(CoreError::Validation(
            "Cannot transfer a lot to yourself".into(),
        )));
    }
    ProfileRepo::find_by_id(&state.pool, input.recipient_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Profile",
                id: input.recipient_id,
            })
        })?;

    let outcome = CreditRepo::transfer(
        &state.pool,
        id,
        auth.profile_id,
        input.recipient_id,
        input.amount,
        input.price_per_credit,
        input.notes.as_deref(),
    )
    .await?;

    tracing::info!(
        credit_id = %id,
        from = %auth.profile_id,
        to = %input.recipient_id,
        amount = input.amount,
        partial = outcome.remainder_lot.is_some(),
        "Credit lot transferred"
    );

    Ok(Json(DataResponse { data: outcome }))
}

/// POST /api/v1/credits/{id}/retire
///
/// Permanently retire a lot, claiming it as an offset. The reason must come
/// from the closed retirement-reason set.
pub async fn retire_credit(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<RetireRequest>,
) -> AppResult<impl IntoResponse> {
    let credit = load_credit(&state, id).await?;
    if credit.current_owner_id != auth.profile_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the current owner may retire this lot".into(),
        )));
    }
    ledger::ensure_retirable(credit.status)?;
    let reason = RetirementReason::from_name(&input.reason)?;

    let outcome = CreditRepo::retire(&state.pool, id, auth.profile_id, reason).await?;

    tracing::info!(
        credit_id = %id,
        owner = %auth.profile_id,
        reason = reason.as_str(),
        "Credit lot retired"
    );

    Ok(Json(DataResponse { data: outcome }))
}

/// GET /api/v1/credits/{id}/transactions
///
/// Transaction history for a lot. Owner or admin only.
pub async fn list_credit_transactions(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let credit = load_credit(&state, id).await?;
    ensure_owner_or_admin(&auth, &credit)?;

    let transactions = TransactionRepo::list_for_credit(&state.pool, id).await?;
    Ok(Json(DataResponse { data: transactions }))
}

/// GET /api/v1/transactions
///
/// All transactions the caller participated in.
pub async fn list_my_transactions(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let transactions = TransactionRepo::list_for_profile(&state.pool, auth.profile_id).await?;
    Ok(Json(DataResponse { data: transactions }))
}

/* --------------------------------------------------------------------------
Helpers
-------------------------------------------------------------------------- */

/// Load a credit lot or fail with 404.
async fn load_credit(state: &AppState, id: DbId) -> AppResult<CarbonCredit> {
    CreditRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "CarbonCredit",
                id,
            })
        })
}

/// Reject callers that are neither the lot owner nor an admin.
fn ensure_owner_or_admin(auth: &AuthUser, credit: &CarbonCredit) -> AppResult<()> {
    if auth.is_admin() || credit.current_owner_id == auth.profile_id {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(
            "Not the owner of this credit lot".into(),
        )))
    }
}
