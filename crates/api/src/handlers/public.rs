//! Handlers for the unauthenticated `/public` explorer.
//!
//! No extractor here reads the caller's identity; the projection queries
//! select only approved projects and the response types carry no owner or
//! counterparty fields.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use bluecarbon_db::repositories::PublicRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/public/projects
///
/// All approved projects, most recently approved first.
pub async fn list_projects(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let projects = PublicRepo::approved_projects(&state.pool).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/v1/public/transactions
///
/// The full credit transaction log, anonymized.
pub async fn list_transactions(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let transactions = PublicRepo::transactions(&state.pool).await?;
    Ok(Json(DataResponse { data: transactions }))
}

/// GET /api/v1/public/stats
///
/// Aggregate registry statistics.
pub async fn stats(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let stats = PublicRepo::stats(&state.pool).await?;
    Ok(Json(DataResponse { data: stats }))
}
