//! Route definitions for the unauthenticated `/public` explorer.

use axum::routing::get;
use axum::Router;

use crate::handlers::public;
use crate::state::AppState;

/// Public read-only routes, nested under `/public`.
///
/// ```text
/// GET    /projects        approved projects only
/// GET    /transactions    anonymized transaction log
/// GET    /stats           aggregate statistics
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/projects", get(public::list_projects))
        .route("/transactions", get(public::list_transactions))
        .route("/stats", get(public::stats))
}
