//! Route definitions for the top-level `/mrv` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::mrv;
use crate::state::AppState;

/// MRV routes, nested under `/mrv`.
///
/// ```text
/// GET    /               list_submissions (own; admins: pending queue)
/// POST   /{id}/verify    verify_submission (admin)
/// POST   /{id}/reject    reject_submission (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(mrv::list_submissions))
        .route("/{id}/verify", post(mrv::verify_submission))
        .route("/{id}/reject", post(mrv::reject_submission))
}
