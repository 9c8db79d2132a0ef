//! Route definitions for the `/admin` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Admin routes, nested under `/admin`.
///
/// ```text
/// GET    /users               list_users (admin only)
/// PUT    /users/{id}/role     set_role (admin only)
/// GET    /projects            list_review_queue (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(admin::list_users))
        .route("/users/{id}/role", put(admin::set_role))
        .route("/projects", get(admin::list_review_queue))
}
