//! Route definitions for the `/projects` resource, including the nested
//! MRV submission and credit issuance routes.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{credit, mrv, project};
use crate::state::AppState;

/// Project routes, nested under `/projects`.
///
/// ```text
/// GET    /                      list_projects
/// POST   /                      create_project
/// GET    /{id}                  get_project
/// POST   /{id}/submit           submit_project (owner)
/// POST   /{id}/review           start_review (admin)
/// POST   /{id}/approve          approve_project (admin)
/// POST   /{id}/reject           reject_project (admin)
/// POST   /{id}/activate         activate_project (admin)
/// POST   /{id}/complete         complete_project (admin)
/// GET    /{id}/mrv              list_for_project
/// POST   /{id}/mrv              create_submission (owner, multipart)
/// GET    /{id}/credits          list_project_credits
/// POST   /{id}/credits          issue_credits (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list_projects).post(project::create_project))
        .route("/{id}", get(project::get_project))
        .route("/{id}/submit", post(project::submit_project))
        .route("/{id}/review", post(project::start_review))
        .route("/{id}/approve", post(project::approve_project))
        .route("/{id}/reject", post(project::reject_project))
        .route("/{id}/activate", post(project::activate_project))
        .route("/{id}/complete", post(project::complete_project))
        .route(
            "/{id}/mrv",
            get(mrv::list_for_project).post(mrv::create_submission),
        )
        .route(
            "/{id}/credits",
            get(credit::list_project_credits).post(credit::issue_credits),
        )
}
