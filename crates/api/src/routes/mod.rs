pub mod admin;
pub mod auth;
pub mod credit;
pub mod health;
pub mod mrv;
pub mod project;
pub mod public;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                       register (public)
/// /auth/login                          login (public)
/// /auth/refresh                        refresh (public)
/// /auth/logout                         logout (requires auth)
/// /auth/me                             current profile
///
/// /projects                            list, create
/// /projects/{id}                       get
/// /projects/{id}/submit                owner: draft -> submitted
/// /projects/{id}/review                admin: submitted -> under_review
/// /projects/{id}/approve               admin: -> approved
/// /projects/{id}/reject                admin: -> rejected
/// /projects/{id}/activate              admin: approved -> active
/// /projects/{id}/complete              admin: active -> completed
/// /projects/{id}/mrv                   list, create submission (multipart)
/// /projects/{id}/credits               list lots; admin: issue credit lot
///
/// /mrv                                 list own (admin: pending queue)
/// /mrv/{id}/verify                     admin: pending -> verified
/// /mrv/{id}/reject                     admin: pending -> rejected
///
/// /credits                             list lots owned by caller
/// /credits/{id}                        get lot
/// /credits/{id}/transfer               owner: transfer (full or partial)
/// /credits/{id}/retire                 owner: retire
/// /credits/{id}/transactions           lot transaction history
/// /transactions                        transactions involving caller
///
/// /admin/users                         list profiles (admin only)
/// /admin/users/{id}/role               reassign role (admin only)
/// /admin/projects                      review queue (admin only)
///
/// /public/projects                     approved projects (no auth)
/// /public/transactions                 anonymized transaction log (no auth)
/// /public/stats                        aggregate statistics (no auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (register, login, refresh, logout, me).
        .nest("/auth", auth::router())
        // Project registry and lifecycle transitions.
        .nest("/projects", project::router())
        // MRV submission queue and verification decisions.
        .nest("/mrv", mrv::router())
        // Credit ledger: lots and ledger operations.
        .nest("/credits", credit::router())
        // Caller-scoped transaction history.
        .nest("/transactions", credit::transactions_router())
        // Profile administration.
        .nest("/admin", admin::router())
        // Unauthenticated read-only projection.
        .nest("/public", public::router())
}
