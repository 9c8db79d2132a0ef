//! Route definitions for the `/credits` and `/transactions` resources.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::credit;
use crate::state::AppState;

/// Credit lot routes, nested under `/credits`.
///
/// ```text
/// GET    /                       list_credits
/// GET    /{id}                   get_credit
/// POST   /{id}/transfer          transfer_credit (owner)
/// POST   /{id}/retire            retire_credit (owner)
/// GET    /{id}/transactions      list_credit_transactions
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(credit::list_credits))
        .route("/{id}", get(credit::get_credit))
        .route("/{id}/transfer", post(credit::transfer_credit))
        .route("/{id}/retire", post(credit::retire_credit))
        .route("/{id}/transactions", get(credit::list_credit_transactions))
}

/// Caller-scoped transaction history, nested under `/transactions`.
///
/// ```text
/// GET    /                       list_my_transactions
/// ```
pub fn transactions_router() -> Router<AppState> {
    Router::new().route("/", get(credit::list_my_transactions))
}
