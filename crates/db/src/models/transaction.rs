//! Credit transaction entity model.
//!
//! Transactions are append-only: no update DTO exists and no repository
//! exposes an update or delete path.

use bluecarbon_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A transaction row from the `credit_transactions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CreditTransaction {
    pub id: DbId,
    pub credit_id: DbId,
    pub transaction_type: String,
    pub amount: f64,
    pub from_profile_id: Option<DbId>,
    pub to_profile_id: Option<DbId>,
    pub price_per_credit: Option<f64>,
    pub notes: Option<String>,
    pub ledger_hash: String,
    pub transaction_date: Timestamp,
    pub created_at: Timestamp,
}
