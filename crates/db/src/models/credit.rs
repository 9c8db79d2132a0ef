//! Carbon credit lot entity model and DTOs.

use bluecarbon_core::ledger::CreditStatus;
use bluecarbon_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

use crate::models::transaction::CreditTransaction;

/// A credit lot row from the `carbon_credits` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CarbonCredit {
    pub id: DbId,
    pub project_id: DbId,
    pub serial_number: String,
    pub credit_amount: f64,
    pub vintage_year: i32,
    pub status: CreditStatus,
    pub current_owner_id: DbId,
    pub issue_date: NaiveDate,
    pub retired_date: Option<NaiveDate>,
    pub retirement_reason: Option<String>,
    pub parent_credit_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Parameters for issuing a new credit lot against a project.
#[derive(Debug, Clone)]
pub struct IssueCredit {
    pub project_id: DbId,
    pub serial_number: String,
    pub credit_amount: f64,
    pub vintage_year: i32,
    pub current_owner_id: DbId,
    pub issue_date: NaiveDate,
}

/// Result of an issuance: the new lot and its opening transaction.
#[derive(Debug, Clone, Serialize)]
pub struct IssueOutcome {
    pub credit: CarbonCredit,
    pub transaction: CreditTransaction,
}

/// Result of a transfer: the closed parent lot, the lot now owned by the
/// recipient, the sender's remainder lot for a partial transfer, and the
/// recorded transaction.
#[derive(Debug, Clone, Serialize)]
pub struct TransferOutcome {
    pub parent: CarbonCredit,
    pub recipient_lot: CarbonCredit,
    pub remainder_lot: Option<CarbonCredit>,
    pub transaction: CreditTransaction,
}

/// Result of a retirement: the retired lot and the recorded transaction.
#[derive(Debug, Clone, Serialize)]
pub struct RetireOutcome {
    pub credit: CarbonCredit,
    pub transaction: CreditTransaction,
}
