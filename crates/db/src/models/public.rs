//! Read-only projections for the unauthenticated public explorer.
//!
//! These structs are the only shapes the public endpoints serialize, so the
//! restriction to non-identifying fields holds by construction: neither
//! carries an owner, approver, or counterparty id.

use bluecarbon_core::project::{Location, ProjectStatus};
use bluecarbon_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

/// Public view of an approved project.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PublicProject {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub project_type: String,
    pub area_hectares: f64,
    pub location: Json<Location>,
    pub baseline_carbon: Option<f64>,
    pub projected_sequestration: Option<f64>,
    pub status: ProjectStatus,
    pub approved_at: Option<Timestamp>,
}

/// Public view of a credit transaction.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PublicTransaction {
    pub id: DbId,
    pub transaction_type: String,
    pub amount: f64,
    pub ledger_hash: String,
    pub transaction_date: Timestamp,
}

/// Aggregate registry statistics for the public dashboard.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PublicStats {
    pub approved_projects: i64,
    pub total_hectares: f64,
    pub credits_issued: f64,
    pub credits_retired: f64,
}
