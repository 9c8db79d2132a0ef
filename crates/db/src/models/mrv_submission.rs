//! MRV submission entity model and DTOs.

use bluecarbon_core::mrv::VerificationStatus;
use bluecarbon_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// An MRV submission row from the `mrv_submissions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MrvSubmission {
    pub id: DbId,
    pub project_id: DbId,
    pub submission_date: NaiveDate,
    pub data_source: String,
    pub carbon_measurement: Option<f64>,
    pub biomass_data: Option<serde_json::Value>,
    pub data_summary: Option<serde_json::Value>,
    pub file_path: Option<String>,
    pub notes: Option<String>,
    pub verification_status: VerificationStatus,
    pub verified_by: Option<DbId>,
    pub verified_at: Option<Timestamp>,
    pub ledger_hash: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new MRV submission.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMrvSubmission {
    pub submission_date: NaiveDate,
    #[validate(length(min = 1, message = "Data source is required"))]
    pub data_source: String,
    #[validate(range(min = 0.0, message = "Carbon measurement must be non-negative"))]
    pub carbon_measurement: Option<f64>,
    pub biomass_data: Option<serde_json::Value>,
    pub data_summary: Option<serde_json::Value>,
    pub file_path: Option<String>,
}
