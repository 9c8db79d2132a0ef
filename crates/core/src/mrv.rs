//! MRV (Monitoring, Reporting, Verification) submission rules.
//!
//! A submission is created `pending` by the project owner and receives
//! exactly one admin decision: `verified` or `rejected`. Both outcomes are
//! terminal; there is no re-queue and no edit after the decision.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Data sources
-------------------------------------------------------------------------- */

pub const SOURCE_CSV: &str = "csv";
pub const SOURCE_EXCEL: &str = "excel";
pub const SOURCE_SENSOR: &str = "sensor";
pub const SOURCE_SATELLITE: &str = "satellite";
pub const SOURCE_DRONE: &str = "drone";
pub const SOURCE_OTHER: &str = "other";

/// All valid data source values.
pub const VALID_DATA_SOURCES: &[&str] = &[
    SOURCE_CSV,
    SOURCE_EXCEL,
    SOURCE_SENSOR,
    SOURCE_SATELLITE,
    SOURCE_DRONE,
    SOURCE_OTHER,
];

/// Validate that a data source string is one of the accepted values.
pub fn validate_data_source(source: &str) -> Result<(), CoreError> {
    if VALID_DATA_SOURCES.contains(&source) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid data source '{source}'. Must be one of: {}",
            VALID_DATA_SOURCES.join(", ")
        )))
    }
}

/// Infer a data source from an uploaded file name's extension.
///
/// Used when the submitter does not state the source explicitly.
pub fn infer_data_source(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit('.')
        .next()
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "csv" => SOURCE_CSV,
        "xlsx" | "xls" => SOURCE_EXCEL,
        _ => SOURCE_OTHER,
    }
}

/* --------------------------------------------------------------------------
Verification state machine
-------------------------------------------------------------------------- */

/// Verification status, mapped onto the `verification_status` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "verification_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Pending,
    Verified,
    Rejected,
}

impl VerificationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Rejected => "rejected",
        }
    }

    /// Whether this submission still awaits its single admin decision.
    pub fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check that a verification decision is legal.
///
/// The only legal decisions are `pending -> verified` and
/// `pending -> rejected`. Deciding an already-decided submission is a
/// conflict; "deciding" back to pending is a validation error.
pub fn ensure_decision(
    current: VerificationStatus,
    decision: VerificationStatus,
) -> Result<(), CoreError> {
    if decision == VerificationStatus::Pending {
        return Err(CoreError::Validation(
            "A verification decision must be 'verified' or 'rejected'".to_string(),
        ));
    }
    if !current.is_pending() {
        return Err(CoreError::Conflict(format!(
            "Submission was already decided as '{current}'"
        )));
    }
    Ok(())
}

/// Validate the fields of a new submission before persistence.
pub fn validate_new_submission(
    data_source: &str,
    carbon_measurement: Option<f64>,
) -> Result<(), CoreError> {
    validate_data_source(data_source)?;
    if let Some(measurement) = carbon_measurement {
        if !measurement.is_finite() || measurement < 0.0 {
            return Err(CoreError::Validation(format!(
                "Carbon measurement must be non-negative, got {measurement}"
            )));
        }
    }
    Ok(())
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn pending_accepts_both_decisions() {
        assert!(ensure_decision(VerificationStatus::Pending, VerificationStatus::Verified).is_ok());
        assert!(ensure_decision(VerificationStatus::Pending, VerificationStatus::Rejected).is_ok());
    }

    #[test]
    fn decided_submission_rejects_second_decision() {
        for current in [VerificationStatus::Verified, VerificationStatus::Rejected] {
            for decision in [VerificationStatus::Verified, VerificationStatus::Rejected] {
                let err = ensure_decision(current, decision).unwrap_err();
                assert_matches!(err, CoreError::Conflict(_), "{current} -> {decision}");
            }
        }
    }

    #[test]
    fn deciding_back_to_pending_is_invalid() {
        let err =
            ensure_decision(VerificationStatus::Pending, VerificationStatus::Pending).unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }

    #[test]
    fn known_data_sources_accepted() {
        for source in VALID_DATA_SOURCES {
            assert!(validate_data_source(source).is_ok());
        }
    }

    #[test]
    fn unknown_data_source_rejected() {
        assert!(validate_data_source("telepathy").is_err());
        assert!(validate_data_source("").is_err());
    }

    #[test]
    fn data_source_inferred_from_extension() {
        assert_eq!(infer_data_source("biomass_march.csv"), SOURCE_CSV);
        assert_eq!(infer_data_source("seagrass.XLSX"), SOURCE_EXCEL);
        assert_eq!(infer_data_source("survey.xls"), SOURCE_EXCEL);
        assert_eq!(infer_data_source("report.pdf"), SOURCE_OTHER);
        assert_eq!(infer_data_source("no_extension"), SOURCE_OTHER);
    }

    #[test]
    fn negative_measurement_rejected() {
        let err = validate_new_submission(SOURCE_CSV, Some(-0.5)).unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }

    #[test]
    fn missing_measurement_accepted() {
        assert!(validate_new_submission(SOURCE_SENSOR, None).is_ok());
    }
}
