//! Carbon credit ledger rules: lot statuses, retirement reasons, and the
//! amount checks applied before any ledger write.
//!
//! Credits are modeled as lots. A lot's status moves one-directionally:
//! `issued -> transferred` (the lot was handed on and replaced by child
//! lots) or `issued -> retired`. Both end states are terminal; a closed lot
//! accepts no further transactions. A partial transfer closes the parent lot
//! and creates two child lots, the transferred portion owned by the
//! recipient and the remainder owned by the sender, so recorded transfer
//! amounts are always fully backed by lot balances.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::project::ProjectStatus;

/* --------------------------------------------------------------------------
Transaction types
-------------------------------------------------------------------------- */

pub const TX_ISSUE: &str = "issue";
pub const TX_TRANSFER: &str = "transfer";
pub const TX_RETIRE: &str = "retire";

/* --------------------------------------------------------------------------
Credit status
-------------------------------------------------------------------------- */

/// Credit lot status, mapped onto the `credit_status` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "credit_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CreditStatus {
    Issued,
    Transferred,
    Retired,
}

impl CreditStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Issued => "issued",
            Self::Transferred => "transferred",
            Self::Retired => "retired",
        }
    }

    /// Whether the lot is still open for transfer or retirement.
    pub fn is_open(self) -> bool {
        matches!(self, Self::Issued)
    }
}

impl std::fmt::Display for CreditStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check that a lot can be transferred. Closed lots yield `Conflict`.
pub fn ensure_transferable(status: CreditStatus) -> Result<(), CoreError> {
    if status.is_open() {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "Credit lot is '{status}' and accepts no further transfers"
        )))
    }
}

/// Check that a lot can be retired. Closed lots yield `Conflict`.
pub fn ensure_retirable(status: CreditStatus) -> Result<(), CoreError> {
    if status.is_open() {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "Credit lot is '{status}' and cannot be retired"
        )))
    }
}

/* --------------------------------------------------------------------------
Retirement reasons
-------------------------------------------------------------------------- */

/// Closed set of recognized retirement reasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetirementReason {
    VoluntaryOffset,
    ComplianceObligation,
    CorporateNeutrality,
    EventOffset,
}

impl RetirementReason {
    /// Parse from the persisted `retirement_reason` column value.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "voluntary_offset" => Ok(Self::VoluntaryOffset),
            "compliance_obligation" => Ok(Self::ComplianceObligation),
            "corporate_neutrality" => Ok(Self::CorporateNeutrality),
            "event_offset" => Ok(Self::EventOffset),
            other => Err(CoreError::Validation(format!(
                "Unknown retirement reason '{other}'. Must be one of: \
                 voluntary_offset, compliance_obligation, corporate_neutrality, event_offset"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::VoluntaryOffset => "voluntary_offset",
            Self::ComplianceObligation => "compliance_obligation",
            Self::CorporateNeutrality => "corporate_neutrality",
            Self::EventOffset => "event_offset",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::VoluntaryOffset => "Voluntary Carbon Offset",
            Self::ComplianceObligation => "Compliance Obligation",
            Self::CorporateNeutrality => "Corporate Carbon Neutrality",
            Self::EventOffset => "Event Carbon Offset",
        }
    }
}

/* --------------------------------------------------------------------------
Amount checks
-------------------------------------------------------------------------- */

/// Check the amount of a new issuance. Issuance requires a positive amount.
pub fn validate_issue_amount(amount: f64) -> Result<(), CoreError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(CoreError::Validation(format!(
            "Credit amount must be a positive number, got {amount}"
        )));
    }
    Ok(())
}

/// Check that the target project may have credits issued against it.
///
/// Issuance is only legal once a project has been approved (or has since
/// moved to `active`/`completed`).
pub fn ensure_project_eligible(status: ProjectStatus) -> Result<(), CoreError> {
    if status.is_credit_eligible() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Credits cannot be issued against a project in status '{status}'"
        )))
    }
}

/// Check a transfer amount against the lot balance.
pub fn validate_transfer_amount(amount: f64, credit_amount: f64) -> Result<(), CoreError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(CoreError::InvalidAmount(format!(
            "Transfer amount must be positive, got {amount}"
        )));
    }
    if amount > credit_amount {
        return Err(CoreError::InvalidAmount(format!(
            "Transfer amount {amount} exceeds the lot balance of {credit_amount}"
        )));
    }
    Ok(())
}

/// Split a lot balance for a transfer.
///
/// Returns the sender's remainder: `Some(balance - amount)` for a partial
/// transfer, `None` when the full balance moves. The amount must already
/// have passed [`validate_transfer_amount`].
pub fn split_remainder(credit_amount: f64, transfer_amount: f64) -> Option<f64> {
    let remainder = credit_amount - transfer_amount;
    if remainder > 0.0 {
        Some(remainder)
    } else {
        None
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn issued_lot_is_open() {
        assert!(ensure_transferable(CreditStatus::Issued).is_ok());
        assert!(ensure_retirable(CreditStatus::Issued).is_ok());
    }

    #[test]
    fn retired_lot_accepts_nothing() {
        assert_matches!(
            ensure_transferable(CreditStatus::Retired).unwrap_err(),
            CoreError::Conflict(_)
        );
        assert_matches!(
            ensure_retirable(CreditStatus::Retired).unwrap_err(),
            CoreError::Conflict(_)
        );
    }

    #[test]
    fn transferred_lot_accepts_nothing() {
        assert!(ensure_transferable(CreditStatus::Transferred).is_err());
        assert!(ensure_retirable(CreditStatus::Transferred).is_err());
    }

    #[test]
    fn issue_amount_must_be_positive() {
        assert!(validate_issue_amount(100.0).is_ok());
        for amount in [0.0, -10.0, f64::NAN, f64::INFINITY] {
            assert_matches!(
                validate_issue_amount(amount).unwrap_err(),
                CoreError::Validation(_),
                "amount {amount}"
            );
        }
    }

    #[test]
    fn issuance_requires_approved_or_later_project() {
        use ProjectStatus::*;
        for status in [Approved, Active, Completed] {
            assert!(ensure_project_eligible(status).is_ok(), "{status}");
        }
        for status in [Draft, Submitted, UnderReview, Rejected] {
            assert_matches!(
                ensure_project_eligible(status).unwrap_err(),
                CoreError::Validation(_),
                "{status}"
            );
        }
    }

    #[test]
    fn transfer_amount_bounds() {
        assert!(validate_transfer_amount(50.0, 100.0).is_ok());
        assert!(validate_transfer_amount(100.0, 100.0).is_ok());
        assert_matches!(
            validate_transfer_amount(100.5, 100.0).unwrap_err(),
            CoreError::InvalidAmount(_)
        );
        assert_matches!(
            validate_transfer_amount(0.0, 100.0).unwrap_err(),
            CoreError::InvalidAmount(_)
        );
        assert_matches!(
            validate_transfer_amount(-5.0, 100.0).unwrap_err(),
            CoreError::InvalidAmount(_)
        );
        assert_matches!(
            validate_transfer_amount(f64::NAN, 100.0).unwrap_err(),
            CoreError::InvalidAmount(_)
        );
    }

    #[test]
    fn full_transfer_leaves_no_remainder() {
        assert_eq!(split_remainder(100.0, 100.0), None);
    }

    #[test]
    fn partial_transfer_remainder_sums_to_balance() {
        let remainder = split_remainder(100.0, 30.0).unwrap();
        assert_eq!(remainder + 30.0, 100.0);
    }

    #[test]
    fn retirement_reasons_round_trip() {
        for reason in [
            RetirementReason::VoluntaryOffset,
            RetirementReason::ComplianceObligation,
            RetirementReason::CorporateNeutrality,
            RetirementReason::EventOffset,
        ] {
            assert_eq!(RetirementReason::from_name(reason.as_str()).unwrap(), reason);
            assert!(!reason.label().is_empty());
        }
    }

    #[test]
    fn unknown_retirement_reason_rejected() {
        assert_matches!(
            RetirementReason::from_name("because").unwrap_err(),
            CoreError::Validation(_)
        );
        assert!(RetirementReason::from_name("").is_err());
    }
}
