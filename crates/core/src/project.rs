//! Project lifecycle state machine and registration validation.
//!
//! The lifecycle is an explicit transition table over [`ProjectStatus`]:
//!
//! ```text
//! draft -> submitted -> under_review -> approved -> active -> completed
//!                    \-> approved / rejected
//!        under_review -> rejected
//! ```
//!
//! `rejected` is terminal for a review cycle; re-submission means a new
//! project row. Only `draft -> submitted` is an owner action, every other
//! transition requires the admin role (enforced at the API layer).

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Project types
-------------------------------------------------------------------------- */

pub const TYPE_MANGROVE: &str = "mangrove_restoration";
pub const TYPE_SEAGRASS: &str = "seagrass_restoration";
pub const TYPE_SALT_MARSH: &str = "salt_marsh_restoration";
pub const TYPE_COASTAL_WETLAND: &str = "coastal_wetland_protection";

/// All valid project type values.
pub const VALID_PROJECT_TYPES: &[&str] = &[
    TYPE_MANGROVE,
    TYPE_SEAGRASS,
    TYPE_SALT_MARSH,
    TYPE_COASTAL_WETLAND,
];

/// Validate that a project type string is one of the accepted values.
pub fn validate_project_type(project_type: &str) -> Result<(), CoreError> {
    if VALID_PROJECT_TYPES.contains(&project_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid project type '{project_type}'. Must be one of: {}",
            VALID_PROJECT_TYPES.join(", ")
        )))
    }
}

/* --------------------------------------------------------------------------
Status state machine
-------------------------------------------------------------------------- */

/// Project lifecycle status, mapped onto the `project_status` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "project_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Draft,
    Submitted,
    UnderReview,
    Approved,
    Rejected,
    Active,
    Completed,
}

impl ProjectStatus {
    /// Wire representation, identical to the Postgres enum label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::UnderReview => "under_review",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    /// Parse a wire label.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "draft" => Ok(Self::Draft),
            "submitted" => Ok(Self::Submitted),
            "under_review" => Ok(Self::UnderReview),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            other => Err(CoreError::Validation(format!(
                "Unknown project status '{other}'"
            ))),
        }
    }

    /// Whether `next` is a legal transition from this status.
    ///
    /// The match is exhaustive on the current status so adding a variant
    /// forces this table to be revisited.
    pub fn can_transition_to(self, next: ProjectStatus) -> bool {
        match self {
            Self::Draft => matches!(next, Self::Submitted),
            Self::Submitted => {
                matches!(next, Self::UnderReview | Self::Approved | Self::Rejected)
            }
            Self::UnderReview => matches!(next, Self::Approved | Self::Rejected),
            Self::Approved => matches!(next, Self::Active),
            Self::Active => matches!(next, Self::Completed),
            // Terminal states.
            Self::Rejected | Self::Completed => false,
        }
    }

    /// Whether this status permits credit issuance against the project.
    pub fn is_credit_eligible(self) -> bool {
        matches!(self, Self::Approved | Self::Active | Self::Completed)
    }

    /// Whether `approved_by`/`approved_at` must be set for this status.
    pub fn requires_approval_stamp(self) -> bool {
        self.is_credit_eligible()
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check a lifecycle transition, returning `Conflict` when illegal.
///
/// A conflict (rather than a validation error) because the usual cause is a
/// concurrent actor having already moved the project.
pub fn ensure_transition(from: ProjectStatus, to: ProjectStatus) -> Result<(), CoreError> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "Project cannot move from '{from}' to '{to}'"
        )))
    }
}

/* --------------------------------------------------------------------------
Location
-------------------------------------------------------------------------- */

/// Geographic location stored as a JSON column on the project row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: Option<String>,
}

impl Location {
    /// Validate coordinate ranges when coordinates are present.
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(lat) = self.latitude {
            if !(-90.0..=90.0).contains(&lat) {
                return Err(CoreError::Validation(format!(
                    "Latitude {lat} out of range [-90, 90]"
                )));
            }
        }
        if let Some(lon) = self.longitude {
            if !(-180.0..=180.0).contains(&lon) {
                return Err(CoreError::Validation(format!(
                    "Longitude {lon} out of range [-180, 180]"
                )));
            }
        }
        Ok(())
    }
}

/* --------------------------------------------------------------------------
Registration validation
-------------------------------------------------------------------------- */

/// Validate the fields of a new project before anything is persisted.
pub fn validate_new_project(
    name: &str,
    project_type: &str,
    area_hectares: f64,
    projected_sequestration: Option<f64>,
    location: &Location,
) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(
            "Project name must not be empty".to_string(),
        ));
    }
    validate_project_type(project_type)?;
    if !area_hectares.is_finite() || area_hectares <= 0.0 {
        return Err(CoreError::Validation(format!(
            "Area must be a positive number of hectares, got {area_hectares}"
        )));
    }
    if let Some(seq) = projected_sequestration {
        if !seq.is_finite() || seq < 0.0 {
            return Err(CoreError::Validation(format!(
                "Projected sequestration must be non-negative, got {seq}"
            )));
        }
    }
    location.validate()
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const ALL_STATUSES: &[ProjectStatus] = &[
        ProjectStatus::Draft,
        ProjectStatus::Submitted,
        ProjectStatus::UnderReview,
        ProjectStatus::Approved,
        ProjectStatus::Rejected,
        ProjectStatus::Active,
        ProjectStatus::Completed,
    ];

    fn ok_location() -> Location {
        Location {
            latitude: Some(-8.65),
            longitude: Some(115.21),
            address: Some("Benoa Bay, Bali".to_string()),
        }
    }

    #[test]
    fn happy_path_transitions_allowed() {
        use ProjectStatus::*;
        for (from, to) in [
            (Draft, Submitted),
            (Submitted, UnderReview),
            (Submitted, Approved),
            (Submitted, Rejected),
            (UnderReview, Approved),
            (UnderReview, Rejected),
            (Approved, Active),
            (Active, Completed),
        ] {
            assert!(from.can_transition_to(to), "{from} -> {to} should be legal");
        }
    }

    #[test]
    fn rejected_and_completed_are_terminal() {
        for &next in ALL_STATUSES {
            assert!(!ProjectStatus::Rejected.can_transition_to(next));
            assert!(!ProjectStatus::Completed.can_transition_to(next));
        }
    }

    #[test]
    fn no_backward_transitions() {
        use ProjectStatus::*;
        for (from, to) in [
            (Submitted, Draft),
            (UnderReview, Submitted),
            (Approved, UnderReview),
            (Approved, Draft),
            (Active, Approved),
            (Completed, Active),
        ] {
            assert!(!from.can_transition_to(to), "{from} -> {to} must be illegal");
        }
    }

    #[test]
    fn draft_cannot_be_approved_directly() {
        assert!(!ProjectStatus::Draft.can_transition_to(ProjectStatus::Approved));
        assert!(!ProjectStatus::Draft.can_transition_to(ProjectStatus::Active));
    }

    #[test]
    fn no_self_transitions() {
        for &status in ALL_STATUSES {
            assert!(!status.can_transition_to(status));
        }
    }

    #[test]
    fn ensure_transition_reports_conflict() {
        let err = ensure_transition(ProjectStatus::Rejected, ProjectStatus::Approved).unwrap_err();
        assert_matches!(err, CoreError::Conflict(_));
    }

    #[test]
    fn credit_eligibility_matches_approved_and_later() {
        use ProjectStatus::*;
        for &status in ALL_STATUSES {
            let expected = matches!(status, Approved | Active | Completed);
            assert_eq!(status.is_credit_eligible(), expected, "{status}");
        }
    }

    #[test]
    fn approval_stamp_required_iff_credit_eligible() {
        for &status in ALL_STATUSES {
            assert_eq!(status.requires_approval_stamp(), status.is_credit_eligible());
        }
    }

    #[test]
    fn status_labels_round_trip() {
        for &status in ALL_STATUSES {
            assert_eq!(ProjectStatus::from_name(status.as_str()).unwrap(), status);
        }
        assert!(ProjectStatus::from_name("pending").is_err());
    }

    #[test]
    fn valid_new_project_accepted() {
        let result =
            validate_new_project("Benoa Mangroves", TYPE_MANGROVE, 120.5, Some(4800.0), &ok_location());
        assert!(result.is_ok());
    }

    #[test]
    fn empty_name_rejected() {
        let err = validate_new_project("  ", TYPE_MANGROVE, 10.0, None, &ok_location()).unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }

    #[test]
    fn unknown_project_type_rejected() {
        assert!(validate_new_project("P", "kelp_forest", 10.0, None, &ok_location()).is_err());
    }

    #[test]
    fn non_positive_area_rejected() {
        for area in [0.0, -3.5, f64::NAN] {
            assert!(
                validate_new_project("P", TYPE_SEAGRASS, area, None, &ok_location()).is_err(),
                "area {area} must be rejected"
            );
        }
    }

    #[test]
    fn negative_sequestration_rejected() {
        assert!(
            validate_new_project("P", TYPE_SALT_MARSH, 10.0, Some(-1.0), &ok_location()).is_err()
        );
    }

    #[test]
    fn out_of_range_coordinates_rejected() {
        let bad_lat = Location {
            latitude: Some(91.0),
            longitude: Some(0.0),
            address: None,
        };
        let bad_lon = Location {
            latitude: Some(0.0),
            longitude: Some(-180.5),
            address: None,
        };
        assert!(bad_lat.validate().is_err());
        assert!(bad_lon.validate().is_err());
    }

    #[test]
    fn missing_coordinates_accepted() {
        assert!(Location::default().validate().is_ok());
    }
}
