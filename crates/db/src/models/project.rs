//! Project entity model and DTOs.

use bluecarbon_core::project::{Location, ProjectStatus};
use bluecarbon_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub project_type: String,
    pub area_hectares: f64,
    pub location: Json<Location>,
    pub baseline_carbon: Option<f64>,
    pub projected_sequestration: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: ProjectStatus,
    pub owner_id: DbId,
    pub approved_by: Option<DbId>,
    pub approved_at: Option<Timestamp>,
    pub registry_hash: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a new project.
///
/// Field-shape checks live here via `validator`; the domain rules (project
/// type set, coordinate ranges, status restrictions) are applied by
/// `bluecarbon_core::project::validate_new_project`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProject {
    #[validate(length(min = 1, message = "Project name must not be empty"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(length(min = 1, message = "Project type is required"))]
    pub project_type: String,
    #[validate(range(exclusive_min = 0.0, message = "Area must be positive"))]
    pub area_hectares: f64,
    #[serde(default)]
    pub location: Location,
    pub baseline_carbon: Option<f64>,
    pub projected_sequestration: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Defaults to `draft` if omitted; `submitted` is the only other value
    /// accepted at creation time.
    pub status: Option<ProjectStatus>,
}
