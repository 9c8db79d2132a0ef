//! Repository for the `projects` table.
//!
//! Every lifecycle transition is a conditional UPDATE whose WHERE clause
//! names the expected current status. A caller that lost a race updates
//! zero rows and receives `None`; nothing is ever overwritten blindly.

use bluecarbon_core::project::ProjectStatus;
use bluecarbon_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::project::{CreateProject, Project};

/// Column list for projects queries.
const PROJECT_COLUMNS: &str = "id, name, description, project_type, area_hectares, \
    location, baseline_carbon, projected_sequestration, start_date, end_date, \
    status, owner_id, approved_by, approved_at, registry_hash, created_at, updated_at";

/// Provides CRUD and lifecycle operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Register a new project, returning the created row.
    ///
    /// `status` must already be validated to `draft` or `submitted`.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateProject,
        status: ProjectStatus,
        registry_hash: &str,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects
                (name, description, project_type, area_hectares, location,
                 baseline_carbon, projected_sequestration, start_date, end_date,
                 status, owner_id, registry_hash)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {PROJECT_COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.project_type)
            .bind(input.area_hectares)
            .bind(Json(&input.location))
            .bind(input.baseline_carbon)
            .bind(input.projected_sequestration)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(status)
            .bind(owner_id)
            .bind(registry_hash)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all projects owned by a profile, newest first.
    pub async fn list_for_owner(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {PROJECT_COLUMNS} FROM projects
             WHERE owner_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// List all projects, newest first (admin view).
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    /// List projects awaiting a review decision (admin queue).
    pub async fn list_in_review(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {PROJECT_COLUMNS} FROM projects
             WHERE status IN ('submitted', 'under_review')
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    /// Owner submits a draft for review: `draft -> submitted`.
    pub async fn submit(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET status = 'submitted', updated_at = now()
             WHERE id = $1 AND owner_id = $2 AND status = 'draft'
             RETURNING {PROJECT_COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// Admin takes a submission into review: `submitted -> under_review`.
    pub async fn start_review(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET status = 'under_review', updated_at = now()
             WHERE id = $1 AND status = 'submitted'
             RETURNING {PROJECT_COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Admin approves: `submitted | under_review -> approved`.
    ///
    /// Stamps `approved_by`/`approved_at`; the status precondition makes the
    /// stamp single-shot even under concurrent approvals.
    pub async fn approve(
        pool: &PgPool,
        id: DbId,
        admin_id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET status = 'approved', approved_by = $2,
                    approved_at = now(), updated_at = now()
             WHERE id = $1 AND status IN ('submitted', 'under_review')
             RETURNING {PROJECT_COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(admin_id)
            .fetch_optional(pool)
            .await
    }

    /// Admin rejects: `submitted | under_review -> rejected`. Terminal.
    pub async fn reject(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET status = 'rejected', updated_at = now()
             WHERE id = $1 AND status IN ('submitted', 'under_review')
             RETURNING {PROJECT_COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Admin activates an approved project: `approved -> active`.
    pub async fn activate(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET status = 'active', updated_at = now()
             WHERE id = $1 AND status = 'approved'
             RETURNING {PROJECT_COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Admin completes an active project: `active -> completed`. Terminal.
    pub async fn complete(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET status = 'completed', updated_at = now()
             WHERE id = $1 AND status = 'active'
             RETURNING {PROJECT_COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
