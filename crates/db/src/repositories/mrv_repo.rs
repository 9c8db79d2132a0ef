//! Repository for the `mrv_submissions` table.

use bluecarbon_core::mrv::VerificationStatus;
use bluecarbon_core::types::DbId;
use sqlx::PgPool;

use crate::models::mrv_submission::{CreateMrvSubmission, MrvSubmission};

/// Column list for mrv_submissions queries.
const MRV_COLUMNS: &str = "id, project_id, submission_date, data_source, \
    carbon_measurement, biomass_data, data_summary, file_path, notes, \
    verification_status, verified_by, verified_at, ledger_hash, created_at, updated_at";

/// Provides CRUD and verification operations for MRV submissions.
pub struct MrvRepo;

impl MrvRepo {
    /// Create a new submission (status `pending`), returning the created row.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateMrvSubmission,
        ledger_hash: &str,
    ) -> Result<MrvSubmission, sqlx::Error> {
        let query = format!(
            "INSERT INTO mrv_submissions
                (project_id, submission_date, data_source, carbon_measurement,
                 biomass_data, data_summary, file_path, ledger_hash)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {MRV_COLUMNS}"
        );
        sqlx::query_as::<_, MrvSubmission>(&query)
            .bind(project_id)
            .bind(input.submission_date)
            .bind(&input.data_source)
            .bind(input.carbon_measurement)
            .bind(&input.biomass_data)
            .bind(&input.data_summary)
            .bind(&input.file_path)
            .bind(ledger_hash)
            .fetch_one(pool)
            .await
    }

    /// Find a submission by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MrvSubmission>, sqlx::Error> {
        let query = format!("SELECT {MRV_COLUMNS} FROM mrv_submissions WHERE id = $1");
        sqlx::query_as::<_, MrvSubmission>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all submissions for a project, newest first.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<MrvSubmission>, sqlx::Error> {
        let query = format!(
            "SELECT {MRV_COLUMNS} FROM mrv_submissions
             WHERE project_id = $1
             ORDER BY submission_date DESC, created_at DESC"
        );
        sqlx::query_as::<_, MrvSubmission>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// List all submissions across projects owned by a profile.
    pub async fn list_for_owner(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Vec<MrvSubmission>, sqlx::Error> {
        sqlx::query_as::<_, MrvSubmission>(
            "SELECT m.id, m.project_id, m.submission_date, m.data_source,
                    m.carbon_measurement, m.biomass_data, m.data_summary,
                    m.file_path, m.notes, m.verification_status, m.verified_by,
                    m.verified_at, m.ledger_hash, m.created_at, m.updated_at
             FROM mrv_submissions m
             INNER JOIN projects p ON p.id = m.project_id
             WHERE p.owner_id = $1
             ORDER BY m.submission_date DESC, m.created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await
    }

    /// List submissions awaiting a decision (admin queue), oldest first.
    pub async fn list_pending(pool: &PgPool) -> Result<Vec<MrvSubmission>, sqlx::Error> {
        let query = format!(
            "SELECT {MRV_COLUMNS} FROM mrv_submissions
             WHERE verification_status = 'pending'
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, MrvSubmission>(&query).fetch_all(pool).await
    }

    /// Record the single verification decision: `pending -> verified|rejected`.
    ///
    /// Stamps `verified_by`/`verified_at` and persists the reviewer's notes.
    /// Returns `None` when the submission had already left `pending`, so a
    /// second decision can never overwrite the first.
    pub async fn decide(
        pool: &PgPool,
        id: DbId,
        decision: VerificationStatus,
        admin_id: DbId,
        notes: Option<&str>,
    ) -> Result<Option<MrvSubmission>, sqlx::Error> {
        let query = format!(
            "UPDATE mrv_submissions
             SET verification_status = $2, verified_by = $3, verified_at = now(),
                 notes = $4, updated_at = now()
             WHERE id = $1 AND verification_status = 'pending'
             RETURNING {MRV_COLUMNS}"
        );
        sqlx::query_as::<_, MrvSubmission>(&query)
            .bind(id)
            .bind(decision)
            .bind(admin_id)
            .bind(notes)
            .fetch_optional(pool)
            .await
    }
}
