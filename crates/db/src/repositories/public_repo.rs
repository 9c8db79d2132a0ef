//! Read-only queries backing the unauthenticated public explorer.
//!
//! Only `approved` projects are ever selected, and the projection structs
//! exclude owner and counterparty identifiers entirely, so nothing here can
//! leak a project still under review or a participant identity.

use sqlx::PgPool;

use crate::models::public::{PublicProject, PublicStats, PublicTransaction};

/// Provides the public read projection.
pub struct PublicRepo;

impl PublicRepo {
    /// List approved projects, most recently approved first.
    pub async fn approved_projects(pool: &PgPool) -> Result<Vec<PublicProject>, sqlx::Error> {
        sqlx::query_as::<_, PublicProject>(
            "SELECT id, name, description, project_type, area_hectares, location,
                    baseline_carbon, projected_sequestration, status, approved_at
             FROM projects
             WHERE status = 'approved'
             ORDER BY approved_at DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// List all credit transactions, newest first.
    pub async fn transactions(pool: &PgPool) -> Result<Vec<PublicTransaction>, sqlx::Error> {
        sqlx::query_as::<_, PublicTransaction>(
            "SELECT id, transaction_type, amount, ledger_hash, transaction_date
             FROM credit_transactions
             ORDER BY transaction_date DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Aggregate registry statistics.
    pub async fn stats(pool: &PgPool) -> Result<PublicStats, sqlx::Error> {
        sqlx::query_as::<_, PublicStats>(
            "SELECT
                (SELECT COUNT(*) FROM projects WHERE status = 'approved')
                    AS approved_projects,
                (SELECT COALESCE(SUM(area_hectares), 0)
                    FROM projects WHERE status = 'approved') AS total_hectares,
                (SELECT COALESCE(SUM(amount), 0)
                    FROM credit_transactions WHERE transaction_type = 'issue')
                    AS credits_issued,
                (SELECT COALESCE(SUM(amount), 0)
                    FROM credit_transactions WHERE transaction_type = 'retire')
                    AS credits_retired",
        )
        .fetch_one(pool)
        .await
    }
}
