//! Read-side repository for the `credit_transactions` table.
//!
//! Inserts happen exclusively inside [`CreditRepo`]'s ledger transactions;
//! this repository only reads. No update or delete exists anywhere.
//!
//! [`CreditRepo`]: crate::repositories::CreditRepo

use bluecarbon_core::types::DbId;
use sqlx::PgPool;

use crate::models::transaction::CreditTransaction;

/// Column list for credit_transactions queries.
const TX_COLUMNS: &str = "id, credit_id, transaction_type, amount, \
    from_profile_id, to_profile_id, price_per_credit, notes, ledger_hash, \
    transaction_date, created_at";

/// Provides read access to the transaction log.
pub struct TransactionRepo;

impl TransactionRepo {
    /// List all transactions recorded against a lot, newest first.
    pub async fn list_for_credit(
        pool: &PgPool,
        credit_id: DbId,
    ) -> Result<Vec<CreditTransaction>, sqlx::Error> {
        let query = format!(
            "SELECT {TX_COLUMNS} FROM credit_transactions
             WHERE credit_id = $1
             ORDER BY transaction_date DESC, created_at DESC"
        );
        sqlx::query_as::<_, CreditTransaction>(&query)
            .bind(credit_id)
            .fetch_all(pool)
            .await
    }

    /// List all transactions a profile participated in, newest first.
    pub async fn list_for_profile(
        pool: &PgPool,
        profile_id: DbId,
    ) -> Result<Vec<CreditTransaction>, sqlx::Error> {
        let query = format!(
            "SELECT {TX_COLUMNS} FROM credit_transactions
             WHERE from_profile_id = $1 OR to_profile_id = $1
             ORDER BY transaction_date DESC, created_at DESC"
        );
        sqlx::query_as::<_, CreditTransaction>(&query)
            .bind(profile_id)
            .fetch_all(pool)
            .await
    }
}
