//! Repository for the `carbon_credits` table and its ledger operations.
//!
//! Issue, transfer, and retire each run as one database transaction. The
//! transfer/retire transactions open with a conditional UPDATE
//! (`WHERE id = $1 AND current_owner_id = $2 AND status = 'issued'`): of two
//! racing sessions, exactly one matches the row and the other gets zero rows
//! back, surfaces a conflict, and writes nothing.

use bluecarbon_core::audit::{canonical_entry, compute_ledger_token};
use bluecarbon_core::error::CoreError;
use bluecarbon_core::ledger::{self, RetirementReason, TX_ISSUE, TX_RETIRE, TX_TRANSFER};
use bluecarbon_core::serial::generate_serial;
use bluecarbon_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::credit::{
    CarbonCredit, IssueCredit, IssueOutcome, RetireOutcome, TransferOutcome,
};
use crate::models::transaction::CreditTransaction;
use crate::repositories::RepoError;

/// Column list for carbon_credits queries.
const CREDIT_COLUMNS: &str = "id, project_id, serial_number, credit_amount, \
    vintage_year, status, current_owner_id, issue_date, retired_date, \
    retirement_reason, parent_credit_id, created_at, updated_at";

/// Column list for credit_transactions queries.
const TX_COLUMNS: &str = "id, credit_id, transaction_type, amount, \
    from_profile_id, to_profile_id, price_per_credit, notes, ledger_hash, \
    transaction_date, created_at";

/// Provides ledger operations for credit lots.
pub struct CreditRepo;

impl CreditRepo {
    /// Issue a new credit lot and its opening `issue` transaction.
    ///
    /// Project eligibility and the amount must already be validated; this
    /// only writes.
    pub async fn issue(pool: &PgPool, input: &IssueCredit) -> Result<IssueOutcome, RepoError> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO carbon_credits
                (project_id, serial_number, credit_amount, vintage_year,
                 current_owner_id, issue_date)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {CREDIT_COLUMNS}"
        );
        let credit = sqlx::query_as::<_, CarbonCredit>(&query)
            .bind(input.project_id)
            .bind(&input.serial_number)
            .bind(input.credit_amount)
            .bind(input.vintage_year)
            .bind(input.current_owner_id)
            .bind(input.issue_date)
            .fetch_one(&mut *tx)
            .await?;

        let token = compute_ledger_token(
            None,
            &canonical_entry(
                credit.id,
                TX_ISSUE,
                credit.credit_amount,
                None,
                Some(credit.current_owner_id),
            ),
        );
        let transaction = Self::insert_transaction(
            &mut tx,
            credit.id,
            TX_ISSUE,
            credit.credit_amount,
            None,
            Some(credit.current_owner_id),
            None,
            None,
            &token,
        )
        .await?;

        tx.commit().await?;
        Ok(IssueOutcome {
            credit,
            transaction,
        })
    }

    /// Find a credit lot by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CarbonCredit>, sqlx::Error> {
        let query = format!("SELECT {CREDIT_COLUMNS} FROM carbon_credits WHERE id = $1");
        sqlx::query_as::<_, CarbonCredit>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all lots currently owned by a profile, newest first.
    pub async fn list_for_owner(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Vec<CarbonCredit>, sqlx::Error> {
        let query = format!(
            "SELECT {CREDIT_COLUMNS} FROM carbon_credits
             WHERE current_owner_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, CarbonCredit>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// List all lots issued against a project, newest first.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<CarbonCredit>, sqlx::Error> {
        let query = format!(
            "SELECT {CREDIT_COLUMNS} FROM carbon_credits
             WHERE project_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, CarbonCredit>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Transfer `amount` from a lot to another profile.
    ///
    /// The parent lot closes as `transferred` and is replaced by a lot owned
    /// by the recipient plus, for a partial transfer, a remainder lot owned
    /// by the sender. Returns `Conflict` when the lot is no longer open or
    /// the sender no longer owns it; `InvalidAmount` when the amount falls
    /// outside `(0, credit_amount]`. On any error the whole transaction
    /// rolls back and nothing is recorded.
    pub async fn transfer(
        pool: &PgPool,
        credit_id: DbId,
        from_profile: DbId,
        to_profile: DbId,
        amount: f64,
        price_per_credit: Option<f64>,
        notes: Option<&str>,
    ) -> Result<TransferOutcome, RepoError> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE carbon_credits SET status = 'transferred', updated_at = now()
             WHERE id = $1 AND current_owner_id = $2 AND status = 'issued'
             RETURNING {CREDIT_COLUMNS}"
        );
        let parent = sqlx::query_as::<_, CarbonCredit>(&query)
            .bind(credit_id)
            .bind(from_profile)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| {
                tracing::warn!(%credit_id, "Transfer lost the status race");
                CoreError::Conflict(
                    "Credit lot is no longer open for transfer; reload and retry".to_string(),
                )
            })?;

        ledger::validate_transfer_amount(amount, parent.credit_amount)?;

        let recipient_lot = Self::insert_child_lot(&mut tx, &parent, to_profile, amount).await?;
        let remainder_lot = match ledger::split_remainder(parent.credit_amount, amount) {
            Some(remainder) => {
                Some(Self::insert_child_lot(&mut tx, &parent, from_profile, remainder).await?)
            }
            None => None,
        };

        let prev = Self::latest_token(&mut tx, parent.id, parent.parent_credit_id).await?;
        let token = compute_ledger_token(
            prev.as_deref(),
            &canonical_entry(
                parent.id,
                TX_TRANSFER,
                amount,
                Some(from_profile),
                Some(to_profile),
            ),
        );
        let transaction = Self::insert_transaction(
            &mut tx,
            parent.id,
            TX_TRANSFER,
            amount,
            Some(from_profile),
            Some(to_profile),
            price_per_credit,
            notes,
            &token,
        )
        .await?;

        tx.commit().await?;
        Ok(TransferOutcome {
            parent,
            recipient_lot,
            remainder_lot,
            transaction,
        })
    }

    /// Retire a lot permanently, recording a `retire` transaction for the
    /// full lot balance.
    ///
    /// Returns `Conflict` when the lot is no longer open or the caller no
    /// longer owns it. There is no un-retire.
    pub async fn retire(
        pool: &PgPool,
        credit_id: DbId,
        owner_id: DbId,
        reason: RetirementReason,
    ) -> Result<RetireOutcome, RepoError> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE carbon_credits
             SET status = 'retired', retirement_reason = $3,
                 retired_date = CURRENT_DATE, updated_at = now()
             WHERE id = $1 AND current_owner_id = $2 AND status = 'issued'
             RETURNING {CREDIT_COLUMNS}"
        );
        let credit = sqlx::query_as::<_, CarbonCredit>(&query)
            .bind(credit_id)
            .bind(owner_id)
            .bind(reason.as_str())
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| {
                tracing::warn!(%credit_id, "Retirement lost the status race");
                CoreError::Conflict(
                    "Credit lot is no longer open for retirement; reload and retry".to_string(),
                )
            })?;

        let prev = Self::latest_token(&mut tx, credit.id, credit.parent_credit_id).await?;
        let token = compute_ledger_token(
            prev.as_deref(),
            &canonical_entry(
                credit.id,
                TX_RETIRE,
                credit.credit_amount,
                Some(owner_id),
                None,
            ),
        );
        let transaction = Self::insert_transaction(
            &mut tx,
            credit.id,
            TX_RETIRE,
            credit.credit_amount,
            Some(owner_id),
            None,
            None,
            Some(reason.label()),
            &token,
        )
        .await?;

        tx.commit().await?;
        Ok(RetireOutcome {
            credit,
            transaction,
        })
    }

    /// Insert a child lot produced by a transfer split.
    async fn insert_child_lot(
        tx: &mut Transaction<'_, Postgres>,
        parent: &CarbonCredit,
        owner_id: DbId,
        amount: f64,
    ) -> Result<CarbonCredit, sqlx::Error> {
        let serial = generate_serial(parent.vintage_year);
        let query = format!(
            "INSERT INTO carbon_credits
                (project_id, serial_number, credit_amount, vintage_year,
                 current_owner_id, issue_date, parent_credit_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {CREDIT_COLUMNS}"
        );
        sqlx::query_as::<_, CarbonCredit>(&query)
            .bind(parent.project_id)
            .bind(&serial)
            .bind(amount)
            .bind(parent.vintage_year)
            .bind(owner_id)
            .bind(parent.issue_date)
            .bind(parent.id)
            .fetch_one(&mut **tx)
            .await
    }

    /// Latest ledger token on a lot's lineage.
    ///
    /// A child lot has no transactions of its own until it closes, so the
    /// chain continues from the parent's closing transaction.
    async fn latest_token(
        tx: &mut Transaction<'_, Postgres>,
        credit_id: DbId,
        parent_credit_id: Option<DbId>,
    ) -> Result<Option<String>, sqlx::Error> {
        let own: Option<(String,)> = sqlx::query_as(
            "SELECT ledger_hash FROM credit_transactions
             WHERE credit_id = $1
             ORDER BY transaction_date DESC, created_at DESC
             LIMIT 1",
        )
        .bind(credit_id)
        .fetch_optional(&mut **tx)
        .await?;

        if let Some((token,)) = own {
            return Ok(Some(token));
        }

        let Some(parent_id) = parent_credit_id else {
            return Ok(None);
        };
        let parent: Option<(String,)> = sqlx::query_as(
            "SELECT ledger_hash FROM credit_transactions
             WHERE credit_id = $1
             ORDER BY transaction_date DESC, created_at DESC
             LIMIT 1",
        )
        .bind(parent_id)
        .fetch_optional(&mut **tx)
        .await?;
        Ok(parent.map(|(token,)| token))
    }

    /// Append a transaction row inside an open database transaction.
    #[allow(clippy::too_many_arguments)]
    async fn insert_transaction(
        tx: &mut Transaction<'_, Postgres>,
        credit_id: DbId,
        transaction_type: &str,
        amount: f64,
        from_profile_id: Option<DbId>,
        to_profile_id: Option<DbId>,
        price_per_credit: Option<f64>,
        notes: Option<&str>,
        ledger_hash: &str,
    ) -> Result<CreditTransaction, sqlx::Error> {
        let query = format!(
            "INSERT INTO credit_transactions
                (credit_id, transaction_type, amount, from_profile_id,
                 to_profile_id, price_per_credit, notes, ledger_hash)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {TX_COLUMNS}"
        );
        sqlx::query_as::<_, CreditTransaction>(&query)
            .bind(credit_id)
            .bind(transaction_type)
            .bind(amount)
            .bind(from_profile_id)
            .bind(to_profile_id)
            .bind(price_per_credit)
            .bind(notes)
            .bind(ledger_hash)
            .fetch_one(&mut **tx)
            .await
    }
}
