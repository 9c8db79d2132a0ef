//! Repositories, one per entity. All SQL lives here.

pub mod credit_repo;
pub mod mrv_repo;
pub mod profile_repo;
pub mod project_repo;
pub mod public_repo;
pub mod session_repo;
pub mod transaction_repo;

pub use credit_repo::CreditRepo;
pub use mrv_repo::MrvRepo;
pub use profile_repo::ProfileRepo;
pub use project_repo::ProjectRepo;
pub use public_repo::PublicRepo;
pub use session_repo::SessionRepo;
pub use transaction_repo::TransactionRepo;

use bluecarbon_core::error::CoreError;

/// Error type for multi-step repository operations that can fail on either
/// a domain rule (lost race, closed lot) or the database itself.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}
