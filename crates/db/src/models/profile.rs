//! Profile entity model and DTOs.

use bluecarbon_core::roles::UserRole;
use bluecarbon_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A profile row from the `profiles` table.
///
/// The password hash never leaves the server; it is skipped on
/// serialization.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub id: DbId,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: String,
    pub role: UserRole,
    pub organization: Option<String>,
    pub contact_email: Option<String>,
    pub phone: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new profile. The password is already hashed by the
/// caller; this layer never sees plaintext credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProfile {
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub organization: Option<String>,
    pub contact_email: Option<String>,
    pub phone: Option<String>,
}
