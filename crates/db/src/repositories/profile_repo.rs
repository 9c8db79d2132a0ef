//! Repository for the `profiles` table.

use bluecarbon_core::roles::UserRole;
use bluecarbon_core::types::DbId;
use sqlx::PgPool;

use crate::models::profile::{CreateProfile, Profile};

/// Column list for profiles queries.
const PROFILE_COLUMNS: &str = "id, email, password_hash, full_name, role, \
    organization, contact_email, phone, created_at, updated_at";

/// Provides CRUD operations for profiles.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Create a new profile, returning the created row.
    ///
    /// New profiles always start with the `public` role; an admin promotes
    /// them afterwards via [`ProfileRepo::set_role`].
    pub async fn create(pool: &PgPool, input: &CreateProfile) -> Result<Profile, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles
                (email, password_hash, full_name, organization, contact_email, phone)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {PROFILE_COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.full_name)
            .bind(&input.organization)
            .bind(&input.contact_email)
            .bind(&input.phone)
            .fetch_one(pool)
            .await
    }

    /// Find a profile by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a profile by email (login lookup).
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE email = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List all profiles, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Profile>, sqlx::Error> {
        let query = format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Profile>(&query).fetch_all(pool).await
    }

    /// Reassign a profile's role, returning the updated row.
    pub async fn set_role(
        pool: &PgPool,
        id: DbId,
        role: UserRole,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!(
            "UPDATE profiles SET role = $1, updated_at = now()
             WHERE id = $2
             RETURNING {PROFILE_COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(role)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
