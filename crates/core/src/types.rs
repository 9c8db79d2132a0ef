//! Shared primitive type aliases used across all crates.

/// Database primary-key type. All entity tables are UUID-keyed.
pub type DbId = uuid::Uuid;

/// UTC timestamp type for all `*_at` columns.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
