//! Blob storage seam for uploaded files.
//!
//! Uploads land under a caller-scoped path (`{profile_id}/{timestamp}_{name}`)
//! so one profile can never overwrite another's files. The trait keeps the
//! handlers independent of where bytes actually live; the only shipped
//! implementation writes to the local filesystem under
//! `ServerConfig::storage_root`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bluecarbon_core::error::CoreError;
use bluecarbon_core::types::DbId;

/// Abstract blob store. Returns the storage path reference for the stored
/// object; infrastructure failures surface as [`CoreError::TransientIo`].
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Store `bytes` under a path scoped to `profile_id`, returning the
    /// storage path reference.
    async fn store(
        &self,
        profile_id: DbId,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<String, CoreError>;
}

/// Local-filesystem storage backend.
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl StorageBackend for LocalStorage {
    async fn store(
        &self,
        profile_id: DbId,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<String, CoreError> {
        let scoped = scoped_path(profile_id, file_name, chrono::Utc::now().timestamp_millis());
        let full_path = self.root.join(&scoped);

        let parent = full_path
            .parent()
            .ok_or_else(|| CoreError::Internal("Storage path has no parent".to_string()))?;
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| CoreError::TransientIo(format!("Failed to create upload dir: {e}")))?;
        tokio::fs::write(&full_path, bytes)
            .await
            .map_err(|e| CoreError::TransientIo(format!("Failed to write upload: {e}")))?;

        Ok(scoped.to_string_lossy().into_owned())
    }
}

/// Build the caller-scoped relative path for an upload.
fn scoped_path(profile_id: DbId, file_name: &str, timestamp_millis: i64) -> PathBuf {
    let safe_name = sanitize_file_name(file_name);
    Path::new(&profile_id.to_string()).join(format!("{timestamp_millis}_{safe_name}"))
}

/// Reduce an arbitrary client-supplied file name to a safe basename.
///
/// Strips any directory components, then replaces every character outside
/// `[A-Za-z0-9._-]` with `_`. An empty result becomes `"upload"`.
fn sanitize_file_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let trimmed = cleaned.trim_matches('.').to_string();
    if trimmed.is_empty() {
        "upload".to_string()
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> DbId {
        uuid::Uuid::from_u128(42)
    }

    #[test]
    fn scoped_path_starts_with_profile_id() {
        let path = scoped_path(profile(), "biomass.csv", 1700000000000);
        assert!(path.starts_with(profile().to_string()));
        assert!(path.to_string_lossy().ends_with("1700000000000_biomass.csv"));
    }

    #[test]
    fn sanitize_strips_directory_components() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\temp\\data.xlsx"), "data.xlsx");
    }

    #[test]
    fn sanitize_replaces_unusual_characters() {
        assert_eq!(sanitize_file_name("march data (v2).csv"), "march_data__v2_.csv");
    }

    #[test]
    fn sanitize_never_returns_empty() {
        assert_eq!(sanitize_file_name(""), "upload");
        assert_eq!(sanitize_file_name("..."), "upload");
    }

    #[tokio::test]
    async fn local_storage_writes_under_scoped_path() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());

        let path = storage
            .store(profile(), "survey.csv", b"plot,carbon\n1,2.5\n")
            .await
            .unwrap();

        assert!(path.starts_with(&profile().to_string()));
        let written = tokio::fs::read(dir.path().join(&path)).await.unwrap();
        assert_eq!(written, b"plot,carbon\n1,2.5\n");
    }

    #[tokio::test]
    async fn uploads_for_different_profiles_never_collide() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());
        let other = uuid::Uuid::from_u128(43);

        let a = storage.store(profile(), "same.csv", b"a").await.unwrap();
        let b = storage.store(other, "same.csv", b"b").await.unwrap();

        assert_ne!(a, b);
        assert_eq!(tokio::fs::read(dir.path().join(&a)).await.unwrap(), b"a");
        assert_eq!(tokio::fs::read(dir.path().join(&b)).await.unwrap(), b"b");
    }
}
