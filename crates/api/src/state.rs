use std::sync::Arc;

use crate::config::ServerConfig;
use crate::storage::StorageBackend;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: bluecarbon_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Blob storage for uploaded project documents and MRV data files.
    pub storage: Arc<dyn StorageBackend>,
}
