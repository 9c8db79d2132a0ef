use crate::types::DbId;

/// Domain error taxonomy shared by the repository and API layers.
///
/// Every failure a user action can produce maps onto exactly one of these
/// variants; the API layer translates them to HTTP statuses and tags
/// [`CoreError::TransientIo`] as safe to retry.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Transient I/O failure: {0}")]
    TransientIo(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Whether a caller may safely retry the failed operation as-is.
    ///
    /// Only infrastructure failures qualify; a [`CoreError::Conflict`]
    /// requires the caller to reload current state first.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CoreError::TransientIo(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_io_is_retryable() {
        assert!(CoreError::TransientIo("upload interrupted".into()).is_retryable());
    }

    #[test]
    fn conflict_is_not_retryable() {
        assert!(!CoreError::Conflict("credit already retired".into()).is_retryable());
    }

    #[test]
    fn validation_is_not_retryable() {
        assert!(!CoreError::Validation("name must not be empty".into()).is_retryable());
    }

    #[test]
    fn not_found_message_names_entity() {
        let id = uuid::Uuid::nil();
        let err = CoreError::NotFound {
            entity: "Project",
            id,
        };
        assert!(err.to_string().contains("Project"));
        assert!(err.to_string().contains(&id.to_string()));
    }
}
