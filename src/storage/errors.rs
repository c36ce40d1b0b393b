//! Error types for grant storage operations.

/// Errors produced by grant store implementations shipped with this crate.
///
/// Custom [`crate::storage::GrantStore`] implementations may use their own
/// error type; this one covers the in-memory backend and is a reasonable
/// default for others.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A grant already exists under the key being inserted.
    ///
    /// This is how concurrent seed/set races surface. The storage layer does
    /// not retry; the caller decides.
    #[error("Duplicate grant: {key}")]
    DuplicateGrant { key: String },

    /// Backend-specific failure.
    #[error("Storage internal error: {message}")]
    Internal { message: String },
}

impl StorageError {
    /// Create a duplicate-grant error for the given key.
    pub fn duplicate_grant(key: &crate::storage::GrantKey) -> Self {
        Self::DuplicateGrant {
            key: key.to_string(),
        }
    }

    /// Create an internal storage error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
