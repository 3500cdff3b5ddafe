//! Error types for parcel persistence.

use thiserror::Error;

/// Errors returned by [`ParcelStore`](crate::store::ParcelStore) operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No parcel row matched the requested number.
    #[error("parcel {0} not found")]
    NotFound(i64),

    /// Any failure reported by the storage engine, passed through unchanged.
    #[error(transparent)]
    Persistence(#[from] rusqlite::Error),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// Returned when a string is not one of the known parcel statuses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown parcel status: {0:?}")]
pub struct ParseStatusError(pub String);

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
