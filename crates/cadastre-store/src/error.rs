use cadastre_types::PropertyId;

/// Errors from property store and transfer ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Insert attempted for a property id that is already present.
    #[error("property already stored: {0}")]
    AlreadyExists(PropertyId),

    /// Update attempted for a property id that is not present.
    #[error("property missing from store: {0}")]
    MissingProperty(PropertyId),

    /// Compare-and-swap failed: the stored version is not the one the
    /// caller observed. Safe to retry after re-reading.
    #[error("version conflict on {property_id}: expected {expected}, found {actual}")]
    VersionConflict {
        property_id: PropertyId,
        expected: u64,
        actual: u64,
    },

    /// Encoding or decoding of a stored value failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
