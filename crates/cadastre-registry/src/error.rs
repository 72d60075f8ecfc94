use std::fmt;

use cadastre_store::StoreError;
use cadastre_types::{PartyId, PropertyId, PropertyStatus};

/// Business-rule conflict detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictReason {
    /// Transfer blocked: the property carries an active mortgage.
    ActiveMortgage,
    /// AddMortgage on a property that already has one.
    AlreadyMortgaged,
    /// RemoveMortgage on a property that has none.
    NotMortgaged,
    /// Transfer blocked: the property status does not permit it.
    StatusForbidsTransfer(PropertyStatus),
    /// The operation observed stale state; re-read and retry.
    StaleVersion,
}

impl ConflictReason {
    /// Only the optimistic-concurrency collision is safe to retry blindly;
    /// every business-rule conflict is terminal for the request.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StaleVersion)
    }
}

impl fmt::Display for ConflictReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ActiveMortgage => write!(f, "property has an active mortgage"),
            Self::AlreadyMortgaged => write!(f, "property already has a mortgage"),
            Self::NotMortgaged => write!(f, "property has no mortgage"),
            Self::StatusForbidsTransfer(status) => {
                write!(f, "property status {status} does not permit transfer")
            }
            Self::StaleVersion => write!(f, "property was modified concurrently"),
        }
    }
}

/// Errors produced by registry operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("property already exists: {0}")]
    AlreadyExists(PropertyId),

    #[error("property not found: {0}")]
    NotFound(PropertyId),

    #[error("only the owner can perform this action (actor: {actor})")]
    Forbidden { actor: PartyId },

    #[error("conflict: {0}")]
    Conflict(ConflictReason),

    #[error("store error: {0}")]
    Store(StoreError),
}

impl RegistryError {
    /// Whether a caller may retry the same request unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Conflict(reason) if reason.is_retryable())
    }
}

impl From<StoreError> for RegistryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AlreadyExists(id) => Self::AlreadyExists(id),
            StoreError::VersionConflict { .. } => Self::Conflict(ConflictReason::StaleVersion),
            other => Self::Store(other),
        }
    }
}

/// Result alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_stale_version_is_retryable() {
        assert!(ConflictReason::StaleVersion.is_retryable());
        assert!(!ConflictReason::ActiveMortgage.is_retryable());
        assert!(!ConflictReason::AlreadyMortgaged.is_retryable());
        assert!(!ConflictReason::NotMortgaged.is_retryable());
        assert!(
            !ConflictReason::StatusForbidsTransfer(PropertyStatus::Bloqueado).is_retryable()
        );
    }

    #[test]
    fn store_errors_map_into_the_taxonomy() {
        let id = PropertyId::new("PROP001").unwrap();

        let err: RegistryError = StoreError::AlreadyExists(id.clone()).into();
        assert_eq!(err, RegistryError::AlreadyExists(id.clone()));

        let err: RegistryError = StoreError::VersionConflict {
            property_id: id.clone(),
            expected: 1,
            actual: 2,
        }
        .into();
        assert_eq!(err, RegistryError::Conflict(ConflictReason::StaleVersion));
        assert!(err.is_retryable());

        let err: RegistryError = StoreError::MissingProperty(id.clone()).into();
        assert!(matches!(err, RegistryError::Store(_)));
        assert!(!err.is_retryable());
    }
}
