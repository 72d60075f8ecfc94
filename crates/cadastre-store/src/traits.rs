use cadastre_types::{PartyId, Property, PropertyId, TransferRecord};

use crate::error::StoreResult;

/// Durable keyed storage of property records.
///
/// All implementations must satisfy these invariants:
/// - `insert` is the only way a new property id enters the store, and it
///   fails on a duplicate id without touching the existing record.
/// - `update` commits only when the stored version equals
///   `expected_version`; otherwise it fails and changes nothing.
/// - Reads issued after a successful mutation observe that mutation.
/// - Listing order is unspecified but stable for an unchanged store.
pub trait PropertyStore: Send + Sync {
    /// Read a property by id. Returns `Ok(None)` if absent.
    fn get(&self, id: &PropertyId) -> StoreResult<Option<Property>>;

    /// Store a newly registered property. Fails with
    /// [`StoreError::AlreadyExists`] if the id is taken.
    ///
    /// [`StoreError::AlreadyExists`]: crate::StoreError::AlreadyExists
    fn insert(&self, property: &Property) -> StoreResult<()>;

    /// Replace a stored property, compare-and-swap on its version.
    ///
    /// `expected_version` is the version the caller read before computing
    /// the new state; `property.version` carries the incremented value to
    /// commit. Fails with [`StoreError::VersionConflict`] when another
    /// writer got there first.
    ///
    /// [`StoreError::VersionConflict`]: crate::StoreError::VersionConflict
    fn update(&self, property: &Property, expected_version: u64) -> StoreResult<()>;

    /// All stored properties.
    fn list_all(&self) -> StoreResult<Vec<Property>>;

    /// All properties currently held by `owner`.
    fn list_by_owner(&self, owner: &PartyId) -> StoreResult<Vec<Property>>;
}

/// Append-only history of ownership transfers.
pub trait TransferLedger: Send + Sync {
    /// Transfer history for one property, newest-first.
    fn history(&self, property_id: &PropertyId) -> StoreResult<Vec<TransferRecord>>;

    /// All transfers where `party` appears as sender or receiver,
    /// newest-first.
    fn list_by_party(&self, party: &PartyId) -> StoreResult<Vec<TransferRecord>>;
}

/// Combined store boundary the state machine mutates through.
///
/// `commit_transfer` is the one cross-cutting operation: the record append
/// and the owner update must land in a single critical section so no reader
/// ever observes one without the other.
pub trait RegistryStore: PropertyStore + TransferLedger {
    /// Atomically append `record` and commit `property` (compare-and-swap
    /// on `expected_version`). On any failure, neither side is applied.
    fn commit_transfer(
        &self,
        property: &Property,
        expected_version: u64,
        record: &TransferRecord,
    ) -> StoreResult<()>;
}
