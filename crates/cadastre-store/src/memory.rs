use std::collections::HashMap;
use std::sync::RwLock;

use cadastre_types::{PartyId, Property, PropertyId, TransferRecord};

use crate::error::{StoreError, StoreResult};
use crate::traits::{PropertyStore, RegistryStore, TransferLedger};

/// In-memory, typed-map store.
///
/// The embedded relational-style backend: one table of properties keyed by
/// id, one table of transfer records grouped by property. Both live behind
/// a single `RwLock`, which makes every mutation (including the two-sided
/// transfer commit) a single critical section. Records are cloned on
/// read/write.
pub struct MemoryStore {
    inner: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    properties: HashMap<PropertyId, Property>,
    // Per-property transfer rows in append (oldest-first) order.
    transfers: HashMap<PropertyId, Vec<TransferRecord>>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Tables::default()),
        }
    }

    /// Number of properties currently stored.
    pub fn property_count(&self) -> usize {
        self.inner.read().expect("lock poisoned").properties.len()
    }

    /// Total number of transfer records across all properties.
    pub fn transfer_count(&self) -> usize {
        self.inner
            .read()
            .expect("lock poisoned")
            .transfers
            .values()
            .map(Vec::len)
            .sum()
    }

    /// Returns `true` if no properties are stored.
    pub fn is_empty(&self) -> bool {
        self.inner
            .read()
            .expect("lock poisoned")
            .properties
            .is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn cas_slot<'t>(
    tables: &'t mut Tables,
    property: &Property,
    expected_version: u64,
) -> StoreResult<&'t mut Property> {
    let slot = tables
        .properties
        .get_mut(&property.property_id)
        .ok_or_else(|| StoreError::MissingProperty(property.property_id.clone()))?;
    if slot.version != expected_version {
        return Err(StoreError::VersionConflict {
            property_id: property.property_id.clone(),
            expected: expected_version,
            actual: slot.version,
        });
    }
    Ok(slot)
}

impl PropertyStore for MemoryStore {
    fn get(&self, id: &PropertyId) -> StoreResult<Option<Property>> {
        let tables = self.inner.read().expect("lock poisoned");
        Ok(tables.properties.get(id).cloned())
    }

    fn insert(&self, property: &Property) -> StoreResult<()> {
        let mut tables = self.inner.write().expect("lock poisoned");
        if tables.properties.contains_key(&property.property_id) {
            return Err(StoreError::AlreadyExists(property.property_id.clone()));
        }
        tables
            .properties
            .insert(property.property_id.clone(), property.clone());
        Ok(())
    }

    fn update(&self, property: &Property, expected_version: u64) -> StoreResult<()> {
        let mut tables = self.inner.write().expect("lock poisoned");
        let slot = cas_slot(&mut tables, property, expected_version)?;
        *slot = property.clone();
        Ok(())
    }

    fn list_all(&self) -> StoreResult<Vec<Property>> {
        let tables = self.inner.read().expect("lock poisoned");
        let mut all: Vec<Property> = tables.properties.values().cloned().collect();
        all.sort_by(|a, b| a.property_id.cmp(&b.property_id));
        Ok(all)
    }

    fn list_by_owner(&self, owner: &PartyId) -> StoreResult<Vec<Property>> {
        let tables = self.inner.read().expect("lock poisoned");
        let mut owned: Vec<Property> = tables
            .properties
            .values()
            .filter(|p| p.owner == *owner)
            .cloned()
            .collect();
        owned.sort_by(|a, b| a.property_id.cmp(&b.property_id));
        Ok(owned)
    }
}

impl TransferLedger for MemoryStore {
    fn history(&self, property_id: &PropertyId) -> StoreResult<Vec<TransferRecord>> {
        let tables = self.inner.read().expect("lock poisoned");
        let mut rows: Vec<TransferRecord> = tables
            .transfers
            .get(property_id)
            .cloned()
            .unwrap_or_default();
        rows.reverse();
        Ok(rows)
    }

    fn list_by_party(&self, party: &PartyId) -> StoreResult<Vec<TransferRecord>> {
        let tables = self.inner.read().expect("lock poisoned");
        let mut rows: Vec<TransferRecord> = tables
            .transfers
            .values()
            .flatten()
            .filter(|r| r.involves(party))
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then(b.record_id.cmp(&a.record_id))
        });
        Ok(rows)
    }
}

impl RegistryStore for MemoryStore {
    fn commit_transfer(
        &self,
        property: &Property,
        expected_version: u64,
        record: &TransferRecord,
    ) -> StoreResult<()> {
        let mut tables = self.inner.write().expect("lock poisoned");
        // CAS first; the record is only appended once the property commit
        // is certain to succeed.
        let slot = cas_slot(&mut tables, property, expected_version)?;
        *slot = property.clone();
        tables
            .transfers
            .entry(record.property_id.clone())
            .or_default()
            .push(record.clone());
        tracing::debug!(property_id = %record.property_id, "transfer committed");
        Ok(())
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("property_count", &self.property_count())
            .field("transfer_count", &self.transfer_count())
            .finish()
    }
}
