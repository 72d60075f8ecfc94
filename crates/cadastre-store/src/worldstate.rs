use std::collections::BTreeMap;
use std::sync::RwLock;

use cadastre_types::{PartyId, Property, PropertyId, TransferId, TransferRecord};

use crate::error::{StoreError, StoreResult};
use crate::traits::{PropertyStore, RegistryStore, TransferLedger};

/// Namespace prefixes for composite keys.
const PROPERTY_NS: &str = "prop";
const TRANSFER_NS: &str = "xfer";

/// Composite-key separator. U+0000 cannot appear in a validated id, so
/// composite keys never collide across namespaces or id boundaries.
const KEY_SEP: char = '\u{0}';

fn property_key(id: &PropertyId) -> String {
    format!("{PROPERTY_NS}{KEY_SEP}{id}")
}

fn transfer_key(property_id: &PropertyId, record_id: &TransferId) -> String {
    format!("{TRANSFER_NS}{KEY_SEP}{property_id}{KEY_SEP}{record_id}")
}

fn transfer_prefix(property_id: &PropertyId) -> String {
    format!("{TRANSFER_NS}{KEY_SEP}{property_id}{KEY_SEP}")
}

fn encode<T: serde::Serialize>(value: &T) -> StoreResult<String> {
    serde_json::to_string(value).map_err(|e| StoreError::Serialization(e.to_string()))
}

fn decode<T: serde::de::DeserializeOwned>(raw: &str) -> StoreResult<T> {
    serde_json::from_str(raw).map_err(|e| StoreError::Serialization(e.to_string()))
}

/// World-state store: a flat, ordered state database of JSON values under
/// composite keys, the view a permissioned-ledger chaincode has of its
/// backing world state.
///
/// Properties live under `prop\0<id>`; transfer records under
/// `xfer\0<propertyId>\0<recordId>`. Record ids are time-ordered, so a range
/// scan over a property's transfer prefix yields records in creation order.
/// The whole state sits behind one `RwLock`, giving the same atomicity
/// contract as [`MemoryStore`].
///
/// [`MemoryStore`]: crate::MemoryStore
pub struct WorldStateStore {
    state: RwLock<BTreeMap<String, String>>,
}

impl WorldStateStore {
    /// Create a new empty world state.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of keys in the world state (properties plus transfer records).
    pub fn key_count(&self) -> usize {
        self.state.read().expect("lock poisoned").len()
    }

    fn cas_write(
        state: &mut BTreeMap<String, String>,
        property: &Property,
        expected_version: u64,
    ) -> StoreResult<()> {
        let key = property_key(&property.property_id);
        let current = state
            .get(&key)
            .ok_or_else(|| StoreError::MissingProperty(property.property_id.clone()))?;
        let stored: Property = decode(current)?;
        if stored.version != expected_version {
            return Err(StoreError::VersionConflict {
                property_id: property.property_id.clone(),
                expected: expected_version,
                actual: stored.version,
            });
        }
        let encoded = encode(property)?;
        state.insert(key, encoded);
        Ok(())
    }
}

impl Default for WorldStateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyStore for WorldStateStore {
    fn get(&self, id: &PropertyId) -> StoreResult<Option<Property>> {
        let state = self.state.read().expect("lock poisoned");
        state.get(&property_key(id)).map(|raw| decode(raw)).transpose()
    }

    fn insert(&self, property: &Property) -> StoreResult<()> {
        let encoded = encode(property)?;
        let mut state = self.state.write().expect("lock poisoned");
        let key = property_key(&property.property_id);
        if state.contains_key(&key) {
            return Err(StoreError::AlreadyExists(property.property_id.clone()));
        }
        state.insert(key, encoded);
        Ok(())
    }

    fn update(&self, property: &Property, expected_version: u64) -> StoreResult<()> {
        let mut state = self.state.write().expect("lock poisoned");
        Self::cas_write(&mut state, property, expected_version)
    }

    fn list_all(&self) -> StoreResult<Vec<Property>> {
        let state = self.state.read().expect("lock poisoned");
        let prefix = format!("{PROPERTY_NS}{KEY_SEP}");
        state
            .iter()
            .filter(|(k, _)| k.starts_with(&prefix))
            .map(|(_, raw)| decode(raw))
            .collect()
    }

    fn list_by_owner(&self, owner: &PartyId) -> StoreResult<Vec<Property>> {
        Ok(self
            .list_all()?
            .into_iter()
            .filter(|p| p.owner == *owner)
            .collect())
    }
}

impl TransferLedger for WorldStateStore {
    fn history(&self, property_id: &PropertyId) -> StoreResult<Vec<TransferRecord>> {
        let state = self.state.read().expect("lock poisoned");
        let prefix = transfer_prefix(property_id);
        let mut rows: Vec<TransferRecord> = state
            .iter()
            .filter(|(k, _)| k.starts_with(&prefix))
            .map(|(_, raw)| decode(raw))
            .collect::<StoreResult<_>>()?;
        rows.reverse();
        Ok(rows)
    }

    fn list_by_party(&self, party: &PartyId) -> StoreResult<Vec<TransferRecord>> {
        let state = self.state.read().expect("lock poisoned");
        let prefix = format!("{TRANSFER_NS}{KEY_SEP}");
        let mut rows: Vec<TransferRecord> = state
            .iter()
            .filter(|(k, _)| k.starts_with(&prefix))
            .map(|(_, raw)| decode::<TransferRecord>(raw))
            .collect::<StoreResult<_>>()?;
        rows.retain(|r| r.involves(party));
        rows.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then(b.record_id.cmp(&a.record_id))
        });
        Ok(rows)
    }
}

impl RegistryStore for WorldStateStore {
    fn commit_transfer(
        &self,
        property: &Property,
        expected_version: u64,
        record: &TransferRecord,
    ) -> StoreResult<()> {
        let encoded_record = encode(record)?;
        let mut state = self.state.write().expect("lock poisoned");
        Self::cas_write(&mut state, property, expected_version)?;
        state.insert(
            transfer_key(&record.property_id, &record.record_id),
            encoded_record,
        );
        tracing::debug!(property_id = %record.property_id, "transfer committed");
        Ok(())
    }
}

impl std::fmt::Debug for WorldStateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorldStateStore")
            .field("key_count", &self.key_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use cadastre_types::PropertyStatus;

    fn party(name: &str) -> PartyId {
        PartyId::new(name).unwrap()
    }

    fn prop_id(id: &str) -> PropertyId {
        PropertyId::new(id).unwrap()
    }

    fn property(id: &str, owner: &str) -> Property {
        Property {
            property_id: prop_id(id),
            registration_number: "123456".into(),
            owner: party(owner),
            description: "Descrição".into(),
            property_address: "Endereço".into(),
            property_type: "APARTAMENTO".into(),
            area: 80,
            status: PropertyStatus::Regular,
            has_mortgage: false,
            mortgage_details: String::new(),
            registered_at: Utc::now(),
            last_transfer_date: None,
            version: 1,
        }
    }

    fn transfer(id: &str, from: &str, to: &str, at_ms: i64) -> TransferRecord {
        TransferRecord {
            record_id: TransferId::generate(),
            property_id: prop_id(id),
            from: party(from),
            to: party(to),
            reason: "Venda".into(),
            document_hash: "0xabc".into(),
            notary_info: "Cartório Central".into(),
            transfer_value: 100,
            payment_status: "PENDENTE".into(),
            timestamp: Utc.timestamp_millis_opt(at_ms).unwrap(),
        }
    }

    // -----------------------------------------------------------------------
    // Keyed storage behaves like the typed adapter
    // -----------------------------------------------------------------------

    #[test]
    fn insert_get_roundtrip() {
        let store = WorldStateStore::new();
        let p = property("PROP001", "alice");
        store.insert(&p).unwrap();
        assert_eq!(store.get(&prop_id("PROP001")).unwrap(), Some(p));
        assert_eq!(store.key_count(), 1);
    }

    #[test]
    fn duplicate_insert_fails() {
        let store = WorldStateStore::new();
        store.insert(&property("PROP001", "alice")).unwrap();
        let err = store.insert(&property("PROP001", "bob")).unwrap_err();
        assert_eq!(err, StoreError::AlreadyExists(prop_id("PROP001")));
    }

    #[test]
    fn cas_update_and_stale_rejection() {
        let store = WorldStateStore::new();
        store.insert(&property("PROP001", "alice")).unwrap();

        let mut updated = property("PROP001", "alice");
        updated.status = PropertyStatus::EmDisputa;
        updated.version = 2;
        store.update(&updated, 1).unwrap();

        let err = store.update(&updated, 1).unwrap_err();
        assert!(matches!(
            err,
            StoreError::VersionConflict {
                expected: 1,
                actual: 2,
                ..
            }
        ));
    }

    #[test]
    fn update_of_missing_property_fails() {
        let store = WorldStateStore::new();
        let err = store.update(&property("PROP001", "alice"), 1).unwrap_err();
        assert_eq!(err, StoreError::MissingProperty(prop_id("PROP001")));
    }

    // -----------------------------------------------------------------------
    // Composite keys
    // -----------------------------------------------------------------------

    #[test]
    fn prefix_scans_do_not_bleed_across_ids() {
        let store = WorldStateStore::new();
        store.insert(&property("P1", "alice")).unwrap();
        store.insert(&property("P1x", "alice")).unwrap();

        let mut p1 = property("P1", "bob");
        p1.version = 2;
        store
            .commit_transfer(&p1, 1, &transfer("P1", "alice", "bob", 1_000))
            .unwrap();

        assert_eq!(store.history(&prop_id("P1")).unwrap().len(), 1);
        assert!(store.history(&prop_id("P1x")).unwrap().is_empty());
    }

    #[test]
    fn list_all_sees_only_properties() {
        let store = WorldStateStore::new();
        store.insert(&property("PROP001", "alice")).unwrap();
        store.insert(&property("PROP002", "bob")).unwrap();

        let mut p = property("PROP001", "bob");
        p.version = 2;
        store
            .commit_transfer(&p, 1, &transfer("PROP001", "alice", "bob", 1_000))
            .unwrap();

        let all = store.list_all().unwrap();
        assert_eq!(all.len(), 2);
    }

    // -----------------------------------------------------------------------
    // Transfer commit and ordering
    // -----------------------------------------------------------------------

    #[test]
    fn commit_transfer_is_atomic() {
        let store = WorldStateStore::new();
        store.insert(&property("PROP001", "alice")).unwrap();

        let mut updated = property("PROP001", "bob");
        updated.version = 2;
        let record = transfer("PROP001", "alice", "bob", 1_000);
        let err = store.commit_transfer(&updated, 9, &record).unwrap_err();
        assert!(matches!(err, StoreError::VersionConflict { .. }));

        // Neither side applied.
        assert_eq!(
            store.get(&prop_id("PROP001")).unwrap().unwrap().owner,
            party("alice")
        );
        assert!(store.history(&prop_id("PROP001")).unwrap().is_empty());

        store.commit_transfer(&updated, 1, &record).unwrap();
        assert_eq!(store.history(&prop_id("PROP001")).unwrap(), vec![record]);
    }

    #[test]
    fn history_is_newest_first() {
        let store = WorldStateStore::new();
        store.insert(&property("PROP001", "alice")).unwrap();

        let mut to_bob = property("PROP001", "bob");
        to_bob.version = 2;
        store
            .commit_transfer(&to_bob, 1, &transfer("PROP001", "alice", "bob", 1_000))
            .unwrap();

        let mut to_carol = property("PROP001", "carol");
        to_carol.version = 3;
        store
            .commit_transfer(&to_carol, 2, &transfer("PROP001", "bob", "carol", 2_000))
            .unwrap();

        let history = store.history(&prop_id("PROP001")).unwrap();
        assert_eq!(history[0].to, party("carol"));
        assert_eq!(history[1].to, party("bob"));
    }

    #[test]
    fn list_by_party_spans_properties() {
        let store = WorldStateStore::new();
        store.insert(&property("PROP001", "alice")).unwrap();
        store.insert(&property("PROP002", "bob")).unwrap();

        let mut p1 = property("PROP001", "bob");
        p1.version = 2;
        store
            .commit_transfer(&p1, 1, &transfer("PROP001", "alice", "bob", 1_000))
            .unwrap();

        let mut p2 = property("PROP002", "carol");
        p2.version = 2;
        store
            .commit_transfer(&p2, 1, &transfer("PROP002", "bob", "carol", 2_000))
            .unwrap();

        let bobs = store.list_by_party(&party("bob")).unwrap();
        assert_eq!(bobs.len(), 2);
        assert_eq!(bobs[0].property_id, prop_id("PROP002"));
    }
}
