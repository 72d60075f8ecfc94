use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::id::{PartyId, PropertyId};

/// Time-ordered identifier for a transfer record (UUID v7).
///
/// v7 ids sort by creation time, so the newest-first history queries can
/// break timestamp ties without a separate sequence column.
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TransferId(Uuid);

impl TransferId {
    /// Mint a fresh id for a record created now.
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Debug for TransferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TransferId({})", self.0)
    }
}

impl fmt::Display for TransferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable log entry of one ownership change.
///
/// Created by the state machine at transfer time and never modified
/// afterwards. `transfer_value` is in minor currency units.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRecord {
    pub record_id: TransferId,
    pub property_id: PropertyId,
    pub from: PartyId,
    pub to: PartyId,
    pub reason: String,
    /// Content hash of the supporting legal document. Opaque; only
    /// non-emptiness is enforced.
    pub document_hash: String,
    pub notary_info: String,
    pub transfer_value: u64,
    pub payment_status: String,
    pub timestamp: DateTime<Utc>,
}

impl TransferRecord {
    /// Whether `party` appears on either side of the transfer.
    pub fn involves(&self, party: &PartyId) -> bool {
        self.from == *party || self.to == *party
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(from: &str, to: &str) -> TransferRecord {
        TransferRecord {
            record_id: TransferId::generate(),
            property_id: PropertyId::new("PROP001").unwrap(),
            from: PartyId::new(from).unwrap(),
            to: PartyId::new(to).unwrap(),
            reason: "Venda".into(),
            document_hash: "0x1234567890abcdef".into(),
            notary_info: "Cartório Central".into(),
            transfer_value: 1_000_000,
            payment_status: "PAGO".into(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn involves_matches_either_side() {
        let r = sample("alice", "bob");
        assert!(r.involves(&PartyId::new("alice").unwrap()));
        assert!(r.involves(&PartyId::new("bob").unwrap()));
        assert!(!r.involves(&PartyId::new("carol").unwrap()));
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(TransferId::generate(), TransferId::generate());
    }

    #[test]
    fn v7_ids_order_by_creation() {
        let first = TransferId::generate();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = TransferId::generate();
        assert!(first < second);
    }

    #[test]
    fn wire_form_is_camel_case() {
        let json = serde_json::to_value(sample("alice", "bob")).unwrap();
        assert_eq!(json["from"], "alice");
        assert_eq!(json["documentHash"], "0x1234567890abcdef");
        assert_eq!(json["paymentStatus"], "PAGO");
        assert_eq!(json["transferValue"], 1_000_000);
    }

    #[test]
    fn serde_roundtrip() {
        let r = sample("alice", "bob");
        let json = serde_json::to_string(&r).unwrap();
        let parsed: TransferRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, r);
    }
}
