use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{PartyId, PropertyId};
use crate::status::PropertyStatus;

/// A registered property record.
///
/// `property_id`, `registration_number`, `description`, `property_address`,
/// `property_type`, and `area` are fixed at registration. `owner` and
/// `last_transfer_date` change only through a successful transfer; `status`
/// and the mortgage fields change only through their dedicated operations.
///
/// `version` increments on every committed mutation and is the
/// compare-and-swap token the store layer uses to reject stale writes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub property_id: PropertyId,
    pub registration_number: String,
    pub owner: PartyId,
    pub description: String,
    pub property_address: String,
    pub property_type: String,
    /// Area in square units. Positive; zero is rejected at registration.
    pub area: u64,
    pub status: PropertyStatus,
    pub has_mortgage: bool,
    /// Free-text encumbrance details. Empty exactly when `has_mortgage` is
    /// false.
    pub mortgage_details: String,
    pub registered_at: DateTime<Utc>,
    pub last_transfer_date: Option<DateTime<Utc>>,
    pub version: u64,
}

impl Property {
    /// Whether the mortgage flag and details agree.
    pub fn mortgage_invariant_holds(&self) -> bool {
        self.has_mortgage != self.mortgage_details.is_empty()
    }

    /// Whether `party` is the current owner.
    pub fn is_owned_by(&self, party: &PartyId) -> bool {
        self.owner == *party
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Property {
        Property {
            property_id: PropertyId::new("PROP001").unwrap(),
            registration_number: "123456".into(),
            owner: PartyId::new("alice").unwrap(),
            description: "Casa em condomínio fechado".into(),
            property_address: "Rua das Flores, 123".into(),
            property_type: "CASA".into(),
            area: 150,
            status: PropertyStatus::Regular,
            has_mortgage: false,
            mortgage_details: String::new(),
            registered_at: Utc::now(),
            last_transfer_date: None,
            version: 1,
        }
    }

    #[test]
    fn mortgage_invariant() {
        let mut p = sample();
        assert!(p.mortgage_invariant_holds());

        p.has_mortgage = true;
        assert!(!p.mortgage_invariant_holds());

        p.mortgage_details = "Hipoteca Banco XYZ".into();
        assert!(p.mortgage_invariant_holds());
    }

    #[test]
    fn ownership_check() {
        let p = sample();
        assert!(p.is_owned_by(&PartyId::new("alice").unwrap()));
        assert!(!p.is_owned_by(&PartyId::new("bob").unwrap()));
    }

    #[test]
    fn wire_form_is_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["propertyId"], "PROP001");
        assert_eq!(json["registrationNumber"], "123456");
        assert_eq!(json["propertyAddress"], "Rua das Flores, 123");
        assert_eq!(json["hasMortgage"], false);
        assert_eq!(json["mortgageDetails"], "");
        assert!(json["lastTransferDate"].is_null());
    }

    #[test]
    fn serde_roundtrip() {
        let p = sample();
        let json = serde_json::to_string(&p).unwrap();
        let parsed: Property = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, p);
    }
}
