use cadastre_types::{PartyId, Property};

use crate::error::{RegistryError, RegistryResult};

/// Access gate for mutating operations.
///
/// The state machine consults the policy once per mutation, after loading
/// the current property state and before evaluating any business rule.
/// Registration has no prior owner and is not gated; reads never consult
/// the policy.
pub trait AccessPolicy: Send + Sync {
    /// Decide whether `actor` may mutate `property`. Returns
    /// [`RegistryError::Forbidden`] to deny.
    fn authorize(&self, property: &Property, actor: &PartyId) -> RegistryResult<()>;
}

/// The registry's one rule: the acting identity must equal the property's
/// current owner.
pub struct OwnerOnly;

impl AccessPolicy for OwnerOnly {
    fn authorize(&self, property: &Property, actor: &PartyId) -> RegistryResult<()> {
        if property.is_owned_by(actor) {
            Ok(())
        } else {
            Err(RegistryError::Forbidden {
                actor: actor.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use cadastre_types::{PropertyId, PropertyStatus};

    fn property(owner: &str) -> Property {
        Property {
            property_id: PropertyId::new("PROP001").unwrap(),
            registration_number: "123456".into(),
            owner: PartyId::new(owner).unwrap(),
            description: "Descrição".into(),
            property_address: "Endereço".into(),
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
    fn owner_is_authorized() {
        let p = property("alice");
        assert!(OwnerOnly
            .authorize(&p, &PartyId::new("alice").unwrap())
            .is_ok());
    }

    #[test]
    fn non_owner_is_forbidden() {
        let p = property("alice");
        let err = OwnerOnly
            .authorize(&p, &PartyId::new("bob").unwrap())
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::Forbidden {
                actor: PartyId::new("bob").unwrap()
            }
        );
    }
}
