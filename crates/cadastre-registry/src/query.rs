use cadastre_types::{PartyId, Property, PropertyId, TransferRecord};

use crate::error::RegistryResult;
use crate::registry::PropertyRegistry;

/// Read-only projections. None of these mutate state or consult the access
/// policy; identity enforcement on reads is the transport layer's concern.
impl PropertyRegistry {
    /// Look up one property by id.
    pub fn get_property(&self, id: &PropertyId) -> RegistryResult<Property> {
        self.load(id)
    }

    /// All registered properties.
    pub fn list_all_properties(&self) -> RegistryResult<Vec<Property>> {
        Ok(self.store().list_all()?)
    }

    /// Properties currently held by `owner`.
    pub fn list_properties_by_owner(&self, owner: &PartyId) -> RegistryResult<Vec<Property>> {
        Ok(self.store().list_by_owner(owner)?)
    }

    /// Ownership history of one property, newest-first. Fails with
    /// `NotFound` for an unregistered id.
    pub fn transfer_history(&self, id: &PropertyId) -> RegistryResult<Vec<TransferRecord>> {
        self.load(id)?;
        Ok(self.store().history(id)?)
    }

    /// Every transfer where `party` appears as sender or receiver,
    /// newest-first across all properties.
    pub fn transfers_by_party(&self, party: &PartyId) -> RegistryResult<Vec<TransferRecord>> {
        Ok(self.store().list_by_party(party)?)
    }
}
