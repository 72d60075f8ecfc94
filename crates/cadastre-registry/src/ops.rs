use serde::{Deserialize, Serialize};

use cadastre_types::{PartyId, PropertyId};

/// Input to [`PropertyRegistry::register`].
///
/// [`PropertyRegistry::register`]: crate::PropertyRegistry::register
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterProperty {
    pub property_id: PropertyId,
    pub registration_number: String,
    pub owner: PartyId,
    pub description: String,
    pub property_address: String,
    /// Area in square units; must be positive.
    pub area: u64,
    pub property_type: String,
}

/// Input to [`PropertyRegistry::transfer`], everything except the property
/// id and the acting identity.
///
/// [`PropertyRegistry::transfer`]: crate::PropertyRegistry::transfer
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub new_owner: PartyId,
    pub reason: String,
    /// Content hash of the supporting legal document; must be non-empty.
    pub document_hash: String,
    pub notary_info: String,
    /// Sale amount in minor currency units.
    pub transfer_value: u64,
    pub payment_status: String,
}
