use std::sync::Arc;

use chrono::Utc;

use cadastre_store::RegistryStore;
use cadastre_types::{PartyId, Property, PropertyId, PropertyStatus, TransferId, TransferRecord};

use crate::error::{ConflictReason, RegistryError, RegistryResult};
use crate::ops::{RegisterProperty, TransferRequest};
use crate::policy::{AccessPolicy, OwnerOnly};

/// The property lifecycle state machine.
///
/// Every mutation follows the same shape: load the current state, consult
/// the access policy, validate the business rules against that snapshot,
/// then commit through a compare-and-swap on the property version. A
/// failure at any step leaves the store untouched.
pub struct PropertyRegistry {
    store: Arc<dyn RegistryStore>,
    policy: Box<dyn AccessPolicy>,
}

impl PropertyRegistry {
    /// Create a registry over `store` with the standard owner-only policy.
    pub fn new(store: Arc<dyn RegistryStore>) -> Self {
        Self::with_policy(store, Box::new(OwnerOnly))
    }

    /// Create a registry with a custom access policy.
    pub fn with_policy(store: Arc<dyn RegistryStore>, policy: Box<dyn AccessPolicy>) -> Self {
        Self { store, policy }
    }

    pub(crate) fn load(&self, id: &PropertyId) -> RegistryResult<Property> {
        self.store
            .get(id)?
            .ok_or_else(|| RegistryError::NotFound(id.clone()))
    }

    fn load_authorized(&self, id: &PropertyId, actor: &PartyId) -> RegistryResult<Property> {
        let property = self.load(id)?;
        self.policy.authorize(&property, actor)?;
        Ok(property)
    }

    pub(crate) fn store(&self) -> &dyn RegistryStore {
        self.store.as_ref()
    }

    /// Register a new property.
    ///
    /// The created record always starts as `(REGULAR, no mortgage)` with no
    /// transfer date, regardless of input.
    pub fn register(&self, input: RegisterProperty) -> RegistryResult<Property> {
        if input.area == 0 {
            return Err(RegistryError::InvalidArgument(
                "area must be positive".into(),
            ));
        }

        let property = Property {
            property_id: input.property_id,
            registration_number: input.registration_number,
            owner: input.owner,
            description: input.description,
            property_address: input.property_address,
            property_type: input.property_type,
            area: input.area,
            status: PropertyStatus::Regular,
            has_mortgage: false,
            mortgage_details: String::new(),
            registered_at: Utc::now(),
            last_transfer_date: None,
            version: 1,
        };
        self.store.insert(&property)?;

        tracing::info!(
            property_id = %property.property_id,
            owner = %property.owner,
            "property registered"
        );
        Ok(property)
    }

    /// Move ownership of a property to `request.new_owner`.
    ///
    /// The transfer record append and the owner update commit atomically;
    /// on any failure neither is applied.
    pub fn transfer(
        &self,
        id: &PropertyId,
        actor: &PartyId,
        request: TransferRequest,
    ) -> RegistryResult<TransferRecord> {
        if request.document_hash.is_empty() {
            return Err(RegistryError::InvalidArgument(
                "document hash must not be empty".into(),
            ));
        }

        let current = self.load_authorized(id, actor)?;
        if current.has_mortgage {
            return Err(RegistryError::Conflict(ConflictReason::ActiveMortgage));
        }
        if !current.status.permits_transfer() {
            return Err(RegistryError::Conflict(ConflictReason::StatusForbidsTransfer(
                current.status,
            )));
        }

        let now = Utc::now();
        let record = TransferRecord {
            record_id: TransferId::generate(),
            property_id: id.clone(),
            from: current.owner.clone(),
            to: request.new_owner.clone(),
            reason: request.reason,
            document_hash: request.document_hash,
            notary_info: request.notary_info,
            transfer_value: request.transfer_value,
            payment_status: request.payment_status,
            timestamp: now,
        };

        let mut updated = current.clone();
        updated.owner = request.new_owner;
        updated.last_transfer_date = Some(now);
        updated.version = current.version + 1;
        self.store.commit_transfer(&updated, current.version, &record)?;

        tracing::info!(
            property_id = %id,
            from = %record.from,
            to = %record.to,
            "ownership transferred"
        );
        Ok(record)
    }

    /// Change the property status. No status transition graph is enforced;
    /// the new status applies as long as the actor owns the property.
    pub fn set_status(
        &self,
        id: &PropertyId,
        actor: &PartyId,
        status: PropertyStatus,
    ) -> RegistryResult<Property> {
        let current = self.load_authorized(id, actor)?;

        let mut updated = current.clone();
        updated.status = status;
        updated.version = current.version + 1;
        self.store.update(&updated, current.version)?;

        tracing::debug!(property_id = %id, status = %status, "status changed");
        Ok(updated)
    }

    /// Place a mortgage encumbrance on the property.
    pub fn add_mortgage(
        &self,
        id: &PropertyId,
        actor: &PartyId,
        details: &str,
    ) -> RegistryResult<Property> {
        if details.is_empty() {
            return Err(RegistryError::InvalidArgument(
                "mortgage details must not be empty".into(),
            ));
        }

        let current = self.load_authorized(id, actor)?;
        if current.has_mortgage {
            return Err(RegistryError::Conflict(ConflictReason::AlreadyMortgaged));
        }

        let mut updated = current.clone();
        updated.has_mortgage = true;
        updated.mortgage_details = details.to_string();
        updated.version = current.version + 1;
        self.store.update(&updated, current.version)?;

        tracing::debug!(property_id = %id, "mortgage added");
        Ok(updated)
    }

    /// Lift the mortgage encumbrance from the property.
    pub fn remove_mortgage(&self, id: &PropertyId, actor: &PartyId) -> RegistryResult<Property> {
        let current = self.load_authorized(id, actor)?;
        if !current.has_mortgage {
            return Err(RegistryError::Conflict(ConflictReason::NotMortgaged));
        }

        let mut updated = current.clone();
        updated.has_mortgage = false;
        updated.mortgage_details = String::new();
        updated.version = current.version + 1;
        self.store.update(&updated, current.version)?;

        tracing::debug!(property_id = %id, "mortgage removed");
        Ok(updated)
    }
}
