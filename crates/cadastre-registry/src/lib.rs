//! Core state machine for the cadastre property registry.
//!
//! This crate is the heart of the system. It provides:
//! - [`PropertyRegistry`] -- registration, ownership transfer, status
//!   changes, and mortgage add/remove over any [`RegistryStore`]
//! - [`AccessPolicy`] / [`OwnerOnly`] -- the single ownership gate every
//!   mutating operation passes through
//! - Read-only query facade: property lookups, owner listings, and
//!   newest-first transfer history
//! - [`RegistryError`] -- the full failure taxonomy: invalid argument,
//!   already exists, not found, forbidden, conflict
//!
//! Every mutation is all-or-nothing: preconditions are checked against a
//! loaded snapshot, and the commit is a compare-and-swap on the property's
//! version, so a concurrent writer surfaces as a retryable conflict rather
//! than a lost update.
//!
//! [`RegistryStore`]: cadastre_store::RegistryStore

pub mod error;
pub mod ops;
pub mod policy;
pub mod query;
pub mod registry;

pub use error::{ConflictReason, RegistryError, RegistryResult};
pub use ops::{RegisterProperty, TransferRequest};
pub use policy::{AccessPolicy, OwnerOnly};
pub use registry::PropertyRegistry;
