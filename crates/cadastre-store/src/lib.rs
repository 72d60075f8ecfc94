//! Storage backends for the cadastre property registry.
//!
//! This crate defines the capability boundary the state machine mutates
//! through -- durable keyed storage of [`Property`] records plus an
//! append-only ledger of [`TransferRecord`]s -- and two adapters satisfying
//! identical atomicity and ordering contracts:
//!
//! - [`MemoryStore`] -- typed maps behind a single `RwLock`, the embedded
//!   relational-style backend and the test substrate
//! - [`WorldStateStore`] -- a flat composite-keyed state database of
//!   JSON-serialized values, the shape a permissioned-ledger chaincode sees
//!
//! # Design Rules
//!
//! 1. Properties are updated only through compare-and-swap on their
//!    `version`; a stale write fails with [`StoreError::VersionConflict`]
//!    and changes nothing.
//! 2. Transfer records are immutable once appended.
//! 3. A transfer commit (record append + owner update) is a single critical
//!    section; partial application is never observable.
//! 4. History reads are newest-first.
//! 5. Read-your-writes: a get immediately after a successful mutation
//!    reflects it.
//!
//! [`Property`]: cadastre_types::Property
//! [`TransferRecord`]: cadastre_types::TransferRecord

pub mod error;
pub mod memory;
pub mod traits;
pub mod worldstate;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use traits::{PropertyStore, RegistryStore, TransferLedger};
pub use worldstate::WorldStateStore;
