//! HTTP server for the cadastre property registry.
//!
//! A thin REST adapter over [`cadastre_registry`]: handlers authenticate the
//! caller through the [`AuthProvider`] boundary, invoke the state machine,
//! and map the failure taxonomy onto HTTP status codes (400 invalid
//! argument, 401 missing/bad credentials, 403 forbidden, 404 not found,
//! 409 already-exists/conflict, 500 internal).

pub mod auth;
pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use auth::{AllowAllAuth, AuthProvider, Credentials, Identity, StaticTokenAuth};
pub use config::{ServerConfig, StoreBackend};
pub use error::{ServerError, ServerResult};
pub use handler::AppState;
pub use router::build_router;
pub use server::RegistryServer;
