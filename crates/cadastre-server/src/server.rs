use std::sync::Arc;

use tokio::net::TcpListener;

use cadastre_registry::PropertyRegistry;
use cadastre_store::{MemoryStore, RegistryStore, WorldStateStore};
use cadastre_types::PartyId;

use crate::auth::{AllowAllAuth, AuthProvider, StaticTokenAuth};
use crate::config::{ServerConfig, StoreBackend};
use crate::error::{ServerError, ServerResult};
use crate::handler::AppState;
use crate::router::build_router;

/// Cadastre registry server.
pub struct RegistryServer {
    config: ServerConfig,
}

impl RegistryServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the handler state from the configuration: store backend,
    /// registry, and authentication provider.
    pub fn app_state(&self) -> ServerResult<AppState> {
        let store: Arc<dyn RegistryStore> = match self.config.backend {
            StoreBackend::Memory => Arc::new(MemoryStore::new()),
            StoreBackend::WorldState => Arc::new(WorldStateStore::new()),
        };

        let auth: Arc<dyn AuthProvider> = if self.config.tokens.is_empty() {
            Arc::new(AllowAllAuth)
        } else {
            let mut tokens = std::collections::HashMap::new();
            for (token, party) in &self.config.tokens {
                let party = PartyId::new(party.clone())
                    .map_err(|e| ServerError::Config(format!("token table: {e}")))?;
                tokens.insert(token.clone(), party);
            }
            Arc::new(StaticTokenAuth::new(tokens))
        };

        Ok(AppState {
            registry: Arc::new(PropertyRegistry::new(store)),
            auth,
            allow_anonymous: self.config.allow_anonymous,
        })
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> ServerResult<axum::Router> {
        Ok(build_router(self.app_state()?))
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router()?;
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!(
            backend = ?self.config.backend,
            "cadastre server listening on {}",
            self.config.bind_addr
        );
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_construction() {
        let server = RegistryServer::new(ServerConfig::default());
        assert_eq!(
            server.config().bind_addr,
            "127.0.0.1:8470".parse().unwrap()
        );
    }

    #[test]
    fn router_builds_for_both_backends() {
        for backend in [StoreBackend::Memory, StoreBackend::WorldState] {
            let config = ServerConfig {
                backend,
                ..ServerConfig::default()
            };
            let _router = RegistryServer::new(config).router().unwrap();
        }
    }

    #[test]
    fn invalid_token_table_is_a_config_error() {
        let mut config = ServerConfig::default();
        config.tokens.insert("tok-1".into(), "not a party".into());
        let err = RegistryServer::new(config).app_state().unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }
}
