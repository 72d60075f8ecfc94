use std::collections::HashMap;

use async_trait::async_trait;

use cadastre_types::PartyId;

use crate::error::{ServerError, ServerResult};

/// An authenticated caller. The party id becomes the `actor` passed to the
/// registry for mutating operations.
#[derive(Clone, Debug)]
pub struct Identity {
    pub party: PartyId,
}

impl Identity {
    pub fn anonymous() -> Self {
        Self {
            party: PartyId::new("anonymous").expect("static id is valid"),
        }
    }
}

/// Credentials presented with a request.
#[derive(Clone, Debug)]
pub enum Credentials {
    Bearer(String),
    Anonymous,
}

/// Pluggable identity provider. Token issuance lives outside the server;
/// this boundary only turns presented credentials into a party identity.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> ServerResult<Identity>;
}

/// Development-mode provider: the bearer token itself is taken as the party
/// id, and anonymous callers act as the `anonymous` party.
pub struct AllowAllAuth;

#[async_trait]
impl AuthProvider for AllowAllAuth {
    async fn authenticate(&self, credentials: &Credentials) -> ServerResult<Identity> {
        match credentials {
            Credentials::Bearer(token) => {
                let party = PartyId::new(token.clone())
                    .map_err(|e| ServerError::AuthFailed(e.to_string()))?;
                Ok(Identity { party })
            }
            Credentials::Anonymous => Ok(Identity::anonymous()),
        }
    }
}

/// Fixed bearer-token table mapping tokens to party ids.
pub struct StaticTokenAuth {
    tokens: HashMap<String, PartyId>,
}

impl StaticTokenAuth {
    pub fn new(tokens: HashMap<String, PartyId>) -> Self {
        Self { tokens }
    }
}

#[async_trait]
impl AuthProvider for StaticTokenAuth {
    async fn authenticate(&self, credentials: &Credentials) -> ServerResult<Identity> {
        match credentials {
            Credentials::Bearer(token) => self
                .tokens
                .get(token)
                .map(|party| Identity {
                    party: party.clone(),
                })
                .ok_or_else(|| ServerError::AuthFailed("unknown bearer token".into())),
            Credentials::Anonymous => Err(ServerError::MissingCredentials),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn allow_all_takes_token_as_party() {
        let id = AllowAllAuth
            .authenticate(&Credentials::Bearer("alice".into()))
            .await
            .unwrap();
        assert_eq!(id.party, PartyId::new("alice").unwrap());
    }

    #[tokio::test]
    async fn allow_all_accepts_anonymous() {
        let id = AllowAllAuth
            .authenticate(&Credentials::Anonymous)
            .await
            .unwrap();
        assert_eq!(id.party.as_str(), "anonymous");
    }

    #[tokio::test]
    async fn static_tokens_resolve_to_parties() {
        let mut tokens = HashMap::new();
        tokens.insert("tok-1".to_string(), PartyId::new("alice").unwrap());
        let auth = StaticTokenAuth::new(tokens);

        let id = auth
            .authenticate(&Credentials::Bearer("tok-1".into()))
            .await
            .unwrap();
        assert_eq!(id.party.as_str(), "alice");

        let err = auth
            .authenticate(&Credentials::Bearer("tok-2".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::AuthFailed(_)));

        let err = auth.authenticate(&Credentials::Anonymous).await.unwrap_err();
        assert!(matches!(err, ServerError::MissingCredentials));
    }
}
