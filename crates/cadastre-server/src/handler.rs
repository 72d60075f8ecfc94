use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use cadastre_registry::{PropertyRegistry, RegisterProperty, RegistryError, TransferRequest};
use cadastre_types::{PartyId, Property, PropertyId, PropertyStatus, TransferRecord};

use crate::auth::{AuthProvider, Credentials};
use crate::error::{ServerError, ServerResult};

/// Shared handler state: the registry plus the authentication boundary.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<PropertyRegistry>,
    pub auth: Arc<dyn AuthProvider>,
    pub allow_anonymous: bool,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("allow_anonymous", &self.allow_anonymous)
            .finish_non_exhaustive()
    }
}

impl AppState {
    fn credentials(headers: &HeaderMap) -> Credentials {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(|token| Credentials::Bearer(token.to_string()))
            .unwrap_or(Credentials::Anonymous)
    }

    /// Resolve the acting identity for a mutating request.
    async fn actor(&self, headers: &HeaderMap) -> ServerResult<PartyId> {
        let credentials = Self::credentials(headers);
        if matches!(credentials, Credentials::Anonymous) && !self.allow_anonymous {
            return Err(ServerError::MissingCredentials);
        }
        let identity = self.auth.authenticate(&credentials).await?;
        Ok(identity.party)
    }
}

fn property_id(raw: &str) -> ServerResult<PropertyId> {
    PropertyId::new(raw)
        .map_err(|e| ServerError::Registry(RegistryError::InvalidArgument(e.to_string())))
}

fn party_id(raw: &str) -> ServerResult<PartyId> {
    PartyId::new(raw)
        .map_err(|e| ServerError::Registry(RegistryError::InvalidArgument(e.to_string())))
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct MortgageRequest {
    pub details: String,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub owner: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn info() -> Json<serde_json::Value> {
    Json(json!({
        "name": "cadastre-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<RegisterProperty>,
) -> ServerResult<(StatusCode, Json<Property>)> {
    // Registration has no prior owner to gate on, but still requires an
    // authenticated caller when anonymous access is off.
    state.actor(&headers).await?;
    let property = state.registry.register(input)?;
    Ok((StatusCode::CREATED, Json(property)))
}

pub async fn get_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<Json<Property>> {
    let id = property_id(&id)?;
    Ok(Json(state.registry.get_property(&id)?))
}

pub async fn list_properties(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ServerResult<Json<Vec<Property>>> {
    let properties = match params.owner {
        Some(owner) => state
            .registry
            .list_properties_by_owner(&party_id(&owner)?)?,
        None => state.registry.list_all_properties()?,
    };
    Ok(Json(properties))
}

pub async fn transfer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<TransferRequest>,
) -> ServerResult<Json<TransferRecord>> {
    let id = property_id(&id)?;
    let actor = state.actor(&headers).await?;
    Ok(Json(state.registry.transfer(&id, &actor, request)?))
}

pub async fn transfer_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<Json<Vec<TransferRecord>>> {
    let id = property_id(&id)?;
    Ok(Json(state.registry.transfer_history(&id)?))
}

pub async fn transfers_by_party(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<Json<Vec<TransferRecord>>> {
    let party = party_id(&id)?;
    Ok(Json(state.registry.transfers_by_party(&party)?))
}

pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<SetStatusRequest>,
) -> ServerResult<Json<Property>> {
    let id = property_id(&id)?;
    let actor = state.actor(&headers).await?;
    let status: PropertyStatus = request
        .status
        .parse()
        .map_err(|e: cadastre_types::TypeError| {
            ServerError::Registry(RegistryError::InvalidArgument(e.to_string()))
        })?;
    Ok(Json(state.registry.set_status(&id, &actor, status)?))
}

pub async fn add_mortgage(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<MortgageRequest>,
) -> ServerResult<(StatusCode, Json<Property>)> {
    let id = property_id(&id)?;
    let actor = state.actor(&headers).await?;
    let property = state
        .registry
        .add_mortgage(&id, &actor, &request.details)?;
    Ok((StatusCode::CREATED, Json(property)))
}

pub async fn remove_mortgage(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> ServerResult<Json<Property>> {
    let id = property_id(&id)?;
    let actor = state.actor(&headers).await?;
    Ok(Json(state.registry.remove_mortgage(&id, &actor)?))
}
