use axum::routing::{get, post, put};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handler::{self, AppState};

/// Build the axum router with all registry endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/health", get(handler::health))
        .route("/v1/info", get(handler::info))
        .route(
            "/v1/properties",
            post(handler::register).get(handler::list_properties),
        )
        .route("/v1/properties/:id", get(handler::get_property))
        .route("/v1/properties/:id/transfer", post(handler::transfer))
        .route(
            "/v1/properties/:id/transfers",
            get(handler::transfer_history),
        )
        .route("/v1/properties/:id/status", put(handler::set_status))
        .route(
            "/v1/properties/:id/mortgage",
            post(handler::add_mortgage).delete(handler::remove_mortgage),
        )
        .route(
            "/v1/parties/:id/transfers",
            get(handler::transfers_by_party),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
