//! API routing
//!
//! Every route lives under `/api/v1`.
//!
//! - [`health`] - liveness
//! - [`restaurants`] - restaurant CRUD
//! - [`bookings`] - bookings nested under a restaurant

pub mod convert;

pub mod bookings;
pub mod health;
pub mod restaurants;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// API prefix shared by every route
pub const API_PREFIX: &str = "/api/v1";

/// Build a router with all routes registered (no global middleware, no state)
pub fn build_router(state: &ServerState) -> Router<ServerState> {
    Router::new()
        // Health API - public route
        .merge(health::router())
        // Restaurant API - reads public, writes admin-only, bookings authenticated
        .merge(restaurants::router(state))
}

/// Build the fully configured application (used by the server and tests)
pub fn build_app(state: &ServerState) -> Router {
    build_router(state)
        // CORS - Handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Trace - Request tracing
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone())
}
