//! Booking API module
//!
//! Mounted inside the restaurant router at `/{id}/bookings`.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::{BOOKING_ROLES, require_auth, require_role};
use crate::core::ServerState;

pub fn routes(state: &ServerState) -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/{id}/bookings", get(handler::list))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let manage_routes = Router::new()
        .route("/{id}/bookings", post(handler::create))
        .layer(middleware::from_fn(require_role(BOOKING_ROLES)))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    read_routes.merge(manage_routes)
}
