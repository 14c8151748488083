//! Restaurant API module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::api::{API_PREFIX, bookings};
use crate::auth::{ADMIN_ONLY, require_auth, require_role};
use crate::core::ServerState;

pub fn router(state: &ServerState) -> Router<ServerState> {
    Router::new().nest(&format!("{API_PREFIX}/restaurants"), routes(state))
}

fn routes(state: &ServerState) -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id));

    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .layer(middleware::from_fn(require_role(ADMIN_ONLY)))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    read_routes
        .merge(manage_routes)
        .merge(bookings::routes(state))
}
