//! Booking API Handlers

use axum::{
    Json,
    extract::{Extension, Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use shared::models::{Booking, BookingCreate};
use shared::{ApiResponse, ListResponse};

use crate::api::convert::{json_body, restaurant_id};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{RepoError, booking, restaurant};
use crate::utils::validation::validate_booking_create;
use crate::{AppError, AppResult};

/// GET /api/v1/restaurants/:id/bookings
pub async fn list(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ListResponse<Booking>> {
    let id = restaurant_id(&id)?;
    if !restaurant::exists(state.pool(), id).await? {
        return Err(AppError::restaurant_not_found(id));
    }

    let bookings = booking::find_by_restaurant(state.pool(), id).await?;
    Ok(ListResponse::new(bookings))
}

/// POST /api/v1/restaurants/:id/bookings - booked for the calling user
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
    body: Result<Json<BookingCreate>, JsonRejection>,
) -> AppResult<(StatusCode, ApiResponse<Booking>)> {
    let id = restaurant_id(&id)?;
    let payload = json_body(body)?;
    validate_booking_create(&payload)?;

    if !restaurant::exists(state.pool(), id).await? {
        return Err(AppError::restaurant_not_found(id));
    }

    let booking_date = payload.booking_date.unwrap_or_default();
    let booking = booking::create(state.pool(), id, &current_user.id, booking_date.trim())
        .await
        .map_err(|e| match e {
            // restaurant vanished after the existence check
            RepoError::Validation(_) => AppError::restaurant_not_found(id),
            other => other.into(),
        })?;

    tracing::info!(
        booking_id = booking.id,
        restaurant_id = id,
        user_id = %current_user.id,
        "Booking created"
    );
    Ok((StatusCode::CREATED, ApiResponse::success(booking)))
}
