//! Restaurant API Handlers

use axum::{
    Json,
    extract::{Extension, Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::Value;
use shared::models::{Restaurant, RestaurantCreate, RestaurantUpdate};
use shared::query::{ListQuery, Pagination};
use shared::{ApiResponse, ErrorCode, ListResponse};

use crate::api::convert::{json_body, project, restaurant_id};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{RepoError, restaurant};
use crate::utils::validation::{trim_name, validate_restaurant_create, validate_restaurant_update};
use crate::{AppError, AppResult};

fn name_taken() -> AppError {
    AppError::new(ErrorCode::RestaurantNameExists).with_detail("field", "name")
}

fn map_repo_error(err: RepoError, id: i64) -> AppError {
    match err {
        RepoError::NotFound(_) => AppError::restaurant_not_found(id),
        RepoError::Duplicate(_) => name_taken(),
        other => other.into(),
    }
}

/// GET /api/v1/restaurants - filtered, sorted, paginated list
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<ListResponse<Value>> {
    let query = ListQuery::from_pairs(&params)?;

    let restaurants = restaurant::find_many(state.pool(), &query).await?;
    let total = restaurant::count(state.pool(), &query.filter).await?;
    let pagination = Pagination::for_window(query.window, total);

    let data = project(restaurants, &query.projection)?;
    Ok(ListResponse::new(data).with_pagination(pagination))
}

/// GET /api/v1/restaurants/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Restaurant>> {
    let id = restaurant_id(&id)?;
    let restaurant = restaurant::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::restaurant_not_found(id))?;
    Ok(ApiResponse::success(restaurant))
}

/// POST /api/v1/restaurants
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    body: Result<Json<RestaurantCreate>, JsonRejection>,
) -> AppResult<(StatusCode, ApiResponse<Restaurant>)> {
    let mut payload = json_body(body)?;
    payload.name = trim_name(payload.name);
    validate_restaurant_create(&payload)?;

    let restaurant = restaurant::create(state.pool(), payload)
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => name_taken(),
            other => other.into(),
        })?;

    tracing::info!(
        restaurant_id = restaurant.id,
        operator_id = %current_user.id,
        "Restaurant created"
    );
    Ok((StatusCode::CREATED, ApiResponse::success(restaurant)))
}

/// PUT /api/v1/restaurants/:id - partial update
pub async fn update(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
    body: Result<Json<RestaurantUpdate>, JsonRejection>,
) -> AppResult<ApiResponse<Restaurant>> {
    let id = restaurant_id(&id)?;
    let mut payload = json_body(body)?;
    payload.name = trim_name(payload.name);
    validate_restaurant_update(&payload)?;

    let restaurant = restaurant::update(state.pool(), id, payload)
        .await
        .map_err(|e| map_repo_error(e, id))?;

    tracing::info!(restaurant_id = id, operator_id = %current_user.id, "Restaurant updated");
    Ok(ApiResponse::success(restaurant))
}

/// DELETE /api/v1/restaurants/:id - removes its bookings too
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<serde_json::Map<String, Value>>> {
    let id = restaurant_id(&id)?;
    let bookings = restaurant::delete_cascade(state.pool(), id)
        .await
        .map_err(|e| map_repo_error(e, id))?;

    tracing::info!(
        restaurant_id = id,
        bookings_removed = bookings,
        operator_id = %current_user.id,
        "Restaurant deleted"
    );
    Ok(ApiResponse::empty())
}
