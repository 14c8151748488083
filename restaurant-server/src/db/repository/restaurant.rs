//! Restaurant Repository

use shared::models::{Restaurant, RestaurantCreate, RestaurantUpdate};
use shared::query::{Filter, ListQuery};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult, booking};
use crate::db::query::{
    EntitySchema, Field, push_filter, push_order_by, push_window, select_from,
};

/// Fields a list query may filter, sort or project on
pub const SCHEMA: EntitySchema = EntitySchema {
    table: "restaurant",
    fields: &[
        Field::integer("id", "id"),
        Field::text("name", "name"),
        Field::text("foodtype", "foodtype"),
        Field::text("address", "address"),
        Field::text("province", "province"),
        Field::text("postalcode", "postalcode"),
        Field::text("tel", "tel"),
        Field::text("picture", "picture"),
        Field::integer("createdAt", "created_at"),
    ],
};

const COLUMNS: &str = "id, name, foodtype, address, province, postalcode, tel, picture, created_at";

/// `name` is the only unique column
fn name_conflict(err: sqlx::Error) -> RepoError {
    match RepoError::from(err) {
        RepoError::Duplicate(_) => RepoError::Duplicate("name".into()),
        other => other,
    }
}

fn required(value: Option<String>, field: &str) -> RepoResult<String> {
    value.ok_or_else(|| RepoError::Validation(format!("Missing field: {field}")))
}

/// Filtered, sorted, windowed page of restaurants
pub async fn find_many(pool: &SqlitePool, query: &ListQuery) -> RepoResult<Vec<Restaurant>> {
    SCHEMA.check(query)?;

    let mut builder = select_from(&SCHEMA, COLUMNS);
    push_filter(&mut builder, &SCHEMA, &query.filter)?;
    push_order_by(&mut builder, &SCHEMA, &query.sort)?;
    push_window(&mut builder, query.window);

    let restaurants = builder
        .build_query_as::<Restaurant>()
        .fetch_all(pool)
        .await?;
    Ok(restaurants)
}

/// Number of restaurants matching `filter`
pub async fn count(pool: &SqlitePool, filter: &Filter) -> RepoResult<u64> {
    let mut builder = select_from(&SCHEMA, "COUNT(*)");
    push_filter(&mut builder, &SCHEMA, filter)?;

    let total: i64 = builder.build_query_scalar().fetch_one(pool).await?;
    Ok(u64::try_from(total).unwrap_or(0))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Restaurant>> {
    let restaurant = sqlx::query_as::<_, Restaurant>(&format!(
        "SELECT {COLUMNS} FROM restaurant WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(restaurant)
}

pub async fn exists(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM restaurant WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(found.is_some())
}

/// Insert a validated payload
pub async fn create(pool: &SqlitePool, data: RestaurantCreate) -> RepoResult<Restaurant> {
    let restaurant = Restaurant {
        id: snowflake_id(),
        name: required(data.name, "name")?,
        foodtype: required(data.foodtype, "foodtype")?,
        address: required(data.address, "address")?,
        province: required(data.province, "province")?,
        postalcode: required(data.postalcode, "postalcode")?,
        tel: data.tel,
        picture: required(data.picture, "picture")?,
        created_at: now_millis(),
    };

    sqlx::query(
        "INSERT INTO restaurant (id, name, foodtype, address, province, postalcode, tel, picture, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    )
    .bind(restaurant.id)
    .bind(&restaurant.name)
    .bind(&restaurant.foodtype)
    .bind(&restaurant.address)
    .bind(&restaurant.province)
    .bind(&restaurant.postalcode)
    .bind(&restaurant.tel)
    .bind(&restaurant.picture)
    .bind(restaurant.created_at)
    .execute(pool)
    .await
    .map_err(name_conflict)?;

    Ok(restaurant)
}

/// Partial update; absent fields keep their values, `tel: Some(None)`
/// clears the phone number
pub async fn update(pool: &SqlitePool, id: i64, data: RestaurantUpdate) -> RepoResult<Restaurant> {
    let set_tel = data.tel.is_some();
    let rows = sqlx::query(
        "UPDATE restaurant SET name = COALESCE(?1, name), foodtype = COALESCE(?2, foodtype), address = COALESCE(?3, address), province = COALESCE(?4, province), postalcode = COALESCE(?5, postalcode), tel = CASE WHEN ?6 THEN ?7 ELSE tel END, picture = COALESCE(?8, picture) WHERE id = ?9",
    )
    .bind(data.name)
    .bind(data.foodtype)
    .bind(data.address)
    .bind(data.province)
    .bind(data.postalcode)
    .bind(set_tel)
    .bind(data.tel.flatten())
    .bind(data.picture)
    .bind(id)
    .execute(pool)
    .await
    .map_err(name_conflict)?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Restaurant {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Restaurant {id} not found")))
}

/// Delete a restaurant and every booking that references it.
///
/// Both deletes run in one transaction. Returns the number of bookings
/// removed.
pub async fn delete_cascade(pool: &SqlitePool, id: i64) -> RepoResult<u64> {
    let mut tx = pool.begin().await?;

    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM restaurant WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
    if found.is_none() {
        return Err(RepoError::NotFound(format!("Restaurant {id} not found")));
    }

    let bookings = booking::delete_by_restaurant(&mut tx, id).await?;

    sqlx::query("DELETE FROM restaurant WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::debug!(restaurant_id = id, bookings_removed = bookings, "Cascade delete committed");
    Ok(bookings)
}
