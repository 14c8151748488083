//! Booking Repository

use shared::models::Booking;
use shared::query::{Filter, SortKey};
use shared::util::{now_millis, snowflake_id};
use sqlx::{SqliteConnection, SqlitePool};

use super::RepoResult;
use crate::db::query::{EntitySchema, Field, push_filter, push_order_by, select_from};

pub const SCHEMA: EntitySchema = EntitySchema {
    table: "booking",
    fields: &[
        Field::integer("id", "id"),
        Field::text("bookingDate", "booking_date"),
        Field::text("user", "user_id"),
        Field::integer("restaurant", "restaurant_id"),
        Field::integer("createdAt", "created_at"),
    ],
};

const COLUMNS: &str =
    r#"id, booking_date, user_id AS "user", restaurant_id AS restaurant, created_at"#;

/// Bookings of one restaurant, newest first
pub async fn find_by_restaurant(pool: &SqlitePool, restaurant_id: i64) -> RepoResult<Vec<Booking>> {
    let mut builder = select_from(&SCHEMA, COLUMNS);
    push_filter(
        &mut builder,
        &SCHEMA,
        &Filter::eq("restaurant", restaurant_id.to_string()),
    )?;
    push_order_by(&mut builder, &SCHEMA, &[SortKey::desc("createdAt")])?;

    let bookings = builder.build_query_as::<Booking>().fetch_all(pool).await?;
    Ok(bookings)
}

pub async fn create(
    pool: &SqlitePool,
    restaurant_id: i64,
    user_id: &str,
    booking_date: &str,
) -> RepoResult<Booking> {
    let booking = Booking {
        id: snowflake_id(),
        booking_date: booking_date.to_string(),
        user: user_id.to_string(),
        restaurant: restaurant_id,
        created_at: now_millis(),
    };

    sqlx::query(
        "INSERT INTO booking (id, booking_date, user_id, restaurant_id, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(booking.id)
    .bind(&booking.booking_date)
    .bind(&booking.user)
    .bind(booking.restaurant)
    .bind(booking.created_at)
    .execute(pool)
    .await?;

    Ok(booking)
}

/// Delete every booking of a restaurant; runs on the caller's connection so
/// it can share a transaction. Returns the number of rows removed.
pub async fn delete_by_restaurant(conn: &mut SqliteConnection, restaurant_id: i64) -> RepoResult<u64> {
    let result = sqlx::query("DELETE FROM booking WHERE restaurant_id = ?")
        .bind(restaurant_id)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected())
}
