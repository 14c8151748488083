//! Booking Model

use serde::{Deserialize, Serialize};

/// Booking entity, owned by a restaurant through `restaurant`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Booking {
    pub id: i64,
    pub booking_date: String,
    /// Id of the caller who made the booking
    pub user: String,
    /// Id of the owning restaurant
    pub restaurant: i64,
    pub created_at: i64,
}

/// Create booking payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BookingCreate {
    pub booking_date: Option<String>,
}
