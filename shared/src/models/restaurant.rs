//! Restaurant Model

use serde::{Deserialize, Serialize};

use super::serde_helpers::{nullable_text, optional_text};

/// Maximum length of a restaurant name, in characters
pub const NAME_MAX_CHARS: usize = 50;
/// Maximum length of a postal code, in characters
pub const POSTALCODE_MAX_CHARS: usize = 5;

/// Restaurant entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    pub foodtype: String,
    pub address: String,
    pub province: String,
    pub postalcode: String,
    pub tel: Option<String>,
    pub picture: String,
    pub created_at: i64,
}

/// Create restaurant payload
///
/// Every field is optional on the wire so that a missing field produces the
/// field's own validation message instead of a generic body rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RestaurantCreate {
    pub name: Option<String>,
    pub foodtype: Option<String>,
    pub address: Option<String>,
    pub province: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub postalcode: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub tel: Option<String>,
    pub picture: Option<String>,
}

/// Update restaurant payload (absent fields keep their values)
///
/// `tel` is the only nullable column: `"tel": null` clears it, a missing
/// `tel` leaves it alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RestaurantUpdate {
    pub name: Option<String>,
    pub foodtype: Option<String>,
    pub address: Option<String>,
    pub province: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub postalcode: Option<String>,
    #[serde(
        deserialize_with = "nullable_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub tel: Option<Option<String>>,
    pub picture: Option<String>,
}
