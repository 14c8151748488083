//! Input validation helpers
//!
//! Field rules for create/update payloads. Lengths are counted in characters,
//! "required" means present and non-blank after trimming. Messages go to the
//! client verbatim.

use shared::models::{
    BookingCreate, NAME_MAX_CHARS, POSTALCODE_MAX_CHARS, RestaurantCreate, RestaurantUpdate,
};

use crate::AppError;

/// Validation rule for one text field
#[derive(Debug, Clone, Copy)]
pub struct TextRule {
    pub field: &'static str,
    /// Message when absent or blank
    pub missing: &'static str,
    /// Character limit and its message
    pub max: Option<(usize, &'static str)>,
}

pub const NAME: TextRule = TextRule {
    field: "name",
    missing: "Please add a name",
    max: Some((NAME_MAX_CHARS, "Name cannot be more than 50 characters")),
};

pub const FOODTYPE: TextRule = TextRule {
    field: "foodtype",
    missing: "Please add type of food",
    max: None,
};

pub const ADDRESS: TextRule = TextRule {
    field: "address",
    missing: "Please add an address",
    max: None,
};

pub const PROVINCE: TextRule = TextRule {
    field: "province",
    missing: "Please add a province",
    max: None,
};

pub const POSTALCODE: TextRule = TextRule {
    field: "postalcode",
    missing: "Please add a postalcode",
    max: Some((
        POSTALCODE_MAX_CHARS,
        "Postalcode cannot be more than 5 digits",
    )),
};

pub const PICTURE: TextRule = TextRule {
    field: "picture",
    missing: "Please add URL to restaurant picture",
    max: None,
};

pub const BOOKING_DATE: TextRule = TextRule {
    field: "bookingDate",
    missing: "Please add a booking date",
    max: None,
};

// ── Validation helpers (CRUD handlers) ──────────────────────────────

/// Validate that a required string is present, non-blank and within limit.
pub fn validate_required_text(value: Option<&str>, rule: &TextRule) -> Result<(), AppError> {
    match value {
        Some(v) => check_text(v, rule),
        None => Err(AppError::field(rule.field, rule.missing)),
    }
}

/// Validate an optional string: when supplied it obeys the same rule.
pub fn validate_optional_text(value: Option<&str>, rule: &TextRule) -> Result<(), AppError> {
    match value {
        Some(v) => check_text(v, rule),
        None => Ok(()),
    }
}

fn check_text(value: &str, rule: &TextRule) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::field(rule.field, rule.missing));
    }
    if let Some((max, message)) = rule.max
        && value.chars().count() > max
    {
        return Err(AppError::field(rule.field, message));
    }
    Ok(())
}

/// Trim surrounding whitespace off a supplied name
pub fn trim_name(name: Option<String>) -> Option<String> {
    name.map(|n| n.trim().to_string())
}

// ── Entity payloads ─────────────────────────────────────────────────

/// First violated rule wins, in field order
pub fn validate_restaurant_create(data: &RestaurantCreate) -> Result<(), AppError> {
    validate_required_text(data.name.as_deref(), &NAME)?;
    validate_required_text(data.foodtype.as_deref(), &FOODTYPE)?;
    validate_required_text(data.address.as_deref(), &ADDRESS)?;
    validate_required_text(data.province.as_deref(), &PROVINCE)?;
    validate_required_text(data.postalcode.as_deref(), &POSTALCODE)?;
    validate_required_text(data.picture.as_deref(), &PICTURE)?;
    Ok(())
}

pub fn validate_restaurant_update(data: &RestaurantUpdate) -> Result<(), AppError> {
    validate_optional_text(data.name.as_deref(), &NAME)?;
    validate_optional_text(data.foodtype.as_deref(), &FOODTYPE)?;
    validate_optional_text(data.address.as_deref(), &ADDRESS)?;
    validate_optional_text(data.province.as_deref(), &PROVINCE)?;
    validate_optional_text(data.postalcode.as_deref(), &POSTALCODE)?;
    validate_optional_text(data.picture.as_deref(), &PICTURE)?;
    Ok(())
}

pub fn validate_booking_create(data: &BookingCreate) -> Result<(), AppError> {
    validate_required_text(data.booking_date.as_deref(), &BOOKING_DATE)
}
