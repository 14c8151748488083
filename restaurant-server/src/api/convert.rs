//! Request conversion helpers
//!
//! Turn raw extractor output into handler inputs with the API's own error
//! codes instead of axum's plain-text rejections.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use serde::Serialize;
use serde_json::Value;
use shared::query::Projection;

use crate::{AppError, AppResult};

/// Parse a restaurant id path segment; anything that is not an id cannot
/// name an existing restaurant.
pub fn restaurant_id(raw: &str) -> AppResult<i64> {
    raw.parse::<i64>()
        .map_err(|_| AppError::restaurant_not_found(raw))
}

/// Unwrap a JSON body, mapping malformed bodies to 400 InvalidRequest.
///
/// The client gets a fixed message per rejection kind; serde's text only
/// goes to the log.
pub fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    body.map(|Json(value)| value).map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Request body rejected");
        AppError::invalid_request(rejection_message(&rejection))
    })
}

fn rejection_message(rejection: &JsonRejection) -> &'static str {
    match rejection {
        JsonRejection::JsonDataError(_) => "Request body contains a field of the wrong type",
        JsonRejection::JsonSyntaxError(_) => "Request body is not valid JSON",
        JsonRejection::MissingJsonContentType(_) => {
            "Expected request with `Content-Type: application/json`"
        }
        _ => "Failed to read request body",
    }
}

/// Serialize records and apply the projection to each
pub fn project<T: Serialize>(records: Vec<T>, projection: &Projection) -> AppResult<Vec<Value>> {
    records
        .into_iter()
        .map(|record| {
            serde_json::to_value(record)
                .map(|value| projection.apply(value))
                .map_err(|e| AppError::internal(format!("Failed to serialize record: {e}")))
        })
        .collect()
}
