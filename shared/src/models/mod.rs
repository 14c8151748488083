//! Data models
//!
//! Shared between the server and API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` snowflakes (SQLite INTEGER PRIMARY KEY), timestamps are
//! Unix milliseconds.

pub mod booking;
pub mod restaurant;
pub mod serde_helpers;

// Re-exports
pub use booking::*;
pub use restaurant::*;
