//! Shared types for the restaurant booking service
//!
//! Wire models, the unified error system, and the query translator used by
//! the server's list endpoints.

pub mod error;
pub mod models;
pub mod query;
pub mod util;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode, ListResponse};
pub use http;
pub use query::{ListQuery, Pagination};
pub use serde::{Deserialize, Serialize};
