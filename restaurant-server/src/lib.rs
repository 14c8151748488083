//! Restaurant Server - restaurant and booking CRUD API
//!
//! # Architecture
//!
//! - **HTTP API** (`api`): axum routers and handlers under `/api/v1`
//! - **Auth** (`auth`): JWT bearer verification and role gates
//! - **Database** (`db`): embedded SQLite store (sqlx) and the query renderer
//! - **Core** (`core`): configuration, shared state and server lifecycle
//!
//! # Module layout
//!
//! ```text
//! restaurant-server/src/
//! ├── core/          # config, state, errors, server
//! ├── auth/          # JWT service, middleware
//! ├── api/           # routers and handlers
//! ├── db/            # pool, query renderer, repositories
//! └── utils/         # logging, validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use shared::{AppError, AppResult};

// Re-export logger function
pub use utils::logger::init_logger_with_file;

// Security logging macro - emits on the `security` target
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
