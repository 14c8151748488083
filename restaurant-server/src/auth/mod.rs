//! Authentication and authorization
//!
//! - [`JwtService`] - token verification (and minting for tooling)
//! - [`CurrentUser`] - caller context decoded from the token
//! - [`require_auth`] - protect: valid bearer token required
//! - [`require_role`] - authorize: caller role must be in an allowed set

pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_auth, require_role};

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

/// Roles allowed on restaurant write routes
pub const ADMIN_ONLY: &[&str] = &[ROLE_ADMIN];
/// Roles allowed to create bookings
pub const BOOKING_ROLES: &[&str] = &[ROLE_USER, ROLE_ADMIN];
