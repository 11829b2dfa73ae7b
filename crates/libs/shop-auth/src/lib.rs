//! Authentication primitives for the shop account service.
//!
//! - [`jwt::TokenCodec`]: issues and verifies signed, time-bounded identity tokens
//! - [`role::RoleRequirement`]: the role predicate a gated route enforces
//! - [`secret_hash`]: password digests for storage and login comparison

pub mod auth_body;
pub mod claims;
pub mod config;
pub mod error;
pub mod jwt;
pub mod prelude;
pub mod role;
pub mod secret_hash;

pub const CONNECTION_TOKEN_TYPE: &str = "Bearer";
pub const AUTH_HEADER: &str = "Authorization";
