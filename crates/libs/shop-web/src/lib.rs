//! Web layer for the shop account service.
//!
//! Provides the request context resolved from the bearer token, the role
//! gate middleware, input validation and the account operations the HTTP
//! handlers call.

pub mod ctx;
pub mod error;
pub mod mw_auth;
pub mod prelude;
pub mod state;
pub mod user;
pub mod validation;
