//! Database models and the account store for the shop service.
//!
//! The web layer only talks to [`user::store::AccountStore`]. The Postgres
//! implementation lives on [`db::connection::DbConnection`]; an in-memory
//! implementation backs tests.
//!
//! # Usage
//!
//! ```rust,no_run
//! use shop_models::{db::{config::DbConfig, connection::DbConnection}, user::store::AccountStore};
//!
//! let config = DbConfig::from_env().unwrap();
//! let conn = DbConnection::new(&config).unwrap().setup().unwrap();
//!
//! let users = conn.fetch_all().unwrap();
//! println!("Found {} users", users.len());
//! ```

pub mod db;
pub mod error;
pub mod prelude;
mod schema;
pub mod user;
