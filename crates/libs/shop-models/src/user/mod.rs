//! Account rows.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

pub mod memory;
pub mod store;

/// Role given to every newly registered account.
pub const DEFAULT_ROLE: &str = "user";

/// A registered account.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    /// Unique account ID.
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// Trimmed, lower-cased, unique.
    pub email: String,
    /// `"user"` or `"admin"`.
    pub role: String,
    /// Password digest.
    pub password: String,
    /// Digest scheme the password was hashed with.
    pub hash_version: i32,
    /// Optional profile image reference.
    pub image_url: Option<String>,
    /// When this account was created.
    pub created_at: DateTime<Utc>,
}

/// Data for creating a new account.
#[derive(Insertable, PartialEq, Debug, Clone, Deserialize)]
#[diesel(table_name = crate::schema::users)]
pub struct UserCreate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    pub password: String,
    pub hash_version: i32,
    pub image_url: Option<String>,
}
