//! Database configuration management.

use std::fmt::Display;

use crate::prelude::*;

pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Database connection configuration.
pub struct DbConfig {
    /// PostgreSQL database URL.
    pub database_url: String,
}

impl DbConfig {
    /// Create database configuration from environment variables.
    ///
    /// Reads the `DATABASE_URL` environment variable.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use shop_models::db::config::DbConfig;
    ///
    /// let config = DbConfig::from_env().unwrap();
    /// ```
    pub fn from_env() -> Result<Self> {
        let database_url =
            std::env::var(DATABASE_URL_VAR).map_err(|_| Error::MissingConfig(DATABASE_URL_VAR))?;
        Ok(Self { database_url })
    }
}

impl Display for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "REDACTED")
    }
}
