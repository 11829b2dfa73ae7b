//! Database error types.

use diesel::result::DatabaseErrorKind;

/// Account store errors.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Database connection pool error.
    #[error(transparent)]
    R2D2(#[from] diesel::r2d2::PoolError),

    /// Diesel ORM operation error.
    #[error(transparent)]
    Diesel(diesel::result::Error),

    #[error("Failed to run database migrations: {0}")]
    Migration(String),

    #[error("Env Variable '{0}' missing")]
    MissingConfig(&'static str),

    /// No row matched the lookup.
    #[error("User not found")]
    NotFound,

    /// The unique email constraint rejected the write.
    #[error("Email already registered")]
    EmailTaken,
}

impl From<diesel::result::Error> for Error {
    fn from(value: diesel::result::Error) -> Self {
        match value {
            diesel::result::Error::NotFound => Self::NotFound,
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                Self::EmailTaken
            }
            other => Self::Diesel(other),
        }
    }
}
