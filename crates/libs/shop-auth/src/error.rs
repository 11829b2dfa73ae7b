#[derive(Debug, thiserror::Error, Clone)]
pub enum Error {
    #[error("Invalid Token")]
    InvalidToken,

    #[error(transparent)]
    TokenCreation(#[from] jsonwebtoken::errors::Error),

    #[error("Token TTL out of range")]
    TokenTtlOutOfRange,

    #[error("Error hashing password {0}")]
    PasswordHash(argon2::password_hash::Error),

    #[error("Env Variable '{0}' missing")]
    MissingConfig(&'static str),

    #[error("Env Variable '{0}' is invalid: {1}")]
    InvalidConfig(&'static str, String),
}
