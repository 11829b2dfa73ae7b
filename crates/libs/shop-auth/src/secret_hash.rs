//! Password hashing and verification using Argon2.
//!
//! Digests are PHC strings (`$argon2id$v=19$...`) that embed their own salt
//! and parameters, so the same password hashes differently on every call.
//! Comparison goes through [`is_secret_valid`], never string equality.
//!
//! # Examples
//!
//! ```rust
//! use shop_auth::secret_hash::{generate_secret_hash, is_secret_valid};
//!
//! let hash = generate_secret_hash("Abcdef1!").unwrap();
//! assert!(is_secret_valid("Abcdef1!", &hash).unwrap());
//! assert!(!is_secret_valid("abcdef1!", &hash).unwrap());
//! ```

use argon2::{
    Argon2, PasswordHasher, PasswordVerifier,
    password_hash::{self, PasswordHash, SaltString},
};
use rand::rngs::OsRng;
use tracing::warn;

use crate::prelude::*;

/// Version stored next to each digest. `1` is argon2id with library defaults.
pub const HASH_VERSION: i32 = 1;

fn hasher() -> Argon2<'static> {
    Argon2::default()
}

/// Generates a salted PHC digest for `pw`.
pub fn generate_secret_hash(pw: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let digest = hasher().hash_password(pw.as_bytes(), &salt)?;
    Ok(digest.to_string())
}

/// Verifies a password against a PHC digest.
///
/// Returns `Ok(false)` on mismatch. Errors when `hash` is not a PHC string
/// or names an algorithm other than argon2.
pub fn is_secret_valid(pw: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash)?;
    match hasher().verify_password(pw.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(err) => Err(err.into()),
    }
}

/// Verifies a password against a stored account digest and its scheme version.
///
/// Digests from another scheme version, or ones that do not parse, never
/// match. Both cases are logged so the row can be reset.
pub fn is_stored_secret_valid(pw: &str, hash: &str, version: i32) -> bool {
    if version != HASH_VERSION {
        warn!("Refusing digest with unsupported scheme version {version}");
        return false;
    }
    is_secret_valid(pw, hash).unwrap_or_else(|err| {
        warn!("Refusing unreadable stored digest: {err}");
        false
    })
}

impl From<password_hash::Error> for Error {
    fn from(value: password_hash::Error) -> Self {
        Self::PasswordHash(value)
    }
}
