//! Identity token issuance and verification.
//!
//! Tokens are HS256 JSON Web Tokens signed with a single process-wide secret.
//! The secret is injected through [`AuthConfig`] when the codec is built, so
//! every test can run with its own key.
//!
//! # Examples
//!
//! ```rust
//! use chrono::TimeDelta;
//! use shop_auth::{config::AuthConfig, jwt::TokenCodec, role::Role};
//!
//! let codec = TokenCodec::new(&AuthConfig::new("MySuperSecret", TimeDelta::hours(24)));
//!
//! let token = codec.issue(42, Role::User).unwrap();
//! let claims = codec.verify(&token).unwrap();
//! assert_eq!(claims.id, 42);
//! assert_eq!(claims.role, "user");
//! ```

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::{debug, error};

use crate::claims::IdentityClaims;
use crate::config::AuthConfig;
use crate::prelude::*;
use crate::role::Role;

/// JWT signing algorithm. Tokens using anything else are rejected.
const ALGORITHM: Algorithm = Algorithm::HS256;

/// Cryptographic key pair for JWT signing and verification.
struct Keys {
    /// Key used for signing new JWT tokens.
    encoding: EncodingKey,
    /// Key used for verifying existing JWT tokens.
    decoding: DecodingKey,
    validation: Validation,
}

impl Keys {
    fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        // Expiry is checked against the caller's clock in `verify_at`.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }
}

/// Issues and verifies identity tokens.
///
/// Cheap to clone; all clones share the same keys.
#[derive(Clone)]
pub struct TokenCodec {
    keys: Arc<Keys>,
    ttl: TimeDelta,
}

impl TokenCodec {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            keys: Arc::new(Keys::new(config.jwt_secret.as_bytes())),
            ttl: config.token_ttl,
        }
    }

    /// Token lifetime in whole seconds, as reported to clients.
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl.num_seconds()
    }

    /// Creates a signed token for `id` and `role`, valid from now for the configured TTL.
    pub fn issue(&self, id: i64, role: Role) -> Result<String> {
        self.issue_at(id, role, Utc::now())
    }

    /// Same as [`TokenCodec::issue`] with an explicit issue time.
    pub fn issue_at(&self, id: i64, role: Role, now: DateTime<Utc>) -> Result<String> {
        let claims = IdentityClaims::new(id, role, now, self.ttl)?;
        encode(&Header::new(ALGORITHM), &claims, &self.keys.encoding).map_err(|err| {
            error!("Failed to encode JWT {err}");
            Error::TokenCreation(err)
        })
    }

    /// Validates a token and extracts its claims.
    ///
    /// Malformed input, a foreign algorithm, a bad signature and an expired
    /// token all yield [`Error::InvalidToken`].
    pub fn verify(&self, token: &str) -> Result<IdentityClaims> {
        self.verify_at(token, Utc::now())
    }

    /// Same as [`TokenCodec::verify`] with an explicit clock.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<IdentityClaims> {
        let claims = decode::<IdentityClaims>(token, &self.keys.decoding, &self.keys.validation)
            .map_err(|err| {
                debug!("Rejected jwt token {err}");
                Error::InvalidToken
            })?
            .claims;

        if claims.is_expired_at(now) {
            debug!("Rejected jwt token for account {}: expired", claims.id);
            return Err(Error::InvalidToken);
        }
        Ok(claims)
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &ALGORITHM)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
