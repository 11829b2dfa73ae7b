//! Claims set carried inside an identity token.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::prelude::*;
use crate::role::Role;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Account id.
    pub id: i64,
    /// Account role, `"user"` or `"admin"` when issued by this service.
    pub role: String,
    /// Issued at (unix seconds).
    pub iat: i64,
    /// Expires at (unix seconds).
    pub exp: i64,
}

impl IdentityClaims {
    pub fn new(id: i64, role: Role, issued_at: DateTime<Utc>, ttl: TimeDelta) -> Result<Self> {
        let expiration = issued_at
            .checked_add_signed(ttl)
            .ok_or(Error::TokenTtlOutOfRange)?;

        Ok(Self {
            id,
            role: String::from(role.as_str()),
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
        })
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}
