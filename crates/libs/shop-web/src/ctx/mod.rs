//! Request context management for web handlers.
//!
//! The token is verified once by [`resolver::mw_ctx_resolver`]; handlers
//! receive the resulting [`Ctx`] instead of parsing the header again.

use shop_auth::claims::IdentityClaims;

pub mod resolver;

/// Identity of the authenticated caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ctx {
    /// Account id from the token.
    pub user_id: i64,
    /// Role from the token, as issued.
    pub role: String,
}

impl Ctx {
    pub fn new(user_id: i64, role: impl Into<String>) -> Self {
        Self {
            user_id,
            role: role.into(),
        }
    }
}

impl From<IdentityClaims> for Ctx {
    fn from(claims: IdentityClaims) -> Self {
        Self::new(claims.id, claims.role)
    }
}
