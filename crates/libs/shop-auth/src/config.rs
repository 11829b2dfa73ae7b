//! Token signing configuration.
//!
//! Read once at process start and handed to [`crate::jwt::TokenCodec::new`].
//! Nothing in this crate reads the environment on its own after that.

use std::fmt::Display;

use chrono::TimeDelta;

use crate::prelude::*;

pub const JWT_SECRET_VAR: &str = "JWT_SECRET";
pub const TOKEN_TTL_VAR: &str = "TOKEN_TTL";

/// Signing secret and token lifetime.
#[derive(Clone)]
pub struct AuthConfig {
    /// Symmetric HS256 secret.
    pub jwt_secret: String,
    /// How long an issued token stays valid.
    pub token_ttl: TimeDelta,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>, token_ttl: TimeDelta) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl,
        }
    }

    /// Reads `JWT_SECRET` and `TOKEN_TTL` (seconds) from the environment.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use shop_auth::config::AuthConfig;
    ///
    /// let config = AuthConfig::from_env()?;
    /// # Ok::<(), shop_auth::error::Error>(())
    /// ```
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`AuthConfig::from_env`] with a caller supplied variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup(JWT_SECRET_VAR).ok_or(Error::MissingConfig(JWT_SECRET_VAR))?;
        if jwt_secret.is_empty() {
            return Err(Error::InvalidConfig(
                JWT_SECRET_VAR,
                String::from("secret must not be empty"),
            ));
        }

        let raw_ttl = lookup(TOKEN_TTL_VAR).ok_or(Error::MissingConfig(TOKEN_TTL_VAR))?;
        let seconds: i64 = raw_ttl
            .trim()
            .parse()
            .map_err(|err| Error::InvalidConfig(TOKEN_TTL_VAR, format!("{err}")))?;
        if seconds <= 0 {
            return Err(Error::InvalidConfig(
                TOKEN_TTL_VAR,
                String::from("ttl must be a positive number of seconds"),
            ));
        }
        let token_ttl = TimeDelta::try_seconds(seconds).ok_or_else(|| {
            Error::InvalidConfig(TOKEN_TTL_VAR, String::from("ttl out of range"))
        })?;

        Ok(Self {
            jwt_secret,
            token_ttl,
        })
    }
}

impl Display for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "jwt_secret=REDACTED token_ttl={}s", self.token_ttl.num_seconds())
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"REDACTED")
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn reads_secret_and_ttl() {
        let config =
            AuthConfig::from_lookup(lookup(&[("JWT_SECRET", "s3cret"), ("TOKEN_TTL", "3600")]))
                .unwrap();
        assert_eq!(config.jwt_secret, "s3cret");
        assert_eq!(config.token_ttl, TimeDelta::hours(1));
    }

    #[test]
    fn missing_secret_is_reported() {
        let err = AuthConfig::from_lookup(lookup(&[("TOKEN_TTL", "60")])).unwrap_err();
        assert!(matches!(err, Error::MissingConfig(JWT_SECRET_VAR)));
    }

    #[test]
    fn empty_secret_is_rejected() {
        let err = AuthConfig::from_lookup(lookup(&[("JWT_SECRET", ""), ("TOKEN_TTL", "60")]))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(JWT_SECRET_VAR, _)));
    }

    #[test]
    fn ttl_must_be_a_positive_integer() {
        for bad in ["abc", "0", "-5", ""] {
            let err =
                AuthConfig::from_lookup(lookup(&[("JWT_SECRET", "k"), ("TOKEN_TTL", bad)]))
                    .unwrap_err();
            assert!(matches!(err, Error::InvalidConfig(TOKEN_TTL_VAR, _)), "{bad}");
        }
    }

    #[test]
    fn display_redacts_secret() {
        let config = AuthConfig::new("top-secret", TimeDelta::seconds(90));
        let shown = format!("{config} {config:?}");
        assert!(!shown.contains("top-secret"));
        assert!(shown.contains("90s"));
    }
}
