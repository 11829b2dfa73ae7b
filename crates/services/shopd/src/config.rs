//! Listener configuration.

use std::net::SocketAddr;

use crate::prelude::*;

pub const SHOPD_ADDR_VAR: &str = "SHOPD_ADDR";
pub const DEFAULT_ADDR: &str = "127.0.0.1:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
}

impl ServerConfig {
    /// Reads `SHOPD_ADDR`, falling back to `127.0.0.1:8080`.
    pub fn from_env() -> Result<Self> {
        let raw = std::env::var(SHOPD_ADDR_VAR).unwrap_or_else(|_| String::from(DEFAULT_ADDR));
        let addr = raw
            .trim()
            .parse()
            .map_err(|err| Error::InvalidAddr(SHOPD_ADDR_VAR, err))?;
        Ok(Self { addr })
    }
}
