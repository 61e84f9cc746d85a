use std::net::SocketAddr;

use anyhow::{Context, Result};

pub const BIND_ADDR_VAR: &str = "REPOSTATS_BIND_ADDR";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_bind_addr(std::env::var(BIND_ADDR_VAR).ok().as_deref())
    }

    /// Builds the config from an optional raw bind address, falling back to the default.
    pub fn from_bind_addr(raw: Option<&str>) -> Result<Self> {
        let raw = raw
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_BIND_ADDR);
        let bind_addr = raw
            .parse()
            .with_context(|| format!("{BIND_ADDR_VAR} is not a valid socket address: {raw}"))?;
        Ok(Self { bind_addr })
    }
}
