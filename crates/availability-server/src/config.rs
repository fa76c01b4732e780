//! Server configuration

use std::net::SocketAddr;

use anyhow::{Context, Result};
use availability_engine::EngineConfig;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address
    pub addr: SocketAddr,

    /// Holiday directory and cache settings
    pub engine: EngineConfig,
}

fn default_addr() -> String {
    "0.0.0.0:8080".to_string()
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// `AVAILAPI_ADDR` sets the listen address; the holiday settings come from
    /// [`EngineConfig::from_env`].
    pub fn from_env() -> Result<Self> {
        let raw_addr = std::env::var("AVAILAPI_ADDR").unwrap_or_else(|_| default_addr());
        let addr = raw_addr
            .parse()
            .with_context(|| format!("AVAILAPI_ADDR is not a socket address: {}", raw_addr))?;

        Ok(Self {
            addr,
            engine: EngineConfig::from_env(),
        })
    }
}
