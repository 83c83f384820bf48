use std::env;
use std::net::SocketAddr;

use crate::error::{Error, Result};
use crate::solver::SYSTEM_ACTOR;

pub const BIND_ADDR_VAR: &str = "TIMETABLE_BIND_ADDR";
pub const LOG_VAR: &str = "TIMETABLE_LOG";
pub const ACTOR_VAR: &str = "TIMETABLE_DEFAULT_ACTOR";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_LOG_FILTER: &str = "info";

/// Service settings, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Used when `RUST_LOG` is not set.
    pub log_filter: String,
    /// `generatedBy` for requests that do not name an actor.
    pub default_actor: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            default_actor: SYSTEM_ACTOR.to_string(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, falling back to defaults for missing keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let raw_addr = lookup(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .parse()
            .map_err(|e| Error::Config(format!("{BIND_ADDR_VAR}={raw_addr:?}: {e}")))?;

        Ok(Self {
            bind_addr,
            log_filter: lookup(LOG_VAR).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            default_actor: lookup(ACTOR_VAR).unwrap_or_else(|| SYSTEM_ACTOR.to_string()),
        })
    }
}
