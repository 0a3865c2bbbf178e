//! Configuration for the link server.
//!
//! For now this is intentionally simple: you can either use defaults
//! or override via a few environment variables:
//!
//! - `LINK_SOCKET_PATH`  (default: "/tmp/gb-serial.sock")
//! - `LINK_TRAFFIC_LOG`  (default: "logs/client"; empty or "off" disables)
//! - `LINK_MAX_CLIENTS`  (default: "16")
//!
//! The binary layers its command-line flags on top.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::ServerError;

pub const DEFAULT_SOCKET_PATH: &str = "/tmp/gb-serial.sock";
pub const DEFAULT_TRAFFIC_LOG: &str = "logs/client";
pub const DEFAULT_MAX_CLIENTS: usize = 16;

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Unix socket the emulator connects to.
    pub socket_path: PathBuf,

    /// Prefix for raw per-connection byte dumps; `None` disables them.
    pub traffic_log: Option<PathBuf>,

    /// Maximum number of simultaneously connected peers.
    pub max_clients: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            socket_path: PathBuf::from(DEFAULT_SOCKET_PATH),
            traffic_log: Some(PathBuf::from(DEFAULT_TRAFFIC_LOG)),
            max_clients: DEFAULT_MAX_CLIENTS,
        }
    }
}

impl Config {
    /// Construct a `Config` from environment variables, falling back
    /// to reasonable defaults.
    pub fn from_env() -> Result<Self, ServerError> {
        let socket_path = env::var("LINK_SOCKET_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SOCKET_PATH));
        let traffic_log = match env::var("LINK_TRAFFIC_LOG") {
            Ok(val) => parse_traffic_log(&val),
            Err(_) => Some(PathBuf::from(DEFAULT_TRAFFIC_LOG)),
        };
        let max_clients = read_env_or_default("LINK_MAX_CLIENTS", DEFAULT_MAX_CLIENTS)?;

        Ok(Config {
            socket_path,
            traffic_log,
            max_clients,
        })
    }
}

/// Interpret a traffic log setting: a path prefix, or empty / "off".
pub fn parse_traffic_log(val: &str) -> Option<PathBuf> {
    let val = val.trim();
    if val.is_empty() || val.eq_ignore_ascii_case("off") {
        None
    } else {
        Some(PathBuf::from(val))
    }
}

fn read_env_or_default<T>(key: &'static str, default: T) -> Result<T, ServerError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(val) => val.parse::<T>().map_err(|e| ServerError::InvalidConfig {
            key,
            reason: e.to_string(),
            value: val,
        }),
        Err(_) => Ok(default),
    }
}
