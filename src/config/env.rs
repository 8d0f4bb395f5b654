//! Environment variable configuration layer.

use super::error::ConfigError;
use super::types::{ClamdConfig, ClamscanConfig, Config, EngineConfig};
use std::path::PathBuf;
use std::str::FromStr;

pub const QUARANTINE_INFECTED: &str = "QUARANTINE_INFECTED";
pub const REMOVE_INFECTED: &str = "REMOVE_INFECTED";
pub const QUARANTINE_DIRECTORY: &str = "QUARANTINE_DIRECTORY";
pub const LOG_DIRECTORY: &str = "LOG_DIRECTORY";
pub const SCAN_JOBS: &str = "SCAN_JOBS";
pub const PREFERENCE: &str = "PREFERENCE";
pub const CLAMD_SCAN_ACTIVE: &str = "CLAMD_SCAN_ACTIVE";
pub const CLAMD_SCAN_HOST: &str = "CLAMD_SCAN_HOST";
pub const CLAMD_SCAN_PORT: &str = "CLAMD_SCAN_PORT";
pub const CLAMD_SCAN_SOCKET: &str = "CLAMD_SCAN_SOCKET";
pub const CLAMD_SCAN_TIMEOUT: &str = "CLAMD_SCAN_TIMEOUT";
pub const CLAMSCAN_ACTIVE: &str = "CLAMSCAN_ACTIVE";
pub const CLAMSCAN_PATH: &str = "CLAMSCAN_PATH";
pub const CLAMAV_DB: &str = "CLAMAV_DB";

impl Config {
    /// Build a layer from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a layer from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            quarantine: parse_bool(QUARANTINE_INFECTED, get(QUARANTINE_INFECTED))?,
            remove: parse_bool(REMOVE_INFECTED, get(REMOVE_INFECTED))?,
            quarantine_dir: get(QUARANTINE_DIRECTORY).map(PathBuf::from),
            log_dir: get(LOG_DIRECTORY).map(PathBuf::from),
            jobs: parse_value(SCAN_JOBS, get(SCAN_JOBS))?,
            follow_symlinks: None,
            engine: EngineConfig {
                preference: parse_value(PREFERENCE, get(PREFERENCE))?,
                clamd: ClamdConfig {
                    active: parse_bool(CLAMD_SCAN_ACTIVE, get(CLAMD_SCAN_ACTIVE))?,
                    host: get(CLAMD_SCAN_HOST),
                    port: parse_value(CLAMD_SCAN_PORT, get(CLAMD_SCAN_PORT))?,
                    socket: get(CLAMD_SCAN_SOCKET).map(PathBuf::from),
                    timeout_secs: parse_value(CLAMD_SCAN_TIMEOUT, get(CLAMD_SCAN_TIMEOUT))?,
                },
                clamscan: ClamscanConfig {
                    active: parse_bool(CLAMSCAN_ACTIVE, get(CLAMSCAN_ACTIVE))?,
                    path: get(CLAMSCAN_PATH).map(PathBuf::from),
                    database: get(CLAMAV_DB).map(PathBuf::from),
                    scan_archives: None,
                    timeout_secs: None,
                },
            },
        })
    }
}

/// Parse a boolean flag: `true/false`, `1/0`, `yes/no`, `on/off`.
pub fn parse_bool(var: &str, value: Option<String>) -> Result<Option<bool>, ConfigError> {
    let Some(value) = value else {
        return Ok(None);
    };
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(Some(true)),
        "false" | "0" | "no" | "off" => Ok(Some(false)),
        _ => Err(ConfigError::InvalidEnv {
            var: var.to_string(),
            value,
            reason: "expected true or false".to_string(),
        }),
    }
}

fn parse_value<T>(var: &str, value: Option<String>) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .map(|v| {
            v.trim().parse::<T>().map_err(|e| ConfigError::InvalidEnv {
                var: var.to_string(),
                value: v.clone(),
                reason: e.to_string(),
            })
        })
        .transpose()
}
