//! Configuration type definitions.

use crate::engine::Preference;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default quarantine directory, relative to the working directory.
pub const DEFAULT_QUARANTINE_DIR: &str = "./quarantine";

/// One configuration layer (config file, environment, or CLI).
///
/// Every field is optional; layers are merged with [`Config::or`] and the
/// result resolved into an [`EffectiveConfig`](super::EffectiveConfig).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Move infected files into the quarantine directory.
    pub quarantine: Option<bool>,
    /// Delete infected files.
    pub remove: Option<bool>,
    /// Where quarantined files go.
    pub quarantine_dir: Option<PathBuf>,
    /// Directory for `scan.log`.
    pub log_dir: Option<PathBuf>,
    /// Maximum number of concurrent scans.
    pub jobs: Option<usize>,
    /// Follow symbolic links while walking directories.
    pub follow_symlinks: Option<bool>,
    /// Scan engine settings.
    pub engine: EngineConfig,
}

/// Engine section of a configuration layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub preference: Option<Preference>,
    pub clamd: ClamdConfig,
    pub clamscan: ClamscanConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClamdConfig {
    pub active: Option<bool>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub socket: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClamscanConfig {
    pub active: Option<bool>,
    pub path: Option<PathBuf>,
    pub database: Option<PathBuf>,
    pub scan_archives: Option<bool>,
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Fill unset fields of `self` from `lower`.
    pub fn or(self, lower: Config) -> Config {
        Config {
            quarantine: self.quarantine.or(lower.quarantine),
            remove: self.remove.or(lower.remove),
            quarantine_dir: self.quarantine_dir.or(lower.quarantine_dir),
            log_dir: self.log_dir.or(lower.log_dir),
            jobs: self.jobs.or(lower.jobs),
            follow_symlinks: self.follow_symlinks.or(lower.follow_symlinks),
            engine: EngineConfig {
                preference: self.engine.preference.or(lower.engine.preference),
                clamd: ClamdConfig {
                    active: self.engine.clamd.active.or(lower.engine.clamd.active),
                    host: self.engine.clamd.host.or(lower.engine.clamd.host),
                    port: self.engine.clamd.port.or(lower.engine.clamd.port),
                    socket: self.engine.clamd.socket.or(lower.engine.clamd.socket),
                    timeout_secs: self
                        .engine
                        .clamd
                        .timeout_secs
                        .or(lower.engine.clamd.timeout_secs),
                },
                clamscan: ClamscanConfig {
                    active: self.engine.clamscan.active.or(lower.engine.clamscan.active),
                    path: self.engine.clamscan.path.or(lower.engine.clamscan.path),
                    database: self.engine.clamscan.database.or(lower.engine.clamscan.database),
                    scan_archives: self
                        .engine
                        .clamscan
                        .scan_archives
                        .or(lower.engine.clamscan.scan_archives),
                    timeout_secs: self
                        .engine
                        .clamscan
                        .timeout_secs
                        .or(lower.engine.clamscan.timeout_secs),
                },
            },
        }
    }
}

/// Immutable settings for one run, fixed before any file is scanned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub quarantine: bool,
    pub remove: bool,
    /// Absolute quarantine directory.
    pub quarantine_dir: PathBuf,
    /// Concurrent scans; 1 means strictly sequential.
    pub jobs: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            quarantine: false,
            remove: false,
            quarantine_dir: crate::types::resolve_path(DEFAULT_QUARANTINE_DIR),
            jobs: 1,
        }
    }
}
