//! Configuration layer for clamsweep.
//!
//! Settings come from three layers, highest precedence first: CLI flags,
//! environment variables (optionally loaded from `.env`), and a config file.
//! The merged result is resolved once into an [`EffectiveConfig`] before any
//! scanning starts; nothing in the scan loop reads the environment.
//!
//! ## Layers
//! - `types`: layer and run configuration types
//! - `loading`: config file loading
//! - `env`: environment variable layer

pub mod env;
mod error;
mod loading;
mod types;

pub use error::ConfigError;
pub use loading::CONFIG_FILE_NAMES;
pub use types::{
    ClamdConfig, ClamscanConfig, Config, DEFAULT_QUARANTINE_DIR, EngineConfig, RunConfig,
};

use crate::discovery::WalkConfig;
use crate::engine::{ClamdSettings, ClamscanSettings, EngineSettings};
use crate::types::resolve_path;
use std::path::PathBuf;
use std::time::Duration;

/// Fully resolved configuration for one invocation.
#[derive(Debug, Clone)]
pub struct EffectiveConfig {
    pub run: RunConfig,
    pub engine: EngineSettings,
    pub walk: WalkConfig,
    /// Directory for `scan.log`; file logging is off when unset.
    pub log_dir: Option<PathBuf>,
}

impl EffectiveConfig {
    /// Merge layers (highest precedence first) and apply defaults.
    pub fn resolve(cli: Config, env: Config, file: Config) -> Result<Self, ConfigError> {
        let merged = cli.or(env).or(file);

        let jobs = positive("jobs", merged.jobs.unwrap_or(1))?;
        if let Some(secs) = merged.engine.clamd.timeout_secs {
            positive("engine.clamd.timeout_secs", secs)?;
        }
        if let Some(secs) = merged.engine.clamscan.timeout_secs {
            positive("engine.clamscan.timeout_secs", secs)?;
        }

        let run = RunConfig {
            quarantine: merged.quarantine.unwrap_or(false),
            remove: merged.remove.unwrap_or(false),
            quarantine_dir: resolve_path(
                merged
                    .quarantine_dir
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_QUARANTINE_DIR)),
            ),
            jobs,
        };

        let clamd_defaults = ClamdSettings::default();
        let clamscan_defaults = ClamscanSettings::default();
        let clamd = merged.engine.clamd;
        let clamscan = merged.engine.clamscan;

        let engine = EngineSettings {
            preference: merged.engine.preference.unwrap_or_default(),
            clamd: ClamdSettings {
                active: clamd.active.unwrap_or(clamd_defaults.active),
                host: clamd.host.unwrap_or(clamd_defaults.host),
                port: clamd.port.unwrap_or(clamd_defaults.port),
                socket: clamd.socket,
                timeout: clamd
                    .timeout_secs
                    .map_or(clamd_defaults.timeout, Duration::from_secs),
            },
            clamscan: ClamscanSettings {
                active: clamscan.active.unwrap_or(clamscan_defaults.active),
                path: clamscan.path.unwrap_or(clamscan_defaults.path),
                database: clamscan.database,
                scan_archives: clamscan
                    .scan_archives
                    .unwrap_or(clamscan_defaults.scan_archives),
                timeout: clamscan
                    .timeout_secs
                    .map_or(clamscan_defaults.timeout, Duration::from_secs),
            },
        };

        Ok(Self {
            run,
            engine,
            walk: WalkConfig::default().with_follow_symlinks(merged.follow_symlinks.unwrap_or(false)),
            log_dir: merged.log_dir.map(resolve_path),
        })
    }
}

fn positive<T>(field: &'static str, value: T) -> Result<T, ConfigError>
where
    T: PartialEq + Default,
{
    if value == T::default() {
        return Err(ConfigError::InvalidValue {
            field,
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(value)
}
