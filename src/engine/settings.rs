//! Connection parameters for the scan engine backends.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Default clamd TCP port.
pub const DEFAULT_CLAMD_PORT: u16 = 3310;

/// Default per-call timeout (five minutes).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Which backend to try first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preference {
    /// The clamd daemon over a socket.
    #[default]
    Clamdscan,
    /// The standalone clamscan binary.
    Clamscan,
}

impl FromStr for Preference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "clamdscan" | "clamd" => Ok(Self::Clamdscan),
            "clamscan" => Ok(Self::Clamscan),
            other => Err(format!(
                "unknown engine preference '{other}' (expected clamdscan or clamscan)"
            )),
        }
    }
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clamdscan => write!(f, "clamdscan"),
            Self::Clamscan => write!(f, "clamscan"),
        }
    }
}

/// clamd daemon settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClamdSettings {
    pub active: bool,
    pub host: String,
    pub port: u16,
    /// Unix socket path; takes precedence over host/port when set.
    pub socket: Option<PathBuf>,
    pub timeout: Duration,
}

impl Default for ClamdSettings {
    fn default() -> Self {
        Self {
            active: true,
            host: "127.0.0.1".to_string(),
            port: DEFAULT_CLAMD_PORT,
            socket: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// clamscan binary settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClamscanSettings {
    pub active: bool,
    pub path: PathBuf,
    pub database: Option<PathBuf>,
    pub scan_archives: bool,
    pub timeout: Duration,
}

impl Default for ClamscanSettings {
    fn default() -> Self {
        Self {
            active: true,
            path: PathBuf::from("/usr/bin/clamscan"),
            database: None,
            scan_archives: true,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Everything needed to build and initialize a scan engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineSettings {
    pub preference: Preference,
    pub clamd: ClamdSettings,
    pub clamscan: ClamscanSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preference_parse() {
        assert_eq!("clamdscan".parse::<Preference>(), Ok(Preference::Clamdscan));
        assert_eq!(" ClamScan ".parse::<Preference>(), Ok(Preference::Clamscan));
        assert!("sophos".parse::<Preference>().is_err());
    }

    #[test]
    fn test_defaults() {
        let settings = EngineSettings::default();
        assert_eq!(settings.preference, Preference::Clamdscan);
        assert_eq!(settings.clamd.port, 3310);
        assert_eq!(settings.clamd.host, "127.0.0.1");
        assert_eq!(settings.clamscan.timeout, Duration::from_secs(300));
    }
}
