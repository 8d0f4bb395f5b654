//! Configuration loading functions.

use std::fs;
use std::path::Path;

use super::error::ConfigError;
use super::types::Config;

/// Config file names searched in the working directory, in order.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".clamsweep.yaml",
    ".clamsweep.yml",
    ".clamsweep.json",
    ".clamsweep.toml",
];

impl Config {
    /// Load configuration from a file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.display().to_string(),
            source: e,
        })?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "yaml" | "yml" => serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseYaml {
                path: path.display().to_string(),
                source: e,
            }),
            "json" => serde_json::from_str(&content).map_err(|e| ConfigError::ParseJson {
                path: path.display().to_string(),
                source: e,
            }),
            "toml" => toml::from_str(&content).map_err(|e| ConfigError::ParseToml {
                path: path.display().to_string(),
                source: e,
            }),
            _ => Err(ConfigError::UnsupportedFormat(
                path.display().to_string(),
                ext,
            )),
        }
    }

    /// Load the config file layer.
    ///
    /// An explicit path must exist. Otherwise the first of
    /// [`CONFIG_FILE_NAMES`] found in `project_root` is used, and an empty
    /// layer is returned when none exists.
    pub fn load(explicit: Option<&Path>, project_root: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        for filename in CONFIG_FILE_NAMES {
            let path = project_root.join(filename);
            if path.is_file() {
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }
}
