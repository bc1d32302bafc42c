//! Configuration file at ~/.cascade/config.json.
//!
//! Every field is optional in the file; missing fields take their defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cascade::Locale;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {}: {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CascadeConfig {
    /// Origin of the admin backend.
    pub base_url: String,
    pub districts_path: String,
    pub neighborhoods_path: String,
    pub timeout_secs: u64,
    pub locale: Locale,
    /// City choices offered by the hosting form.
    pub region_choices: Vec<String>,
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".into(),
            districts_path: "/admin/get-districts/".into(),
            neighborhoods_path: "/admin/get-neighborhoods/".into(),
            timeout_secs: 10,
            locale: Locale::Tr,
            region_choices: vec!["Istanbul".into(), "Ankara".into(), "Izmir".into()],
        }
    }
}

impl CascadeConfig {
    /// Load from the default location. A missing file yields the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_path())
    }

    /// Load from a specific path. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".cascade")
            .join("config.json")
    }
}
