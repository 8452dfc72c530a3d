//! Catalog page configuration.
//!
//! # Responsibility
//! - Load page settings from JSON with defaults for every field.
//! - Reject settings that would break deep-link formatting.

use crate::location::route::DEFAULT_BASE_PATH;
use crate::location::sync::HistoryPolicy;
use crate::logging::normalize_level;
use crate::share::toast::DEFAULT_TOAST_DURATION_MS;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DEFAULT_ORIGIN: &str = "http://localhost:3000";

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    InvalidBasePath(String),
    InvalidOrigin(String),
    InvalidLogLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config json: {err}"),
            Self::InvalidBasePath(value) => write!(
                f,
                "base_path `{value}` must start with `/` and must not end with `/`"
            ),
            Self::InvalidOrigin(value) => {
                write!(f, "origin `{value}` must start with http:// or https://")
            }
            Self::InvalidLogLevel(value) => write!(f, "unsupported log_level `{value}`"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Settings for one notes catalog page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GardenConfig {
    /// Scheme and host used to build shareable links.
    pub origin: String,
    /// Listing path; previews live at `{base_path}/{slug}`.
    pub base_path: String,
    pub history_policy: HistoryPolicy,
    pub toast_duration_ms: u64,
    pub log_level: Option<String>,
}

impl Default for GardenConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            base_path: DEFAULT_BASE_PATH.to_string(),
            history_policy: HistoryPolicy::default(),
            toast_duration_ms: DEFAULT_TOAST_DURATION_MS,
            log_level: None,
        }
    }
}

impl GardenConfig {
    /// Parses and validates a JSON document.
    pub fn from_json_str(raw: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let base = self.base_path.as_str();
        if !base.starts_with('/') || base.len() < 2 || base.ends_with('/') {
            return Err(ConfigError::InvalidBasePath(self.base_path.clone()));
        }
        if !(self.origin.starts_with("http://") || self.origin.starts_with("https://")) {
            return Err(ConfigError::InvalidOrigin(self.origin.clone()));
        }
        if let Some(level) = &self.log_level {
            normalize_level(level).map_err(|_| ConfigError::InvalidLogLevel(level.clone()))?;
        }
        Ok(())
    }
}
