use std::{fs, path::Path, time::Duration};

use client_core::DEFAULT_BASE_URL;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "reader.toml";
const ENV_PREFIX: &str = "READER__";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReaderSettings {
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub viewport_rows: u32,
    /// Rows from the end of the list at which the next page is requested.
    pub scroll_threshold: u32,
    pub scroll_step: u32,
    pub log_level: String,
}

impl Default for ReaderSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            request_timeout_secs: 10,
            user_agent: concat!("reader/", env!("CARGO_PKG_VERSION")).into(),
            viewport_rows: 24,
            scroll_threshold: 3,
            scroll_step: 10,
            log_level: "info".into(),
        }
    }
}

impl ReaderSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Defaults, then the config file (when present), then `READER__*`
/// environment variables.
pub fn load_settings(config_path: Option<&Path>) -> Result<ReaderSettings, ConfigError> {
    let path = config_path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    let settings = match fs::read_to_string(path) {
        Ok(raw) => parse_settings(&raw, path)?,
        // A missing default file is fine; a missing explicit one is not.
        Err(err) if err.kind() == std::io::ErrorKind::NotFound && config_path.is_none() => {
            ReaderSettings::default()
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.display().to_string(),
                source,
            })
        }
    };
    apply_env_overrides(settings, |key| std::env::var(key).ok())
}

pub fn parse_settings(raw: &str, path: &Path) -> Result<ReaderSettings, ConfigError> {
    toml::from_str(raw).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}

pub fn apply_env_overrides(
    mut settings: ReaderSettings,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ReaderSettings, ConfigError> {
    let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));

    if let Some(v) = var("BASE_URL") {
        settings.base_url = v;
    }
    if let Some(v) = var("REQUEST_TIMEOUT_SECS") {
        settings.request_timeout_secs = parse_number("REQUEST_TIMEOUT_SECS", v)?;
    }
    if let Some(v) = var("USER_AGENT") {
        settings.user_agent = v;
    }
    if let Some(v) = var("VIEWPORT_ROWS") {
        settings.viewport_rows = parse_number("VIEWPORT_ROWS", v)?;
    }
    if let Some(v) = var("SCROLL_THRESHOLD") {
        settings.scroll_threshold = parse_number("SCROLL_THRESHOLD", v)?;
    }
    if let Some(v) = var("SCROLL_STEP") {
        settings.scroll_step = parse_number("SCROLL_STEP", v)?;
    }
    if let Some(v) = var("LOG_LEVEL") {
        settings.log_level = v;
    }

    Ok(settings)
}

fn parse_number<T: std::str::FromStr>(key: &str, value: String) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: format!("{ENV_PREFIX}{key}"),
        value,
    })
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
