//! Loads [`ApiConfig`] from a TOML file.
//!
//! ```toml
//! [url]
//! base = "https://api.egytech.fyi"
//! participants = "/participants"
//! stats = "/stats"
//! ```
//!
//! Every key is optional and falls back to [`ApiConfig::default`]. The table
//! may also be spelled `[URL]`.

use std::path::Path;

use egytech_api::ApiConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid base URL '{0}'")]
    InvalidUrl(String),
}

#[derive(Deserialize, Debug, Default)]
struct ConfigFile {
    #[serde(default, alias = "URL")]
    url: UrlSection,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct UrlSection {
    base: Option<String>,
    participants: Option<String>,
    stats: Option<String>,
}

/// Parses TOML content into an [`ApiConfig`].
pub fn from_toml_str(toml_content: &str) -> Result<ApiConfig, ConfigError> {
    let file: ConfigFile =
        toml::from_str(toml_content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    let defaults = ApiConfig::default();
    let config = ApiConfig {
        base_url: file.url.base.unwrap_or(defaults.base_url),
        participants_path: file.url.participants.unwrap_or(defaults.participants_path),
        stats_path: file.url.stats.unwrap_or(defaults.stats_path),
    };
    validate_base_url(&config.base_url)?;
    Ok(config)
}

/// Reads and parses a TOML config file.
pub fn load(path: impl AsRef<Path>) -> Result<ApiConfig, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let config = from_toml_str(&content)?;
    tracing::debug!("Loaded API config from {}", path.display());
    Ok(config)
}

/// Returns `config` with its base URL replaced, after checking it parses.
pub fn with_base_url(config: ApiConfig, base_url: &str) -> Result<ApiConfig, ConfigError> {
    validate_base_url(base_url)?;
    Ok(ApiConfig {
        base_url: base_url.to_string(),
        ..config
    })
}

fn validate_base_url(base_url: &str) -> Result<(), ConfigError> {
    match Url::parse(base_url) {
        Ok(url) if !url.cannot_be_a_base() => Ok(()),
        _ => Err(ConfigError::InvalidUrl(base_url.to_string())),
    }
}
