use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use super::paths::Paths;
use crate::error::{HolocronError, Result};

/// Default SWAPI base URL
pub const DEFAULT_BASE_URL: &str = "https://swapi.dev/api";

/// Default timeout for remote calls
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Keys accepted by `config set`
pub const CONFIG_KEYS: &[&str] = &[
    "api.base_url",
    "api.timeout_secs",
    "cache.file",
    "search.partial_hit",
];

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Cache location
    #[serde(default)]
    pub cache: CacheConfig,

    /// Search behavior
    #[serde(default)]
    pub search: SearchConfig,
}

/// API-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// SWAPI base URL, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Timeout for each remote call, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Cache configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache document location (defaults to ~/.holocron/cache.json)
    pub file: Option<PathBuf>,
}

/// Search configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchConfig {
    /// What to do when the character is cached but the homeworld is not
    #[serde(default)]
    pub partial_hit: PartialHitPolicy,
}

/// Handling of a cached character whose homeworld was never fetched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PartialHitPolicy {
    /// Keep the cached character and fetch only the homeworld
    #[default]
    HomeworldOnly,
    /// Fetch the character again by name, then its homeworld
    Refetch,
}

impl std::str::FromStr for PartialHitPolicy {
    type Err = HolocronError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "homeworld-only" => Ok(Self::HomeworldOnly),
            "refetch" => Ok(Self::Refetch),
            other => Err(HolocronError::Config(format!(
                "Unknown partial_hit policy '{other}'. Use 'homeworld-only' or 'refetch'."
            ))),
        }
    }
}

impl std::fmt::Display for PartialHitPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HomeworldOnly => f.write_str("homeworld-only"),
            Self::Refetch => f.write_str("refetch"),
        }
    }
}

impl Config {
    /// Load configuration from a specific paths instance
    pub fn load_from(paths: &Paths) -> Result<Self> {
        if !paths.config_exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&paths.config_file)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a specific paths instance
    pub fn save_to(&self, paths: &Paths) -> Result<()> {
        paths.ensure_dirs()?;
        let contents = toml::to_string_pretty(self)?;
        fs::write(&paths.config_file, &contents)?;

        #[cfg(unix)]
        {
            let perms = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&paths.config_file, perms)?;
        }

        Ok(())
    }

    /// Resolve the cache document location
    pub fn cache_file(&self, paths: &Paths) -> PathBuf {
        self.cache
            .file
            .clone()
            .unwrap_or_else(|| paths.cache_file.clone())
    }

    /// Timeout applied to each remote call
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    /// Set a configuration value by dotted key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api.base_url" => {
                url::Url::parse(value).map_err(|e| {
                    HolocronError::Config(format!("Invalid base URL '{value}': {e}"))
                })?;
                self.api.base_url = value.trim_end_matches('/').to_string();
            }
            "api.timeout_secs" => {
                let secs: u64 = value.parse().map_err(|_| {
                    HolocronError::Config(format!("Invalid timeout '{value}': expected seconds"))
                })?;
                if secs == 0 {
                    return Err(HolocronError::Config(
                        "Timeout must be at least 1 second".to_string(),
                    ));
                }
                self.api.timeout_secs = secs;
            }
            "cache.file" => {
                self.cache.file = Some(PathBuf::from(value));
            }
            "search.partial_hit" => {
                self.search.partial_hit = value.parse()?;
            }
            _ => {
                return Err(HolocronError::Config(format!(
                    "Unknown config key '{key}'. Valid keys: {}",
                    CONFIG_KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }
}
