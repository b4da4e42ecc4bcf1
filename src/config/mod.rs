//! Configuration module for hikemeet
//!
//! Manages the backend location, credentials and per-screen paging settings.
//! Configuration is stored in the user's config directory and can be
//! overridden with `HIKEMEET_*` environment variables (`__` separates nested
//! keys, e.g. `HIKEMEET_SEARCH__DEBOUNCE_MS=300`).

mod setup;

pub use setup::first_time_setup;

use crate::search::debounce::DEFAULT_DEBOUNCE_MS;
use crate::search::paginate::{GROUPS_PAGE_SIZE, SEARCH_PAGE_SIZE};
use crate::search::sequence::ResponseOrdering;
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Prefix of environment overrides
pub const ENV_PREFIX: &str = "HIKEMEET";

/// Search screen settings
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct SearchSettings {
    /// Delay between the last keystroke and the fetch
    pub debounce_ms: u64,

    /// Results shown initially and added per "load more"
    pub page_size: usize,

    /// What to do with out-of-order responses
    pub ordering: ResponseOrdering,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            page_size: SEARCH_PAGE_SIZE,
            ordering: ResponseOrdering::default(),
        }
    }
}

impl SearchSettings {
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Paging for a list screen (groups, trips)
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct PageSettings {
    pub page_size: usize,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            page_size: GROUPS_PAGE_SIZE,
        }
    }
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct HikeConfig {
    /// Backend root, e.g. `https://api.hikemeet.app`
    pub api_base_url: String,

    /// Bearer token sent with every request
    pub auth_token: Option<String>,

    /// Excluded from people results
    pub current_user_id: Option<String>,

    pub request_timeout_ms: u64,

    /// Suppress informational output by default
    pub quiet: bool,

    pub search: SearchSettings,

    pub groups: PageSettings,

    pub trips: PageSettings,
}

impl Default for HikeConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000".to_string(),
            auth_token: None,
            current_user_id: None,
            request_timeout_ms: 15_000,
            quiet: false,
            search: SearchSettings::default(),
            groups: PageSettings::default(),
            trips: PageSettings::default(),
        }
    }
}

impl HikeConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("hikemeet").join("config.toml"))
    }

    /// Load configuration from the default location, creating it if missing
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, writing defaults there if it doesn't exist
    ///
    /// Environment overrides are applied on top of the file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            Self::default().save_to(path)?;
        }
        Self::build(path, None)
    }

    /// Layer the file at `path` and environment overrides into a config
    ///
    /// `env` replaces the process environment when given; keys keep their
    /// `HIKEMEET_` prefix.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be parsed or a value has the wrong type.
    pub fn build(path: &Path, env: Option<config::Map<String, String>>) -> Result<Self, ConfigError> {
        let environment = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .source(env);

        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(environment)
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Load configuration, running first-time setup if config doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if loading or creating the configuration fails.
    pub fn load_or_setup() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load()
        } else {
            first_time_setup(&config_path)
        }
    }

    /// Set one value by its dotted key (as used by `hikemeet config set`)
    ///
    /// An empty value clears optional keys.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for unknown keys or values of the wrong type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let optional = || {
            let trimmed = value.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };

        match key {
            "api_base_url" => self.api_base_url = value.trim().to_string(),
            "auth_token" => self.auth_token = optional(),
            "current_user_id" => self.current_user_id = optional(),
            "request_timeout_ms" => self.request_timeout_ms = parse_value(key, value)?,
            "quiet" => self.quiet = parse_value(key, value)?,
            "search.debounce_ms" => self.search.debounce_ms = parse_value(key, value)?,
            "search.page_size" => self.search.page_size = parse_value(key, value)?,
            "search.ordering" => {
                self.search.ordering = match value.trim() {
                    "last-response" => ResponseOrdering::LastResponse,
                    "last-request" => ResponseOrdering::LastRequest,
                    other => {
                        return Err(ConfigError::Message(format!(
                            "Invalid value '{other}' for search.ordering (expected last-response or last-request)"
                        )));
                    }
                };
            }
            "groups.page_size" => self.groups.page_size = parse_value(key, value)?,
            "trips.page_size" => self.trips.page_size = parse_value(key, value)?,
            _ => return Err(ConfigError::Message(format!("Unknown config key '{key}'"))),
        }
        Ok(())
    }
    /// Current value of a dotted key, formatted for display
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for unknown keys.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        let optional = |value: &Option<String>| value.clone().unwrap_or_default();

        Ok(match key {
            "api_base_url" => self.api_base_url.clone(),
            "auth_token" => optional(&self.auth_token),
            "current_user_id" => optional(&self.current_user_id),
            "request_timeout_ms" => self.request_timeout_ms.to_string(),
            "quiet" => self.quiet.to_string(),
            "search.debounce_ms" => self.search.debounce_ms.to_string(),
            "search.page_size" => self.search.page_size.to_string(),
            "search.ordering" => match self.search.ordering {
                ResponseOrdering::LastResponse => "last-response".to_string(),
                ResponseOrdering::LastRequest => "last-request".to_string(),
            },
            "groups.page_size" => self.groups.page_size.to_string(),
            "trips.page_size" => self.trips.page_size.to_string(),
            _ => return Err(ConfigError::Message(format!("Unknown config key '{key}'"))),
        })
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Message(format!("Invalid value '{value}' for {key}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> config::Map<String, String> {
        let mut map = config::Map::new();
        for (k, v) in pairs {
            map.insert((*k).to_string(), (*v).to_string());
        }
        map
    }

    #[test]
    fn test_default_config() {
        let config = HikeConfig::default();
        assert_eq!(config.search.debounce_ms, 600);
        assert_eq!(config.search.page_size, 10);
        assert_eq!(config.groups.page_size, 5);
        assert_eq!(config.search.ordering, ResponseOrdering::LastResponse);
        assert!(config.auth_token.is_none());
    }

    #[test]
    fn test_load_from_creates_default_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = HikeConfig::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config, HikeConfig::build(&path, Some(env(&[]))).unwrap());
    }

    #[test]
    fn test_file_values_and_partial_tables() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "api_base_url = \"https://api.example.org\"\ncurrent_user_id = \"u1\"\n\n[search]\nordering = \"last-request\"\n",
        )
        .unwrap();

        let config = HikeConfig::build(&path, Some(env(&[]))).unwrap();
        assert_eq!(config.api_base_url, "https://api.example.org");
        assert_eq!(config.current_user_id.as_deref(), Some("u1"));
        assert_eq!(config.search.ordering, ResponseOrdering::LastRequest);
        assert_eq!(config.search.debounce_ms, 600);
        assert_eq!(config.groups.page_size, 5);
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        HikeConfig::default().save_to(&path).unwrap();

        let config = HikeConfig::build(
            &path,
            Some(env(&[
                ("HIKEMEET_API_BASE_URL", "https://staging.example.org"),
                ("HIKEMEET_SEARCH__DEBOUNCE_MS", "250"),
            ])),
        )
        .unwrap();
        assert_eq!(config.api_base_url, "https://staging.example.org");
        assert_eq!(config.search.debounce(), Duration::from_millis(250));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = HikeConfig::default();
        config.auth_token = Some("secret".into());
        config.trips.page_size = 8;
        config.save_to(&path).unwrap();

        let loaded = HikeConfig::build(&path, Some(env(&[]))).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_set() {
        let mut config = HikeConfig::default();
        config.set("search.page_size", "20").unwrap();
        config.set("search.ordering", "last-request").unwrap();
        config.set("current_user_id", "u9").unwrap();
        assert_eq!(config.search.page_size, 20);
        assert_eq!(config.search.ordering, ResponseOrdering::LastRequest);
        assert_eq!(config.current_user_id.as_deref(), Some("u9"));

        config.set("current_user_id", "").unwrap();
        assert!(config.current_user_id.is_none());

        assert!(config.set("search.page_size", "many").is_err());
        assert!(config.set("search.ordering", "random").is_err());
        assert!(config.set("theme", "dark").is_err());
    }

    #[test]
    fn test_get_mirrors_set() {
        let mut config = HikeConfig::default();
        assert_eq!(config.get("search.ordering").unwrap(), "last-response");
        assert_eq!(config.get("auth_token").unwrap(), "");

        config.set("trips.page_size", "8").unwrap();
        config.set("search.ordering", "last-request").unwrap();
        assert_eq!(config.get("trips.page_size").unwrap(), "8");
        assert_eq!(config.get("search.ordering").unwrap(), "last-request");
        assert!(config.get("theme").is_err());
    }
}
