//! Configuration management.
//!
//! Defaults can be overridden by a TOML file (`config.toml` in the state
//! directory, or `--config`) and by `PAPERDECK_*` environment variables
//! (double underscore between section and key, e.g.
//! `PAPERDECK_FEED__CATEGORY=cs.LG`). CLI flags take precedence over both;
//! that last merge happens in the binary.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::store::StateStore;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Feed settings
    #[serde(default)]
    pub feed: FeedConfig,

    /// Storage settings
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Which slice of the feed to load at startup.
///
/// Only the query inputs are configurable; the fetch itself stays a single
/// GET sorted by submission date with no retry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// arXiv category to browse
    #[serde(default = "default_category")]
    pub category: String,

    /// Number of entries to request
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            category: default_category(),
            max_results: default_max_results(),
        }
    }
}

/// Where bookmarks, the dark-mode flag and the log file live
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Overrides the per-user default state directory
    #[serde(default)]
    pub state_dir: Option<PathBuf>,
}

fn default_category() -> String {
    "cs.AI".to_string()
}

fn default_max_results() -> usize {
    100
}

impl Config {
    /// The state directory this configuration resolves to
    pub fn state_dir(&self) -> PathBuf {
        self.storage
            .state_dir
            .clone()
            .unwrap_or_else(StateStore::default_dir)
    }
}

/// Load configuration from a file, with environment overrides on top
pub fn load_config(path: &PathBuf) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path.as_path()))
        .add_source(config::Environment::with_prefix("PAPERDECK").separator("__"))
        .build()?;

    settings.try_deserialize()
}

/// Configuration from environment variables and defaults only
pub fn get_config() -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::Environment::with_prefix("PAPERDECK").separator("__"))
        .build()?;

    settings.try_deserialize()
}

/// `config.toml` in the default state directory, when present
pub fn find_config_file() -> Option<PathBuf> {
    let path = StateStore::default_dir().join("config.toml");
    path.exists().then_some(path)
}
