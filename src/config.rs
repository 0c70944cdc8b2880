//! Site configuration module.
//!
//! Configuration lives in an optional JSON file, `notesite.json` in the site
//! root by default. A missing file and a missing key both mean "use the
//! default", so the smallest valid config is `{}`.
//!
//! ## Configuration Options
//!
//! ```json
//! {
//!   "site": {
//!     "title": "Gridea",
//!     "description": "温故而知新",
//!     "base_url": ".",
//!     "author": "Gridea"
//!   },
//!   "home": { "count": 5 },
//!   "feed": {
//!     "count": 10,
//!     "time_of_day": "12:00:00.000Z",
//!     "generator": "https://github.com/jpmonette/feed"
//!   },
//!   "theme": { "assets": true, "scripts": true }
//! }
//! ```
//!
//! `theme.assets` controls the icon font, favicon and animation stylesheet
//! links in generated pages; `theme.scripts` controls the animation and menu
//! scripts. With both off, pages carry only the main stylesheet.
//!
//! Unknown keys are rejected to catch typos early, and malformed JSON fails
//! the whole run.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default config file name, looked up in the site root.
pub const CONFIG_FILE: &str = "notesite.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `notesite.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site identity used in page titles and the feed header.
    pub site: SiteInfo,
    /// Home page listing.
    pub home: HomeConfig,
    /// Atom feed settings.
    pub feed: FeedConfig,
    /// Page template toggles.
    pub theme: ThemeConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.title.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site.title must not be empty".into(),
            ));
        }
        if self.home.count == 0 {
            return Err(ConfigError::Validation(
                "home.count must be at least 1".into(),
            ));
        }
        if self.feed.count == 0 {
            return Err(ConfigError::Validation(
                "feed.count must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    pub title: String,
    /// Tagline shown in the sidebar and as the feed subtitle.
    pub description: String,
    /// Prefix for feed ids and links.
    pub base_url: String,
    /// Name on the feed's rights line.
    pub author: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            title: "Gridea".to_string(),
            description: "温故而知新".to_string(),
            base_url: ".".to_string(),
            author: "Gridea".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HomeConfig {
    /// Number of most recent articles shown on the home page.
    pub count: usize,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self { count: 5 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeedConfig {
    /// Maximum number of entries in `atom.xml`.
    pub count: usize,
    /// Appended to each article date to form its `updated` timestamp.
    pub time_of_day: String,
    pub generator: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            count: 10,
            time_of_day: "12:00:00.000Z".to_string(),
            generator: "https://github.com/jpmonette/feed".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Include icon font, favicon and animation stylesheet links.
    pub assets: bool,
    /// Include animation and menu scripts.
    pub scripts: bool,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            assets: true,
            scripts: true,
        }
    }
}

/// Parse and validate config JSON.
pub fn parse_config(content: &str) -> Result<SiteConfig, ConfigError> {
    let config: SiteConfig = serde_json::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load config from a JSON file.
///
/// Returns the defaults if the file does not exist. A file that exists but
/// is not valid JSON, or that contains unknown keys, is an error.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    if !path.exists() {
        return Ok(SiteConfig::default());
    }
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// The default configuration as pretty-printed JSON.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_json() -> String {
    serde_json::to_string_pretty(&SiteConfig::default()).expect("default config must serialize")
}
