//! Configuration management for the archive loader using the prefer crate.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::layout::LayoutConfig;

/// Earliest year the backward search will consider.
pub const DEFAULT_FLOOR_YEAR: i32 = 2020;

/// Extra units loaded after the first one while the page cannot scroll yet.
pub const DEFAULT_MAX_EXTRA_UNITS: usize = 4;

/// Application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Root URL the `{year}/{MM}/` paths are resolved against.
    pub base_url: String,
    /// File name of the primary content resource inside a month folder.
    pub index_document: String,
    /// File name of the sidecar metadata resource inside a month folder.
    pub metadata_document: String,
    /// User agent configuration (None = default, "impersonate" = browser UA).
    pub user_agent: Option<String>,
    /// Request timeout in seconds.
    pub request_timeout: u64,
    /// Year below which loading stops for good.
    pub floor_year: i32,
    /// Cap on extra units loaded to make the page scrollable.
    pub max_extra_units: usize,
    /// Distance from the bottom of the page that triggers the next load.
    pub scroll_threshold: f64,
    /// Content must exceed the viewport by this much to count as scrollable.
    pub scrollable_margin: f64,
    /// Image layout tuning.
    pub layout: LayoutConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/".to_string(),
            index_document: "index.html".to_string(),
            metadata_document: "data.json".to_string(),
            user_agent: None,
            request_timeout: 30,
            floor_year: DEFAULT_FLOOR_YEAR,
            max_extra_units: DEFAULT_MAX_EXTRA_UNITS,
            scroll_threshold: 200.0,
            scrollable_margin: 50.0,
            layout: LayoutConfig::default(),
        }
    }
}

impl Settings {
    /// Create settings pointing at a custom archive root.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Default::default()
        }
    }

    /// Request timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Archive root URL.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub index_document: Option<String>,
    #[serde(default)]
    pub metadata_document: Option<String>,
    /// User agent string.
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Request timeout in seconds.
    #[serde(default)]
    pub request_timeout: Option<u64>,
    #[serde(default)]
    pub floor_year: Option<i32>,
    #[serde(default)]
    pub max_extra_units: Option<usize>,
    #[serde(default)]
    pub scroll_threshold: Option<f64>,
    #[serde(default)]
    pub scrollable_margin: Option<f64>,
    /// Image layout tuning; every field falls back to its default.
    #[serde(default)]
    pub layout: LayoutConfig,
}

impl Config {
    /// Load configuration using prefer crate.
    /// Automatically discovers blog-archive config files in standard locations.
    pub async fn load() -> Self {
        match prefer::load("blog-archive").await {
            Ok(pref_config) => {
                let base_url: Option<String> = pref_config.get("base_url").ok();
                let index_document: Option<String> =
                    pref_config.get("index_document").ok();
                let metadata_document: Option<String> =
                    pref_config.get("metadata_document").ok();
                let user_agent: Option<String> = pref_config.get("user_agent").ok();
                let request_timeout: Option<u64> = pref_config.get("request_timeout").ok();
                let floor_year: Option<i32> = pref_config.get("floor_year").ok();
                let max_extra_units: Option<usize> =
                    pref_config.get("max_extra_units").ok();
                let scroll_threshold: Option<f64> =
                    pref_config.get("scroll_threshold").ok();
                let scrollable_margin: Option<f64> =
                    pref_config.get("scrollable_margin").ok();
                let layout: LayoutConfig = pref_config.get("layout").unwrap_or_default();

                Config {
                    base_url,
                    index_document,
                    metadata_document,
                    user_agent,
                    request_timeout,
                    floor_year,
                    max_extra_units,
                    scroll_threshold,
                    scrollable_margin,
                    layout,
                }
            }
            Err(_) => {
                // No config file found, use defaults
                Self::default()
            }
        }
    }

    /// Apply configuration to settings.
    pub fn apply_to_settings(&self, settings: &mut Settings) {
        if let Some(ref base_url) = self.base_url {
            settings.base_url = base_url.clone();
        }
        if let Some(ref index) = self.index_document {
            settings.index_document = index.clone();
        }
        if let Some(ref metadata) = self.metadata_document {
            settings.metadata_document = metadata.clone();
        }
        if let Some(ref user_agent) = self.user_agent {
            settings.user_agent = Some(user_agent.clone());
        }
        if let Some(timeout) = self.request_timeout {
            settings.request_timeout = timeout;
        }
        if let Some(floor) = self.floor_year {
            settings.floor_year = floor;
        }
        if let Some(cap) = self.max_extra_units {
            settings.max_extra_units = cap;
        }
        if let Some(threshold) = self.scroll_threshold {
            settings.scroll_threshold = threshold;
        }
        if let Some(margin) = self.scrollable_margin {
            settings.scrollable_margin = margin;
        }
        settings.layout = self.layout.clone();
    }
}

/// Load settings from configuration (async version).
pub async fn load_settings() -> Settings {
    let config = Config::load().await;
    let mut settings = Settings::default();
    config.apply_to_settings(&mut settings);
    settings
}
