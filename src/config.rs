use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

/// File name looked up in the working directory when no `--config` is given
pub const CONFIG_FILE: &str = "docnav.toml";

/// How the nearby-classes view groups entries around the current class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NearbyMode {
    /// Current class pinned first, then the rest of its package by name
    #[default]
    Package,
    /// Current package plus sibling and direct child packages, collapsible
    Tree,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavConfig {
    /// Search index location, relative to the docs root
    #[serde(default = "default_index_path")]
    pub index_path: PathBuf,
    #[serde(default = "default_result_cap")]
    pub result_cap: usize,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default)]
    pub nearby_mode: NearbyMode,
    /// Page titles look like `<Class><separator><site name>`
    #[serde(default = "default_title_separator")]
    pub title_separator: String,
    /// Title of the class browser page, which has no current class
    #[serde(default)]
    pub all_classes_title: Option<String>,
}

fn default_index_path() -> PathBuf {
    PathBuf::from("assets/search-index.json")
}

fn default_result_cap() -> usize {
    20
}

fn default_debounce_ms() -> u64 {
    150
}

fn default_title_separator() -> String {
    " - ".to_string()
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            index_path: default_index_path(),
            result_cap: default_result_cap(),
            debounce_ms: default_debounce_ms(),
            nearby_mode: NearbyMode::default(),
            title_separator: default_title_separator(),
            all_classes_title: None,
        }
    }
}

impl NavConfig {
    /// Load `path`, falling back to defaults when it is absent or invalid.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return NavConfig::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match Self::parse(&content) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}", path.display(), e);
                    tracing::warn!("Using default configuration");
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
                tracing::warn!("Using default configuration");
            }
        }

        NavConfig::default()
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        let config: NavConfig = toml::from_str(content)?;
        Ok(config.sanitized())
    }

    fn sanitized(mut self) -> Self {
        if self.result_cap == 0 {
            tracing::warn!(
                "result_cap must be positive, using {}",
                default_result_cap()
            );
            self.result_cap = default_result_cap();
        }
        if self.title_separator.is_empty() {
            self.title_separator = default_title_separator();
        }
        self
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
