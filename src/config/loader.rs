//! Configuration source discovery and loading.
//!
//! Sources are YAML or JSON documents holding either a single mapping or a
//! (possibly nested) list of mappings. Discovery walks from a start directory
//! up through its ancestors and picks the first directory with a source file.

use super::types::ConfigItem;
use crate::error::{ConfigError, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming an explicit configuration source.
pub const CONFIG_PATH_ENV: &str = "USAGI_CONFIG_PATH";

/// Candidate file names, in lookup order within a directory.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["usagi.config.yaml", "usagi.config.yml", "usagi.config.json"];

/// Where to look for a configuration source.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Explicit source path; skips discovery when set.
    pub explicit: Option<PathBuf>,
    /// Directory discovery starts from.
    pub start_dir: PathBuf,
}

impl Default for ConfigPaths {
    fn default() -> Self {
        Self::discover()
    }
}

impl ConfigPaths {
    /// Discover paths from the environment and the current directory.
    pub fn discover() -> Self {
        let explicit = std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from);
        let start_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            explicit,
            start_dir,
        }
    }

    /// Discovery from a given directory, without an explicit source.
    pub fn with_start_dir(start_dir: impl Into<PathBuf>) -> Self {
        Self {
            explicit: None,
            start_dir: start_dir.into(),
        }
    }

    /// Use an explicit source path.
    pub fn with_explicit(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit = Some(path.into());
        self
    }
}

/// Find the nearest configuration source, walking up from `start_dir`.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    for dir in start_dir.ancestors() {
        for name in CONFIG_FILE_NAMES {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}

/// Parse a configuration source according to its extension.
pub fn load_config_file(path: &Path) -> Result<ConfigItem> {
    if !path.exists() {
        return Err(ConfigError::load(path, "Configuration file not found"));
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let content = std::fs::read_to_string(path)?;
    let document: Value = match extension.as_deref() {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
        Some("json") => serde_json::from_str(&content)?,
        _ => {
            return Err(ConfigError::load(
                path,
                "Unsupported configuration file format",
            ));
        }
    };

    debug!(path = %path.display(), "Parsed configuration source");
    ConfigItem::from_value(document)
}

/// Loaded configuration source.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Paths used for discovery
    pub paths: ConfigPaths,
    /// The configuration tree read from the source
    item: ConfigItem,
    /// Path of the source that was read
    config_path: PathBuf,
}

impl ConfigLoader {
    /// Load using the environment and current directory.
    pub fn load() -> Result<Self> {
        Self::load_with_paths(ConfigPaths::discover())
    }

    /// Load with explicit paths.
    pub fn load_with_paths(paths: ConfigPaths) -> Result<Self> {
        let config_path = match &paths.explicit {
            Some(path) => path.clone(),
            None => find_config(&paths.start_dir).ok_or_else(|| {
                ConfigError::load(&paths.start_dir, "Configuration file not found")
            })?,
        };

        let item = load_config_file(&config_path)?;
        info!(path = %config_path.display(), "Loaded configuration source");

        Ok(Self {
            paths,
            item,
            config_path,
        })
    }

    /// The loaded configuration tree.
    pub fn item(&self) -> &ConfigItem {
        &self.item
    }

    /// Consume the loader and return the configuration tree.
    pub fn into_item(self) -> ConfigItem {
        self.item
    }

    /// Path of the source that was read.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}
