//! Configuration
//!
//! Stores the tag list and highlighting switches in
//! `~/.config/tagline/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::scan::ScanToggles;
use crate::tags::{TagRegistry, TagSpec};

/// Tag and highlighting configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_tags")]
    pub tags: Vec<TagSpec>,
    #[serde(default = "default_true")]
    pub highlight_markdown: bool,
    #[serde(default = "default_true")]
    pub multiline_comments: bool,
    #[serde(default)]
    pub highlight_plain_text: bool,
    #[serde(default = "default_true")]
    pub use_jsdoc_style: bool,
}

fn default_true() -> bool {
    true
}

fn default_tags() -> Vec<TagSpec> {
    vec![
        TagSpec::new("!").with_color("#FF2D00"),
        TagSpec::new("?").with_color("#3498DB"),
        TagSpec::new("//")
            .with_color("#474747")
            .with_strikethrough(),
        TagSpec::new("todo").with_color("#FF8C00"),
        TagSpec::new("*").with_color("#98C379"),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tags: default_tags(),
            highlight_markdown: true,
            multiline_comments: true,
            highlight_plain_text: false,
            use_jsdoc_style: true,
        }
    }
}

impl Config {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{}", e);
                Self::default()
            }
        }
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config at {}: {}", path.display(), e))?;
        Self::from_yaml(&content)
            .map_err(|e| format!("Failed to parse config at {}: {}", path.display(), e))
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        serde_yaml::from_str(yaml).map_err(|e| format!("YAML parse error: {}", e))
    }

    /// Save config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    pub fn toggles(&self) -> ScanToggles {
        ScanToggles {
            highlight_markdown: self.highlight_markdown,
            multiline_comments: self.multiline_comments,
            highlight_plain_text: self.highlight_plain_text,
            use_jsdoc_style: self.use_jsdoc_style,
        }
    }

    pub fn tag_registry(&self) -> TagRegistry {
        TagRegistry::new(&self.tags)
    }
}
