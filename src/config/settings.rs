use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::error::{Result, RulekitError};

/// Configuration file name, looked up inside the rules directory.
pub const CONFIG_FILE: &str = "rulekit.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RulekitConfig {
    pub registry: RegistryConfig,
    pub matcher: MatcherConfig,
    pub display: DisplayConfig,
}

impl RulekitConfig {
    /// Load configuration from `dir/rulekit.toml`, falling back to defaults
    /// when the file does not exist.
    pub async fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE);
        let config = if config_path.exists() {
            let content = fs::read_to_string(&config_path).await?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub async fn save(&self, dir: &Path) -> Result<()> {
        self.validate()?;
        let config_path = dir.join(CONFIG_FILE);
        let content =
            toml::to_string_pretty(self).map_err(|e| RulekitError::Config(e.to_string()))?;
        fs::write(&config_path, content).await?;
        Ok(())
    }

    /// Validate configuration values for consistency.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.registry.extension.is_empty() {
            errors.push("registry.extension must not be empty");
        }
        if self.registry.extension.starts_with('.') {
            errors.push("registry.extension must not include the leading dot");
        }
        if self.display.description_width == 0 {
            errors.push("display.description_width must be greater than 0");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(RulekitError::Config(errors.join("; ")))
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Rule document extension, without the dot.
    pub extension: String,
    /// Follow symlinks while scanning the rules tree.
    pub follow_links: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            extension: "mdc".to_string(),
            follow_links: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Match action keywords against rule descriptions and bodies.
    pub action_triggers: bool,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            action_triggers: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Truncate descriptions in list output to this many characters.
    pub description_width: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            description_width: 80,
        }
    }
}
