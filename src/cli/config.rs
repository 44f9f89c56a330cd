use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = ".azpub.toml";

/// Persistent CLI settings. The schema is an open mapping: keys this tool
/// does not know about survive a load/save cycle untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,

    #[serde(flatten)]
    pub extra: toml::Table,
}

impl Config {
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read {}", path.as_ref().display()))?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config, treating a missing or unreadable file as empty.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load_from(path).unwrap_or_default()
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write {}", path.as_ref().display()))?;
        Ok(())
    }

    /// Cached tenant id, if one was previously entered.
    pub fn cached_tenant_id(&self) -> Option<&str> {
        self.tenant_id.as_deref().filter(|t| !t.is_empty())
    }
}

/// Path of the per-user config file.
pub fn config_path() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(CONFIG_FILENAME))
        .context("Could not determine home directory")
}
