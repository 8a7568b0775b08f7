use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub(crate) const DEFAULT_API_URL: &str = "http://localhost:5678";
pub(crate) const DEFAULT_MODAL_WIDTH: u32 = 800;

/// Settings read from `config.toml`, then overridden by `BILLED_*` variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Config {
    /// Base URL of the bills store.
    #[serde(default = "default_api_url")]
    pub(crate) api_url: String,
    /// Where local storage lives. Defaults to the platform data directory.
    #[serde(default)]
    pub(crate) data_dir: Option<PathBuf>,
    /// Pixel width of the attachment preview modal.
    #[serde(default = "default_modal_width")]
    pub(crate) modal_width: u32,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_modal_width() -> u32 {
    DEFAULT_MODAL_WIDTH
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            data_dir: None,
            modal_width: DEFAULT_MODAL_WIDTH,
        }
    }
}

impl Config {
    /// Load from the platform config directory and apply environment overrides.
    pub(crate) fn load() -> Result<Self> {
        let mut config = match project_dirs() {
            Some(dirs) => Self::load_from(&dirs.config_dir().join("config.toml"))?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub(crate) fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        Ok(config)
    }

    pub(crate) fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("BILLED_API_URL").filter(|v| !v.is_empty()) {
            self.api_url = url;
        }
        if let Some(dir) = lookup("BILLED_DATA_DIR").filter(|v| !v.is_empty()) {
            self.data_dir = Some(PathBuf::from(dir));
        }
    }

    /// Path of the local storage file, creating its directory if needed.
    pub(crate) fn storage_path(&self) -> Result<PathBuf> {
        let data_dir = match &self.data_dir {
            Some(dir) => dir.clone(),
            None => project_dirs()
                .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?
                .data_dir()
                .to_path_buf(),
        };
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
        Ok(data_dir.join("storage.db"))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "billed", "Billed")
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
