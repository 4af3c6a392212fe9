// ABOUTME: Configuration management for cardforge
// Image settings, template selection, and backend credentials in ~/.cardforge

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::api::types::{DEFAULT_BASE_URL, DEFAULT_CHAT_MODEL, DEFAULT_IMAGE_MODEL};
use crate::api::GenAuth;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application version that wrote this file
    #[serde(default = "default_version")]
    pub version: String,

    /// Requested image size, e.g. "1024x1365" (3:4 portrait cards)
    #[serde(default = "default_image_size")]
    pub image_size: String,

    /// Whether generated images carry the backend watermark
    #[serde(default = "default_true")]
    pub watermark_enabled: bool,

    /// Last selected template id, restored on startup
    #[serde(default)]
    pub selected_template_id: Option<String>,

    /// Directory where the download step saves images
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Backend connection settings
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key; the CARDFORGE_API_KEY environment variable takes precedence
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_chat_model")]
    pub chat_model: String,

    #[serde(default = "default_image_model")]
    pub image_model: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            chat_model: default_chat_model(),
            image_model: default_image_model(),
        }
    }
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_image_size() -> String {
    "1024x1365".to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_chat_model() -> String {
    DEFAULT_CHAT_MODEL.to_string()
}

fn default_image_model() -> String {
    DEFAULT_IMAGE_MODEL.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            image_size: default_image_size(),
            watermark_enabled: default_true(),
            selected_template_id: None,
            output_dir: None,
            api: ApiConfig::default(),
        }
    }
}

impl AppConfig {
    /// Base directory for all cardforge state
    pub fn base_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".cardforge"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("config.toml"))
    }

    pub fn templates_path() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("templates.json"))
    }

    pub fn history_path() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("history.json"))
    }

    pub fn logs_dir() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("logs"))
    }

    /// Load configuration from the default location, falling back to defaults
    /// when no file exists yet
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {}", parent.display()))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    /// Build backend auth, preferring the environment over the config file
    pub fn gen_auth(&self) -> GenAuth {
        let env_auth = GenAuth::from_env();
        let api_key = env_auth.api_key.or_else(|| self.api.api_key.clone());
        GenAuth {
            api_key,
            base_url: self.api.base_url.clone(),
        }
    }

    /// Where the download step writes images when no directory is configured
    pub fn resolved_output_dir(&self) -> PathBuf {
        if let Some(dir) = &self.output_dir {
            return dir.clone();
        }
        dirs::download_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cardforge")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(config.image_size, "1024x1365");
        assert!(config.watermark_enabled);
        assert!(config.selected_template_id.is_none());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = AppConfig::default();
        config.image_size = "1080x1080".to_string();
        config.watermark_enabled = false;
        config.selected_template_id = Some("preset_warm_minimal".to_string());
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.image_size, "1080x1080");
        assert!(!loaded.watermark_enabled);
        assert_eq!(
            loaded.selected_template_id.as_deref(),
            Some("preset_warm_minimal")
        );
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load_from(&dir.path().join("missing.toml")).unwrap();
        assert_eq!(config.image_size, default_image_size());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "image_size = \"512x512\"\n").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.image_size, "512x512");
        assert!(config.watermark_enabled);
        assert_eq!(config.api.base_url, default_base_url());
    }
}
