use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Service-side constants: where pages and media live and which extensions
/// count as direct media links.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub page_base: String,
    pub media_base: String,
    pub media_extensions: Vec<String>,
    pub title_suffixes: Vec<String>,
    pub playable_aliases: Vec<(String, String)>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            page_base: "https://imgur.com".to_string(),
            media_base: "https://i.imgur.com".to_string(),
            media_extensions: vec![
                ".jpg".to_string(),
                ".jpeg".to_string(),
                ".png".to_string(),
                ".gif".to_string(),
                ".gifv".to_string(),
                ".mp4".to_string(),
                ".webm".to_string(),
            ],
            title_suffixes: vec![
                " - Album on Imgur".to_string(),
                " - Imgur".to_string(),
            ],
            playable_aliases: vec![(".gifv".to_string(), ".mp4".to_string())],
        }
    }
}

impl ServiceConfig {
    pub fn is_media_extension(&self, extension: &str) -> bool {
        self.media_extensions
            .iter()
            .any(|known| known.eq_ignore_ascii_case(extension))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Reference payload the service serves in place of removed media.
    /// Unset disables the placeholder check.
    pub placeholder_asset: Option<PathBuf>,
    /// Landing URLs that a removed item's fetch gets redirected to.
    pub removed_landing: Vec<String>,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            placeholder_asset: None,
            removed_landing: vec!["https://i.imgur.com/removed.png".to_string()],
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub service: ServiceConfig,
    pub download: DownloadConfig,
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path))?;
        let config = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path))?;
        Ok(config)
    }
}
