//! User configuration (`<config_dir>/habitgrid/config.toml`).

use std::fs;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::grid::pagination::DEFAULT_PAGE_SIZE;
use crate::grid::render::DEFAULT_CARD_BREAKPOINT;

pub const APP_DIR: &str = "habitgrid";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Rows per page.
    pub page_size: usize,
    /// Terminal width below which habits are shown as cards.
    pub card_breakpoint: u16,
    /// One of off, error, warn, info, debug, trace.
    pub log_level: String,
    /// Overrides `<data_dir>/habitgrid/data.toml`.
    pub data_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            card_breakpoint: DEFAULT_CARD_BREAKPOINT,
            log_level: "info".to_string(),
            data_file: None,
        }
    }
}

impl AppConfig {
    /// Read the config file, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let mut config: AppConfig =
            toml::from_str(&content).map_err(|source| AppError::TomlDe {
                path: path.display().to_string(),
                source,
            })?;
        if config.page_size == 0 {
            config.page_size = DEFAULT_PAGE_SIZE;
        }
        Ok(config)
    }

    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}

/// `<config_dir>/habitgrid/config.toml`
pub fn config_path() -> Result<PathBuf> {
    let dir = dirs::config_dir().ok_or(AppError::NoDir("config"))?;
    Ok(dir.join(APP_DIR).join("config.toml"))
}

/// `<data_dir>/habitgrid/`, created if missing.
pub fn data_dir() -> Result<PathBuf> {
    let dir = dirs::data_dir().ok_or(AppError::NoDir("data"))?.join(APP_DIR);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: AppConfig = toml::from_str("page_size = 25").unwrap();
        assert_eq!(config.page_size, 25);
        assert_eq!(config.card_breakpoint, DEFAULT_CARD_BREAKPOINT);
        assert_eq!(config.data_file, None);
    }

    #[test]
    fn test_level_filter_parsing() {
        let mut config = AppConfig::default();
        assert_eq!(config.level_filter(), LevelFilter::Info);
        config.log_level = "debug".to_string();
        assert_eq!(config.level_filter(), LevelFilter::Debug);
        config.log_level = "loud".to_string();
        assert_eq!(config.level_filter(), LevelFilter::Info);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("habitgrid-no-such-config.toml");
        assert_eq!(AppConfig::load(&path).unwrap(), AppConfig::default());
    }
}
