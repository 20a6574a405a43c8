// SPDX-License-Identifier: AGPL-3.0-or-later
//! Client configuration

use chrono::format::{Item, StrftimeItems};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{DriveError, DriveResult};
use crate::format::DEFAULT_DATE_FORMAT;

/// Overrides `api.base_url` when set
pub const API_URL_ENV: &str = "SECURE_DRIVE_API_URL";

/// Object API location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: default_base_url() }
    }
}

/// Listing presentation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// strftime pattern for entries older than a week
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_page_size() -> u64 {
    50
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            page_size: default_page_size(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DriveConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl DriveConfig {
    /// Platform config file location, e.g. `~/.config/secure-drive/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "securedrive", "secure-drive")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn from_toml_str(s: &str) -> DriveResult<Self> {
        let config: Self = toml::from_str(s).map_err(|e| DriveError::Config(e.to_string()))?;
        config.validated()
    }

    pub fn load(path: &Path) -> DriveResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DriveError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Load `path` (or the default location), falling back to defaults when
    /// the file does not exist. The environment override is applied last.
    pub fn load_or_default(path: Option<&Path>) -> DriveResult<Self> {
        let path = path.map(Path::to_path_buf).or_else(Self::default_path);
        let mut config = match path {
            Some(p) if p.exists() => Self::load(&p)?,
            _ => Self::default(),
        };

        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                config.api.base_url = url;
            }
        }

        config.validated()
    }

    fn validated(mut self) -> DriveResult<Self> {
        self.api.base_url = self.api.base_url.trim().trim_end_matches('/').to_string();
        if self.api.base_url.is_empty() {
            return Err(DriveError::Config("api.base_url is empty".into()));
        }
        if StrftimeItems::new(&self.display.date_format).any(|i| matches!(i, Item::Error)) {
            return Err(DriveError::Config(format!(
                "invalid display.date_format {:?}",
                self.display.date_format
            )));
        }
        if self.display.page_size == 0 {
            return Err(DriveError::Config("display.page_size must be positive".into()));
        }
        Ok(self)
    }
}
