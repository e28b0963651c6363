//! Configuration management for anistream
//!
//! Handles config file loading/saving and backend URL resolution.
//! Config is stored at ~/.config/anistream/config.toml

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::api::DEFAULT_BACKEND_URL;

/// Environment variable overriding the backend base URL
pub const BACKEND_URL_ENV: &str = "ANISTREAM_BACKEND_URL";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Backend base URL
    pub backend_url: Option<String>,
    /// Preferred local player (vlc, mpv)
    pub player: Option<String>,
}

impl Config {
    /// Get config file path (~/.config/anistream/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("anistream").join("config.toml"))
    }

    /// Load config from the default path, or return default if not found
    pub fn load() -> Self {
        Self::path()
            .map(|p| Self::load_from(&p))
            .unwrap_or_default()
    }

    /// Load config from a specific file; missing or malformed files yield defaults
    pub fn load_from(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|s| toml::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Save config to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml = toml::to_string_pretty(self)?;
        std::fs::write(path, toml)?;
        Ok(())
    }

    /// Resolve the backend URL with fallback chain:
    /// 1. Explicit override (command line flag)
    /// 2. Environment variable ANISTREAM_BACKEND_URL
    /// 3. Config file
    /// 4. http://localhost:8000
    pub fn backend_url(&self, flag: Option<&str>) -> String {
        let env = std::env::var(BACKEND_URL_ENV).ok();
        Self::resolve_backend_url(flag, env.as_deref(), self.backend_url.as_deref())
    }

    /// Pure resolution step behind `backend_url`. Blank values are skipped.
    pub fn resolve_backend_url(
        flag: Option<&str>,
        env: Option<&str>,
        file: Option<&str>,
    ) -> String {
        [flag, env, file]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
            .unwrap_or(DEFAULT_BACKEND_URL)
            .trim_end_matches('/')
            .to_string()
    }
}
