//! Configuration handling for the sign-up form

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Environment variable overriding where the cookie jar lives
pub const DATA_DIR_ENV: &str = "STUDENG_DATA_DIR";

/// Cookie jar file name within the data directory
const COOKIE_FILE: &str = "cookies.json";

/// Default preview box width in terminal cells
const DEFAULT_PREVIEW_WIDTH: u16 = 24;

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct JoinConfig {
    /// Start in dark mode
    pub dark_theme: Option<bool>,
    /// Directory holding the cookie jar
    pub data_dir: Option<String>,
    /// Width of the photo preview in cells
    pub preview_width: Option<u16>,
}

impl JoinConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "studeng", "studeng-join")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: JoinConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Resolve the data directory: env override, then config, then platform default
    pub fn data_dir(&self) -> Option<PathBuf> {
        Self::resolve_data_dir(std::env::var(DATA_DIR_ENV).ok(), self.data_dir.as_deref())
    }

    fn resolve_data_dir(env: Option<String>, configured: Option<&str>) -> Option<PathBuf> {
        env.filter(|dir| !dir.is_empty())
            .or_else(|| configured.map(str::to_string))
            .map(PathBuf::from)
            .or_else(|| {
                ProjectDirs::from("org", "studeng", "studeng-join")
                    .map(|dirs| dirs.data_dir().to_path_buf())
            })
    }

    /// Full path of the cookie jar file
    pub fn cookie_jar_path(&self) -> Option<PathBuf> {
        self.data_dir().map(|dir| dir.join(COOKIE_FILE))
    }

    pub fn dark_theme(&self) -> bool {
        self.dark_theme.unwrap_or(false)
    }

    pub fn preview_width(&self) -> u16 {
        self.preview_width.unwrap_or(DEFAULT_PREVIEW_WIDTH).max(4)
    }
}
