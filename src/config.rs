//! User configuration: which theme applies when a call does not name one.
//!
//! Looked up fresh on every load, in order: the `PLOTGRID_THEME` environment
//! variable, then `plotgrid/config.json` under the platform config directory,
//! then the built-in default. Nothing is cached process-wide.

use crate::themes::DEFAULT_THEME;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Theme name resolved through the registry.
    pub theme: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
        }
    }
}

impl Config {
    /// Resolve the effective configuration. Unreadable or malformed config
    /// files fall back to the default rather than failing the plotting call.
    pub fn load() -> Self {
        if let Ok(theme) = std::env::var("PLOTGRID_THEME")
            && !theme.is_empty()
        {
            return Self { theme };
        }
        if let Some(path) = Self::config_path()
            && path.exists()
        {
            if let Ok(cfg) = Self::read_file(&path) {
                return cfg;
            }
            log::warn!("ignoring unreadable config at {}", path.display());
        }
        Self::default()
    }

    /// Platform config file location (`<config_dir>/plotgrid/config.json`).
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("plotgrid").join("config.json"))
    }

    /// Read a configuration file, with context on failure.
    pub fn read_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parse config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn default_theme_is_pearl() {
        assert_eq!(Config::default().theme, "pearl");
    }

    #[test]
    fn read_file_parses_partial_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut f = std::fs::File::create(&path).unwrap();
        write!(f, "{{\"theme\":\"solar\"}}").unwrap();
        drop(f);
        assert_eq!(Config::read_file(&path).unwrap().theme, "solar");

        // unknown keys and missing keys are tolerated
        std::fs::write(&path, "{}").unwrap();
        assert_eq!(Config::read_file(&path).unwrap().theme, "pearl");
    }
}
