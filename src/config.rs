use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Viewer configuration
// ---------------------------------------------------------------------------

/// File looked up in the working directory when `BABY_NAMES_CONFIG` is unset.
pub const CONFIG_FILE: &str = "baby-names.json";
pub const CONFIG_ENV: &str = "BABY_NAMES_CONFIG";
pub const DATA_DIR_ENV: &str = "BABY_NAMES_DATA_DIR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Directory holding `boys/<year>.csv` and `girls/<year>.csv`.
    pub data_dir: PathBuf,
    pub window_size: [f32; 2],
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            window_size: [1000.0, 720.0],
        }
    }
}

/// The sample data shipped alongside the crate.
pub fn default_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

impl ViewerConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("parsing viewer config")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_json(&text)
    }

    /// Resolve the config from the environment: explicit config file, then
    /// `baby-names.json` if present, then defaults. `BABY_NAMES_DATA_DIR`
    /// wins over whatever the file says. A broken file falls back to
    /// defaults with a warning.
    pub fn load() -> Self {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .or_else(|| Some(PathBuf::from(CONFIG_FILE)).filter(|p| p.is_file()));

        let mut config = match path {
            Some(path) => Self::from_file(&path).unwrap_or_else(|e| {
                log::warn!("Ignoring config: {e:#}");
                Self::default()
            }),
            None => Self::default(),
        };

        if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
            config.data_dir = PathBuf::from(dir);
        }
        log::info!("Using data directory {}", config.data_dir.display());
        config
    }
}
