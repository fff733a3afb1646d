//! User configuration loaded from `~/.config/diskmenu/config.toml`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Partitioning utility invoked as `<utility> /s <script>`
    pub utility: PathBuf,
    /// Disk numbers hidden from every listing
    pub excluded_disks: Vec<u32>,
    /// Directory for command scripts; the system temp dir when unset
    pub script_dir: Option<PathBuf>,
    /// Restart through sudo when not running as root
    pub elevate: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            utility: PathBuf::from("diskpart"),
            excluded_disks: vec![0],
            script_dir: None,
            elevate: true,
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().context("could not determine config directory")?;
        Ok(dir.join("diskmenu").join("config.toml"))
    }

    /// Loads `path`, falling back to defaults when the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}
