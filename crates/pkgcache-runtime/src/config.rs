use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DB_FILE: &str = "packages.db";
pub const RAW_OUTPUT_FILE: &str = "raw_output.json";
pub const CONFIG_FILE: &str = "config.toml";

/// Resolve the data directory based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. PKGCACHE_PATH environment variable (with tilde expansion)
/// 3. XDG data directory
/// 4. ~/.pkgcache
pub fn resolve_data_dir(explicit_path: Option<&str>) -> Result<PathBuf> {
    resolve_with_env(explicit_path, std::env::var("PKGCACHE_PATH").ok())
}

fn resolve_with_env(explicit_path: Option<&str>, env_path: Option<String>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Some(env_path) = env_path {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join("pkgcache"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".pkgcache"));
    }

    Err(Error::Config(
        "Could not determine data directory: no HOME directory or XDG data directory found"
            .to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

/// Files kept under one data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    pub root: PathBuf,
    pub db: PathBuf,
    pub raw_output: PathBuf,
    pub config: PathBuf,
}

impl StorePaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            db: root.join(DB_FILE),
            raw_output: root.join(RAW_OUTPUT_FILE),
            config: root.join(CONFIG_FILE),
            root,
        }
    }
}

/// How to invoke the external package manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    pub program: String,
    /// Arguments for the tabular listing of installed packages
    pub list_args: Vec<String>,
    /// Arguments for the full catalog search (must produce JSON)
    pub search_args: Vec<String>,
    pub list_timeout_secs: u64,
    pub search_timeout_secs: u64,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            program: "winget".to_string(),
            list_args: strings(&["list", "--accept-source-agreements"]),
            search_args: strings(&[
                "search",
                "--query",
                "",
                "--accept-source-agreements",
                "--output",
                "json",
            ]),
            list_timeout_secs: 60,
            search_timeout_secs: 600,
        }
    }
}

impl ToolConfig {
    pub fn list_timeout(&self) -> Duration {
        Duration::from_secs(self.list_timeout_secs)
    }

    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_secs)
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tool: ToolConfig,
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
