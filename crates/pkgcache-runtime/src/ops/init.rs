use pkgcache_index::Database;
use std::path::PathBuf;

use crate::Result;
use crate::config::{Config, StorePaths};

/// What `InitService::run` did to the data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitReport {
    pub config_path: PathBuf,
    pub db_path: PathBuf,
    /// False when an existing config was left in place
    pub config_written: bool,
}

pub struct InitService;

impl InitService {
    /// Write the default config (unless one exists and `force` is unset) and
    /// create an empty store with the current schema.
    pub fn run(paths: &StorePaths, force: bool) -> Result<InitReport> {
        let config_written = force || !paths.config.exists();
        if config_written {
            Config::default().save_to(&paths.config)?;
            tracing::info!(path = %paths.config.display(), "wrote default config");
        }

        Database::open(&paths.db)?;

        Ok(InitReport {
            config_path: paths.config.clone(),
            db_path: paths.db.clone(),
            config_written,
        })
    }
}
