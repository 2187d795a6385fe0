use anyhow::Result;
use once_cell::sync::OnceCell;
use pkgcache_index::Database;
use pkgcache_runtime::{Config, StorePaths, resolve_data_dir};
use std::path::Path;

/// Per-invocation state. The store and config are opened on first use so
/// commands that need neither never touch the data directory.
pub struct ExecutionContext {
    paths: StorePaths,
    db: OnceCell<Database>,
    config: OnceCell<Config>,
}

impl ExecutionContext {
    pub fn new(data_dir: Option<&str>) -> Result<Self> {
        let root = resolve_data_dir(data_dir)?;
        tracing::debug!(data_dir = %root.display(), "resolved data directory");

        Ok(Self {
            paths: StorePaths::new(root),
            db: OnceCell::new(),
            config: OnceCell::new(),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.paths.root
    }

    pub fn paths(&self) -> &StorePaths {
        &self.paths
    }

    pub fn db(&self) -> Result<&Database> {
        self.db
            .get_or_try_init(|| Database::open(&self.paths.db).map_err(Into::into))
    }

    pub fn config(&self) -> Result<&Config> {
        self.config
            .get_or_try_init(|| Config::load_from(&self.paths.config).map_err(Into::into))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_context() -> (TempDir, ExecutionContext) {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = temp_dir.path().join("data");
        let ctx = ExecutionContext::new(data_dir.to_str()).unwrap();
        (temp_dir, ctx)
    }

    #[test]
    fn test_paths_follow_data_dir() {
        let (temp_dir, ctx) = setup_test_context();
        let data_dir = temp_dir.path().join("data");

        assert_eq!(ctx.data_dir(), data_dir.as_path());
        assert_eq!(ctx.paths().db, data_dir.join("packages.db"));
    }

    #[test]
    fn test_config_defaults_without_touching_disk() {
        let (_temp_dir, ctx) = setup_test_context();

        let config = ctx.config().unwrap();
        assert_eq!(config.tool.program, "winget");
        assert!(!ctx.data_dir().exists());
    }

    #[test]
    fn test_db_is_opened_lazily_and_cached() {
        let (_temp_dir, ctx) = setup_test_context();
        assert!(!ctx.paths().db.exists());

        let first = ctx.db().unwrap() as *const Database;
        let second = ctx.db().unwrap() as *const Database;

        assert_eq!(first, second);
        assert!(ctx.paths().db.exists());
    }
}
