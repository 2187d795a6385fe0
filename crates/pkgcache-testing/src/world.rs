//! TestWorld pattern for declarative integration test setup.
//!
//! Each world owns a temp directory with an isolated data dir, optionally
//! wired to a fake package manager, and runs the `pkgcache` binary against it.

use anyhow::Result;
use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::fixtures::{FakeTool, SampleFiles};

/// Timeout written into configs for fake tools.
const FAKE_TOOL_TIMEOUT_SECS: u64 = 10;

/// Declarative test environment builder.
///
/// # Example
/// ```no_run
/// use pkgcache_testing::{FakeTool, TestWorld};
///
/// let world = TestWorld::new()
///     .with_tool(FakeTool::new().with_list_output("Name  Id  Version\nA  Pub.A  1\n"));
///
/// let result = world.run(&["--format", "json", "index", "refresh"]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    data_dir: PathBuf,
    samples: SampleFiles,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join(".pkgcache");
        std::fs::create_dir_all(&data_dir).expect("Failed to create data dir");

        Self {
            temp_dir,
            data_dir,
            samples: SampleFiles::new(),
        }
    }

    /// Install `tool` and point the data dir's config at it.
    pub fn with_tool(self, tool: FakeTool) -> Self {
        self.install_tool(tool, FAKE_TOOL_TIMEOUT_SECS)
            .expect("Failed to install fake tool");
        self
    }

    /// Like `with_tool` but with an explicit timeout for both refresh kinds.
    pub fn with_tool_timeout(self, tool: FakeTool, timeout_secs: u64) -> Self {
        self.install_tool(tool, timeout_secs)
            .expect("Failed to install fake tool");
        self
    }

    /// Point the config at a program that does not exist.
    pub fn with_missing_tool(self) -> Self {
        std::fs::write(
            self.config_path(),
            "[tool]\nprogram = \"pkgcache-missing-tool-xyz\"\n",
        )
        .expect("Failed to write config");
        self
    }

    fn install_tool(&self, tool: FakeTool, timeout_secs: u64) -> Result<()> {
        let installed = tool.install(&self.temp_dir.path().join("tool"))?;
        std::fs::write(self.config_path(), installed.config_toml(timeout_secs)?)?;
        Ok(())
    }

    /// Get the data directory path (.pkgcache).
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join("config.toml")
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("packages.db")
    }

    pub fn raw_output_path(&self) -> PathBuf {
        self.data_dir.join("raw_output.json")
    }

    pub fn samples(&self) -> &SampleFiles {
        &self.samples
    }

    /// Configure a CLI command with this test environment's data dir.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.arg("--data-dir").arg(self.data_dir());
        cmd.current_dir(self.temp_dir.path());
        cmd.env_remove("PKGCACHE_PATH");
        cmd.env_remove("RUST_LOG");
        cmd
    }

    /// Execute the `pkgcache` binary with `args` and capture its output.
    ///
    /// # Note
    /// This method uses `Command::cargo_bin()` which requires the binary to be
    /// built, which cargo test does automatically for the CLI crate's tests.
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("pkgcache")
            .map_err(|e| anyhow::anyhow!("Failed to find pkgcache binary: {}", e))?;

        self.configure_command(&mut cmd);
        cmd.args(args);

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    /// Execute with `--format json` prepended.
    pub fn run_json(&self, args: &[&str]) -> Result<CliResult> {
        let mut full = vec!["--format", "json"];
        full.extend_from_slice(args);
        self.run(&full)
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    /// Check if the command succeeded.
    pub fn success(&self) -> bool {
        self.status.success()
    }

    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.stdout)?)
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
