//! Fixtures for sample data and a fake package manager.
//!
//! The fake tool is a shell script run through `sh` rather than executed
//! directly, so tests never exec a file they have just written.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Sample tool outputs shared with the parser tests.
pub struct SampleFiles {
    samples_dir: PathBuf,
}

impl Default for SampleFiles {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleFiles {
    /// Samples live in `crates/pkgcache-providers/tests/samples/`.
    pub fn new() -> Self {
        let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let samples_dir = match manifest_dir.parent() {
            Some(crates_dir) => crates_dir.join("pkgcache-providers/tests/samples"),
            None => manifest_dir.join("samples"),
        };

        Self { samples_dir }
    }

    pub fn path(&self, sample_name: &str) -> PathBuf {
        self.samples_dir.join(sample_name)
    }

    pub fn read(&self, sample_name: &str) -> Result<String> {
        Ok(fs::read_to_string(self.path(sample_name))?)
    }

    /// `winget list` output with five installed packages.
    pub fn list_output(&self) -> Result<String> {
        self.read("winget_list.txt")
    }

    /// Search output in the `sources` shape (five entries, one incomplete).
    pub fn search_sources(&self) -> Result<String> {
        self.read("search_sources.json")
    }

    /// Search output in the flat `data` shape (three entries).
    pub fn search_data(&self) -> Result<String> {
        self.read("search_data.json")
    }
}

/// Scriptable stand-in for the package manager.
///
/// The first argument selects the output: `list` prints the list output,
/// `search` prints the search output.
#[derive(Debug, Clone, Default)]
pub struct FakeTool {
    list_stdout: String,
    search_stdout: String,
    stderr: String,
    exit_code: i32,
    delay_secs: u64,
}

impl FakeTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_list_output(mut self, stdout: impl Into<String>) -> Self {
        self.list_stdout = stdout.into();
        self
    }

    pub fn with_search_output(mut self, stdout: impl Into<String>) -> Self {
        self.search_stdout = stdout.into();
        self
    }

    /// Exit with `code` after printing `stderr`.
    pub fn failing(mut self, code: i32, stderr: impl Into<String>) -> Self {
        self.exit_code = code;
        self.stderr = stderr.into();
        self
    }

    /// Sleep before producing any output.
    pub fn with_delay(mut self, secs: u64) -> Self {
        self.delay_secs = secs;
        self
    }

    /// Write the script and its canned outputs into `dir`.
    pub fn install(&self, dir: &Path) -> Result<InstalledTool> {
        fs::create_dir_all(dir)?;

        let list_out = dir.join("list.out");
        let search_out = dir.join("search.out");
        let stderr_out = dir.join("stderr.out");
        fs::write(&list_out, &self.list_stdout)?;
        fs::write(&search_out, &self.search_stdout)?;
        fs::write(&stderr_out, &self.stderr)?;

        let mut script = String::from("#!/bin/sh\n");
        if self.delay_secs > 0 {
            script.push_str(&format!("sleep {}\n", self.delay_secs));
        }
        script.push_str(&format!(
            "case \"$1\" in\n  list) cat '{}' ;;\n  search) cat '{}' ;;\nesac\ncat '{}' >&2\nexit {}\n",
            list_out.display(),
            search_out.display(),
            stderr_out.display(),
            self.exit_code
        ));

        let script_path = dir.join("fake-winget.sh");
        fs::write(&script_path, script)?;

        Ok(InstalledTool {
            script: script_path,
        })
    }
}

/// A fake tool written to disk.
#[derive(Debug, Clone)]
pub struct InstalledTool {
    pub script: PathBuf,
}

impl InstalledTool {
    /// Config file contents that route both refresh kinds to this script.
    pub fn config_toml(&self, timeout_secs: u64) -> Result<String> {
        let script = self.script.display().to_string();

        let mut tool = toml::Table::new();
        tool.insert("program".into(), "sh".into());
        tool.insert(
            "list_args".into(),
            toml::Value::Array(vec![script.clone().into(), "list".into()]),
        );
        tool.insert(
            "search_args".into(),
            toml::Value::Array(vec![script.into(), "search".into()]),
        );
        tool.insert("list_timeout_secs".into(), (timeout_secs as i64).into());
        tool.insert("search_timeout_secs".into(), (timeout_secs as i64).into());

        let mut root = toml::Table::new();
        root.insert("tool".into(), toml::Value::Table(tool));
        Ok(toml::to_string(&root)?)
    }
}
