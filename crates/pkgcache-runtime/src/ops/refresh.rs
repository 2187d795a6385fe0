use pkgcache_index::Database;
use pkgcache_providers::{ParserKind, capture_raw, create_parser};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::ToolConfig;
use crate::tool::ToolInvocation;
use crate::{Error, Result};

/// Stored-record cadence for `RefreshProgress::Stored`.
pub const PROGRESS_INTERVAL: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshKind {
    /// Tabular listing of installed packages
    List,
    /// JSON catalog search; raw output is kept in the side file
    FullUpdate,
}

impl RefreshKind {
    pub fn label(self) -> &'static str {
        match self {
            RefreshKind::List => "list",
            RefreshKind::FullUpdate => "full update",
        }
    }

    fn parser_kind(self) -> ParserKind {
        match self {
            RefreshKind::List => ParserKind::Table,
            RefreshKind::FullUpdate => ParserKind::Json,
        }
    }

    fn invocation(self, tool: &ToolConfig) -> ToolInvocation {
        match self {
            RefreshKind::List => {
                ToolInvocation::new(&tool.program, tool.list_args.clone(), tool.list_timeout())
            }
            RefreshKind::FullUpdate => ToolInvocation::new(
                &tool.program,
                tool.search_args.clone(),
                tool.search_timeout(),
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub enum RefreshProgress {
    ToolStarted {
        program: String,
        timeout: Duration,
    },
    ToolFinished {
        bytes: usize,
    },
    RawCaptured {
        path: PathBuf,
    },
    Parsed {
        records: usize,
    },
    Stored {
        done: usize,
        total: usize,
    },
    Completed {
        stored: usize,
        skipped: usize,
    },
}

/// Result of a successful refresh, in the shape clients receive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshReport {
    pub success: bool,
    pub count: usize,
    pub message: String,
}

impl RefreshReport {
    fn stored(count: usize) -> Self {
        Self {
            success: true,
            count,
            message: format!("{} packages stored/updated", count),
        }
    }
}

pub struct RefreshService<'a> {
    db: &'a Database,
    tool: &'a ToolConfig,
    raw_output: PathBuf,
}

impl<'a> RefreshService<'a> {
    pub fn new(db: &'a Database, tool: &'a ToolConfig, raw_output: impl Into<PathBuf>) -> Self {
        Self {
            db,
            tool,
            raw_output: raw_output.into(),
        }
    }

    /// Run the tool once, parse its output and upsert every complete record.
    ///
    /// Nothing is written to the store unless at least one record was
    /// parsed. For `FullUpdate` the raw output reaches the side file before
    /// parsing, so a payload that fails to parse can still be inspected.
    pub fn run<F>(&self, kind: RefreshKind, mut on_progress: F) -> Result<RefreshReport>
    where
        F: FnMut(RefreshProgress),
    {
        let invocation = kind.invocation(self.tool);
        on_progress(RefreshProgress::ToolStarted {
            program: invocation.program.clone(),
            timeout: invocation.timeout,
        });

        let output = invocation.run()?;
        on_progress(RefreshProgress::ToolFinished {
            bytes: output.stdout.len(),
        });

        if kind == RefreshKind::FullUpdate {
            capture_raw(&self.raw_output, &output.stdout)?;
            on_progress(RefreshProgress::RawCaptured {
                path: self.raw_output.clone(),
            });
        }

        if output.stdout.trim().is_empty() {
            return Err(Error::NoData {
                reason: "package manager produced no output".to_string(),
            });
        }

        let parser = create_parser(kind.parser_kind());
        let outcome = parser.parse(&output.stdout);
        tracing::info!(
            parser = parser.id(),
            records = outcome.records.len(),
            "parsed {} output",
            kind.label()
        );

        if outcome.is_empty() {
            let reason = match outcome.issue {
                Some(issue) => issue.to_string(),
                None => "no package records found in output".to_string(),
            };
            return Err(Error::NoData { reason });
        }

        on_progress(RefreshProgress::Parsed {
            records: outcome.records.len(),
        });

        let summary = self.db.upsert_packages(&outcome.records, |done, total| {
            if done % PROGRESS_INTERVAL == 0 || done == total {
                on_progress(RefreshProgress::Stored { done, total });
            }
        })?;

        if summary.stored == 0 {
            return Err(Error::NoData {
                reason: format!(
                    "all {} parsed records were missing a name, id or version",
                    summary.skipped
                ),
            });
        }

        on_progress(RefreshProgress::Completed {
            stored: summary.stored,
            skipped: summary.skipped,
        });

        Ok(RefreshReport::stored(summary.stored))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_message() {
        let report = RefreshReport::stored(42);
        assert!(report.success);
        assert_eq!(report.count, 42);
        assert_eq!(report.message, "42 packages stored/updated");
    }

    #[test]
    fn test_kind_selects_args_and_timeout() {
        let tool = ToolConfig::default();

        let list = RefreshKind::List.invocation(&tool);
        assert_eq!(list.args, tool.list_args);
        assert_eq!(list.timeout, Duration::from_secs(60));

        let full = RefreshKind::FullUpdate.invocation(&tool);
        assert_eq!(full.args, tool.search_args);
        assert_eq!(full.timeout, Duration::from_secs(600));
    }

    #[test]
    fn test_missing_tool_surfaces_not_found() {
        let db = Database::open_in_memory().unwrap();
        let tool = ToolConfig {
            program: "pkgcache-no-such-program-xyz".to_string(),
            ..ToolConfig::default()
        };
        let service = RefreshService::new(&db, &tool, "unused.json");

        let err = service.run(RefreshKind::List, |_| {}).unwrap_err();
        assert!(matches!(
            err,
            Error::Tool(crate::tool::ToolError::NotFound { .. })
        ));
    }
}
