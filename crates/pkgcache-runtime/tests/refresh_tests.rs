//! Refresh and query flows against a scripted package manager.
#![cfg(unix)]

use pkgcache_index::Database;
use pkgcache_runtime::{
    Error, QueryService, RefreshKind, RefreshProgress, RefreshReport, RefreshService, ToolConfig,
    ToolError,
};
use pkgcache_testing::{FakeTool, SampleFiles};
use pkgcache_types::PackageQuery;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Harness {
    _temp: TempDir,
    tool: ToolConfig,
    raw_output: PathBuf,
    db: Database,
}

impl Harness {
    fn new(fake: FakeTool) -> Self {
        Self::with_timeout(fake, 10)
    }

    fn with_timeout(fake: FakeTool, timeout_secs: u64) -> Self {
        let temp = TempDir::new().unwrap();
        let installed = fake.install(&temp.path().join("tool")).unwrap();
        let tool = tool_config(&installed.script, timeout_secs);
        let raw_output = temp.path().join("data").join("raw_output.json");
        let db = Database::open(&temp.path().join("data").join("packages.db")).unwrap();

        Self {
            _temp: temp,
            tool,
            raw_output,
            db,
        }
    }

    fn refresh(&self, kind: RefreshKind) -> pkgcache_runtime::Result<RefreshReport> {
        RefreshService::new(&self.db, &self.tool, &self.raw_output).run(kind, |_| {})
    }
}

fn tool_config(script: &Path, timeout_secs: u64) -> ToolConfig {
    let script = script.display().to_string();
    ToolConfig {
        program: "sh".to_string(),
        list_args: vec![script.clone(), "list".to_string()],
        search_args: vec![script, "search".to_string()],
        list_timeout_secs: timeout_secs,
        search_timeout_secs: timeout_secs,
    }
}

#[test]
fn test_list_refresh_stores_parsed_table() {
    let samples = SampleFiles::new();
    let harness = Harness::new(FakeTool::new().with_list_output(samples.list_output().unwrap()));

    let report = harness.refresh(RefreshKind::List).unwrap();
    assert!(report.success);
    assert_eq!(report.count, 5);
    assert_eq!(report.message, "5 packages stored/updated");

    let edge = harness.db.get_package("Microsoft.Edge").unwrap().unwrap();
    assert_eq!(edge.version, "120.0.2210.91");

    // The tabular refresh never touches the side file
    assert!(!harness.raw_output.exists());
}

#[test]
fn test_list_refresh_emits_progress_in_order() {
    let harness = Harness::new(
        FakeTool::new().with_list_output("Name  Id  Version\nApp One  Pub.App  1.0\n"),
    );

    let mut events = Vec::new();
    RefreshService::new(&harness.db, &harness.tool, &harness.raw_output)
        .run(RefreshKind::List, |event| events.push(event))
        .unwrap();

    assert!(
        matches!(events[0], RefreshProgress::ToolStarted { ref program, .. } if program == "sh")
    );
    assert!(matches!(events[1], RefreshProgress::ToolFinished { .. }));
    assert!(matches!(events[2], RefreshProgress::Parsed { records: 1 }));
    assert!(matches!(events[3], RefreshProgress::Stored { done: 1, total: 1 }));
    assert!(matches!(
        events[4],
        RefreshProgress::Completed {
            stored: 1,
            skipped: 0
        }
    ));
    assert_eq!(events.len(), 5);
}

#[test]
fn test_store_progress_every_fifty_records() {
    let mut table = String::from("Name  Id  Version\n");
    for i in 0..120 {
        table.push_str(&format!("App {i}  Pub.App{i}  1.0\n"));
    }
    let harness = Harness::new(FakeTool::new().with_list_output(table));

    let mut stored = Vec::new();
    RefreshService::new(&harness.db, &harness.tool, &harness.raw_output)
        .run(RefreshKind::List, |event| {
            if let RefreshProgress::Stored { done, .. } = event {
                stored.push(done);
            }
        })
        .unwrap();

    assert_eq!(stored, vec![50, 100, 120]);
}

#[test]
fn test_full_update_captures_side_file_and_skips_incomplete() {
    let samples = SampleFiles::new();
    let payload = samples.search_sources().unwrap();
    let harness = Harness::new(FakeTool::new().with_search_output(payload.clone()));

    let report = harness.refresh(RefreshKind::FullUpdate).unwrap();

    // Half.Entry has no version and is not stored
    assert_eq!(report.count, 4);
    assert!(harness.db.get_package("Half.Entry").unwrap().is_none());
    assert!(harness.db.get_package("Git.Git").unwrap().is_some());
    assert_eq!(std::fs::read_to_string(&harness.raw_output).unwrap(), payload);
}

#[test]
fn test_full_update_data_shape() {
    let samples = SampleFiles::new();
    let harness = Harness::new(FakeTool::new().with_search_output(samples.search_data().unwrap()));

    let report = harness.refresh(RefreshKind::FullUpdate).unwrap();
    assert_eq!(report.count, 3);
    assert!(harness.db.get_package("Python.Python.3.12").unwrap().is_some());
}

#[test]
fn test_malformed_json_still_writes_side_file() {
    let harness = Harness::new(FakeTool::new().with_search_output("{\"data\": [oops"));

    let err = harness.refresh(RefreshKind::FullUpdate).unwrap_err();
    match err {
        Error::NoData { reason } => assert!(reason.contains("Malformed JSON")),
        other => panic!("unexpected error: {other:?}"),
    }

    assert_eq!(
        std::fs::read_to_string(&harness.raw_output).unwrap(),
        "{\"data\": [oops"
    );
}

#[test]
fn test_unrecognized_header_is_no_data() {
    let harness = Harness::new(
        FakeTool::new().with_list_output("Nom  Identifiant  Version\nApp  Pub.App  1.0\n"),
    );

    let err = harness.refresh(RefreshKind::List).unwrap_err();
    match err {
        Error::NoData { reason } => assert!(reason.contains("missing name, id")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_empty_output_is_no_data() {
    let harness = Harness::new(FakeTool::new());

    let err = harness.refresh(RefreshKind::List).unwrap_err();
    assert!(matches!(err, Error::NoData { .. }));
    assert_eq!(harness.db.count_packages(&Default::default()).unwrap(), 0);
}

#[test]
fn test_nonzero_exit_is_tool_failure() {
    let samples = SampleFiles::new();
    let harness = Harness::new(
        FakeTool::new()
            .with_list_output(samples.list_output().unwrap())
            .failing(2, "agreements not accepted"),
    );

    let err = harness.refresh(RefreshKind::List).unwrap_err();
    match err {
        Error::Tool(ToolError::Failed { status, stderr }) => {
            assert_eq!(status, Some(2));
            assert!(stderr.contains("agreements not accepted"));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    // Nothing is stored from a failed run
    assert!(harness.db.get_package("Microsoft.Edge").unwrap().is_none());
}

#[test]
fn test_slow_tool_times_out() {
    let harness = Harness::with_timeout(FakeTool::new().with_delay(5), 1);

    let err = harness.refresh(RefreshKind::List).unwrap_err();
    assert!(matches!(err, Error::Tool(ToolError::Timeout { .. })));
}

#[test]
fn test_refresh_then_paginate() {
    let mut table = String::from("Name  Id  Version\n");
    for i in 0..23 {
        table.push_str(&format!("App {i:02}  Pub.App{i:02}  1.0\n"));
    }
    let harness = Harness::new(FakeTool::new().with_list_output(table));
    harness.refresh(RefreshKind::List).unwrap();

    let service = QueryService::new(&harness.db);
    let mut seen = Vec::new();
    for page in 1..=3 {
        let result = service
            .run(&PackageQuery::new().sorted_by("package_id").with_page(page, 10))
            .unwrap();
        assert_eq!(result.total, 23);
        assert_eq!(result.total_pages, 3);
        seen.extend(result.packages.into_iter().map(|p| p.package_id));
    }

    // Pages are disjoint and together cover every row in order
    let expected: Vec<String> = (0..23).map(|i| format!("Pub.App{i:02}")).collect();
    assert_eq!(seen, expected);
}

#[test]
fn test_microsoft_preset_matches_explicit_publisher() {
    let samples = SampleFiles::new();
    let harness = Harness::new(FakeTool::new().with_list_output(samples.list_output().unwrap()));
    harness.refresh(RefreshKind::List).unwrap();

    let service = QueryService::new(&harness.db);
    let preset = service.microsoft("evil_column", 1, 50).unwrap();
    let explicit = service
        .run(&PackageQuery::new().with_publisher("Microsoft").sorted_by("name"))
        .unwrap();

    assert_eq!(preset, explicit);
    assert_eq!(preset.total, 3);
}

#[test]
fn test_second_refresh_replaces_versions() {
    let temp = TempDir::new().unwrap();
    let db = Database::open(&temp.path().join("packages.db")).unwrap();
    let raw_output = temp.path().join("raw_output.json");

    let first = FakeTool::new()
        .with_list_output("Name  Id  Version\nX  Pub.X  1.0\n")
        .install(&temp.path().join("v1"))
        .unwrap();
    let second = FakeTool::new()
        .with_list_output("Name  Id  Version\nX  Pub.X  1.1\n")
        .install(&temp.path().join("v2"))
        .unwrap();

    let tool = tool_config(&first.script, 10);
    RefreshService::new(&db, &tool, &raw_output)
        .run(RefreshKind::List, |_| {})
        .unwrap();

    let tool = tool_config(&second.script, 10);
    RefreshService::new(&db, &tool, &raw_output)
        .run(RefreshKind::List, |_| {})
        .unwrap();

    assert_eq!(db.count_packages(&Default::default()).unwrap(), 1);
    assert_eq!(db.get_package("Pub.X").unwrap().unwrap().version, "1.1");
}
