//! End-to-end refresh flows driving a fake package manager.
#![cfg(unix)]

use pkgcache_testing::assertions::{assert_failure_mentions, assert_refresh_count};
use pkgcache_testing::{FakeTool, SampleFiles, TestWorld};

#[test]
fn test_index_refresh_stores_listing() {
    let samples = SampleFiles::new();
    let tool = FakeTool::new().with_list_output(samples.list_output().unwrap());
    let world = TestWorld::new().with_tool(tool);

    let result = world.run_json(&["index", "refresh"]).unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());
    assert_refresh_count(&result.json().unwrap(), 5).unwrap();
}

#[test]
fn test_index_refresh_is_idempotent() {
    let samples = SampleFiles::new();
    let tool = FakeTool::new().with_list_output(samples.list_output().unwrap());
    let world = TestWorld::new().with_tool(tool);

    world.run_json(&["index", "refresh"]).unwrap();
    world.run_json(&["index", "refresh"]).unwrap();

    let page = world.run_json(&["package", "list"]).unwrap().json().unwrap();
    assert_eq!(page["Total"], 5);
}

#[test]
fn test_index_update_writes_side_file() {
    let samples = SampleFiles::new();
    let payload = samples.search_sources().unwrap();
    let world = TestWorld::new().with_tool(FakeTool::new().with_search_output(payload.clone()));

    let result = world.run_json(&["index", "update"]).unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());
    assert_refresh_count(&result.json().unwrap(), 4).unwrap();

    assert_eq!(std::fs::read_to_string(world.raw_output_path()).unwrap(), payload);
}

#[test]
fn test_index_update_malformed_json_keeps_side_file() {
    let world = TestWorld::new().with_tool(FakeTool::new().with_search_output("{\"sources\": ["));

    let result = world.run_json(&["index", "update"]).unwrap();
    assert_eq!(result.code(), Some(1));
    assert_failure_mentions(&result.json().unwrap(), "No packages parsed").unwrap();

    assert_eq!(
        std::fs::read_to_string(world.raw_output_path()).unwrap(),
        "{\"sources\": ["
    );
}

#[test]
fn test_tool_failure_is_reported() {
    let world = TestWorld::new().with_tool(FakeTool::new().failing(3, "source unavailable"));

    let result = world.run_json(&["index", "refresh"]).unwrap();
    assert_eq!(result.code(), Some(1));
    assert_failure_mentions(&result.json().unwrap(), "source unavailable").unwrap();
}

#[test]
fn test_tool_timeout_is_reported() {
    let world = TestWorld::new().with_tool_timeout(FakeTool::new().with_delay(5), 1);

    let result = world.run_json(&["index", "refresh"]).unwrap();
    assert_eq!(result.code(), Some(1));
    assert_failure_mentions(&result.json().unwrap(), "timed out").unwrap();
}

#[test]
fn test_plain_refresh_prints_progress_and_summary() {
    let samples = SampleFiles::new();
    let tool = FakeTool::new().with_list_output(samples.list_output().unwrap());
    let world = TestWorld::new().with_tool(tool);

    let result = world.run(&["index", "refresh"]).unwrap();
    assert!(result.success());
    assert!(result.stdout().contains("Running sh"));
    assert!(result.stdout().contains("Parsed 5 packages"));
    assert!(result.stdout().trim_end().ends_with("5 packages stored/updated"));
}
