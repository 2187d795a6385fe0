use assert_cmd::Command;
use pkgcache_testing::TestWorld;
use pkgcache_testing::assertions::{assert_failure_mentions, assert_page};
use predicates::prelude::*;

/// Test: listing an empty cache succeeds with zero pages
#[test]
fn test_empty_cache_package_list() {
    let world = TestWorld::new();

    let result = world.run_json(&["package", "list"]).unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());

    let json = result.json().unwrap();
    assert_page(&json, 0, 1, 0).unwrap();
    assert_eq!(json["Packages"].as_array().unwrap().len(), 0);
}

#[test]
fn test_empty_cache_microsoft_preset() {
    let world = TestWorld::new();

    let result = world.run_json(&["package", "microsoft"]).unwrap();
    assert!(result.success());
    assert_page(&result.json().unwrap(), 0, 1, 0).unwrap();
}

#[test]
fn test_show_missing_package_fails_with_json_envelope() {
    let world = TestWorld::new();

    let result = world
        .run_json(&["package", "show", "Nobody.Nothing"])
        .unwrap();
    assert_eq!(result.code(), Some(1));
    assert_failure_mentions(&result.json().unwrap(), "Nobody.Nothing").unwrap();
}

#[test]
#[allow(deprecated)]
fn test_plain_errors_go_to_stderr() {
    let world = TestWorld::new();
    let mut cmd = Command::cargo_bin("pkgcache").unwrap();
    world.configure_command(&mut cmd);

    cmd.args(["package", "show", "Nobody.Nothing"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::starts_with("Error: Package 'Nobody.Nothing' not found"));
}

#[test]
fn test_init_writes_default_config() {
    let world = TestWorld::new();

    let result = world.run_json(&["init"]).unwrap();
    assert!(result.success());

    let json = result.json().unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["config_written"], true);

    let config = std::fs::read_to_string(world.config_path()).unwrap();
    assert!(config.contains("program = \"winget\""));
    assert!(world.db_path().exists());

    // Second run leaves the existing config alone
    let again = world.run_json(&["init"]).unwrap().json().unwrap();
    assert_eq!(again["config_written"], false);
}

#[test]
fn test_vacuum_on_fresh_cache() {
    let world = TestWorld::new();

    let result = world.run(&["index", "vacuum"]).unwrap();
    assert!(result.success());
    assert!(result.stdout().contains("Database vacuumed"));
}

#[test]
fn test_missing_tool_reports_not_found() {
    let world = TestWorld::new().with_missing_tool();

    let result = world.run_json(&["index", "refresh"]).unwrap();
    assert_eq!(result.code(), Some(1));
    assert_failure_mentions(&result.json().unwrap(), "not found").unwrap();
}

#[test]
#[allow(deprecated)]
fn test_help_lists_namespaces() {
    Command::cargo_bin("pkgcache")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("index")
                .and(predicate::str::contains("package"))
                .and(predicate::str::contains("init")),
        );
}
