//! Testing infrastructure for pkgcache integration tests.
//!
//! This crate provides utilities for writing robust integration tests:
//! - `TestWorld`: isolated data directory plus CLI execution
//! - `fixtures`: sample tool output and a scriptable fake package manager
//! - `assertions`: checks over the CLI's JSON responses

pub mod assertions;
pub mod fixtures;
pub mod world;

pub use fixtures::{FakeTool, InstalledTool, SampleFiles};
pub use world::{CliResult, TestWorld};
