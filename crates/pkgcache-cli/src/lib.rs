// NOTE: pkgcache Architecture
//
// The package manager is slow and has no pagination or filtering, so every
// read is served from a SQLite cache and the tool only runs on an explicit
// refresh. A refresh is a full re-scan upserted by package identifier;
// identities that disappear from the tool's output are kept.
//
// Parsers are lenient and never fail a refresh on their own: the store is the
// single place where incomplete records are rejected.

mod args;
mod commands;
pub mod context;
mod handlers;
pub mod logging;
pub mod presentation;

pub use args::{Cli, Commands, IndexCommand, LogLevel, OutputFormat, PackageCommand, PageArgs};
pub use commands::run;
