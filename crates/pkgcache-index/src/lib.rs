// SQLite package cache
// One row per package identifier, refreshed by batch upsert

mod db;
mod error;
mod queries;
mod schema;

// Public API
pub use db::{Database, UpsertSummary};
pub use error::{Error, Result};
pub use schema::SCHEMA_VERSION;
