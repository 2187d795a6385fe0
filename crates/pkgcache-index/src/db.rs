use pkgcache_types::{PackageFilter, PackageRecord, SortField, StoredPackage};
use rusqlite::Connection;
use std::path::Path;

use crate::{Result, queries, schema};

/// Outcome of one batch upsert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpsertSummary {
    /// Rows inserted or replaced.
    pub stored: usize,
    /// Incomplete records that were discarded.
    pub skipped: usize,
}

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path)?;
        schema::init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::init_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Insert or replace one package by identifier. Returns `false` (and
    /// writes nothing) when the record is incomplete.
    pub fn upsert_package(&self, record: &PackageRecord) -> Result<bool> {
        if !record.is_complete() {
            return Ok(false);
        }

        queries::package::upsert(&self.conn, record, &now())?;
        Ok(true)
    }

    /// Upsert a batch in input order inside one transaction.
    ///
    /// Incomplete records are skipped and counted. On error the transaction
    /// is rolled back, so rows committed by earlier batches are untouched.
    /// `on_progress` receives `(processed, total)` after every record.
    pub fn upsert_packages<F>(
        &self,
        records: &[PackageRecord],
        mut on_progress: F,
    ) -> Result<UpsertSummary>
    where
        F: FnMut(usize, usize),
    {
        let seen_at = now();
        let total = records.len();
        let mut summary = UpsertSummary::default();

        let tx = self.conn.unchecked_transaction()?;
        for (i, record) in records.iter().enumerate() {
            if record.is_complete() {
                queries::package::upsert(&tx, record, &seen_at)?;
                summary.stored += 1;
            } else {
                tracing::debug!(
                    package_id = %record.package_id,
                    name = %record.name,
                    "skipping incomplete record"
                );
                summary.skipped += 1;
            }
            on_progress(i + 1, total);
        }
        tx.commit()?;

        tracing::info!(
            stored = summary.stored,
            skipped = summary.skipped,
            "committed package batch"
        );
        Ok(summary)
    }

    pub fn get_package(&self, package_id: &str) -> Result<Option<StoredPackage>> {
        queries::package::get_by_id(&self.conn, package_id)
    }

    pub fn count_packages(&self, filter: &PackageFilter) -> Result<u64> {
        queries::package::count(&self.conn, filter)
    }

    pub fn list_packages(
        &self,
        filter: &PackageFilter,
        sort: SortField,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<StoredPackage>> {
        queries::package::list(&self.conn, filter, sort, limit, offset)
    }

    pub fn vacuum(&self) -> Result<()> {
        self.conn.execute("VACUUM", [])?;
        Ok(())
    }
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}
