use pkgcache_types::PackageRecord;

use crate::Error;

/// Turns raw tool stdout into canonical package records.
///
/// Implementations never fail: detection problems (unknown header, malformed
/// JSON) degrade to an empty record list and are reported through
/// `ParseOutcome::issue` so the caller can explain why nothing was imported.
pub trait OutputParser: Send + Sync {
    /// Unique parser ID (e.g., "table", "json")
    fn id(&self) -> &'static str;

    /// Parse the complete output of one tool invocation
    fn parse(&self, raw: &str) -> ParseOutcome;
}

/// Records extracted from one output plus the reason, if any, extraction
/// stopped early.
#[derive(Debug, Default)]
pub struct ParseOutcome {
    pub records: Vec<PackageRecord>,
    pub issue: Option<Error>,
}

impl ParseOutcome {
    pub fn records(records: Vec<PackageRecord>) -> Self {
        Self {
            records,
            issue: None,
        }
    }

    pub fn failed(issue: Error) -> Self {
        Self {
            records: Vec::new(),
            issue: Some(issue),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<E> From<std::result::Result<Vec<PackageRecord>, E>> for ParseOutcome
where
    E: Into<Error>,
{
    fn from(result: std::result::Result<Vec<PackageRecord>, E>) -> Self {
        match result {
            Ok(records) => Self::records(records),
            Err(err) => Self::failed(err.into()),
        }
    }
}

/// Output formats the tool can be asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserKind {
    /// Whitespace-aligned columns with a header line
    Table,
    /// Nested JSON catalog
    Json,
}

/// Create the parser for an output format
pub fn create_parser(kind: ParserKind) -> Box<dyn OutputParser> {
    match kind {
        ParserKind::Table => Box::new(crate::tabular::TableParser),
        ParserKind::Json => Box::new(crate::json::JsonParser),
    }
}
