use pkgcache_types::PackageRecord;
use regex::Regex;
use std::sync::LazyLock;

use crate::traits::{OutputParser, ParseOutcome};
use crate::{Error, Result};

// Two or more whitespace characters separate columns; a single space is part
// of a field ("App One").
static COLUMN_DELIMITER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{2,}").unwrap());

const NAME_COLUMN: &str = "name";
const ID_COLUMN: &str = "id";
const VERSION_COLUMN: &str = "version";

/// Positions of the required columns, discovered from the header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub name: usize,
    pub id: usize,
    pub version: usize,
}

impl ColumnLayout {
    /// Locate `name`, `id` and `version` in a header line (case-insensitive,
    /// exact token match). Column order does not matter.
    pub fn detect(header: &str) -> Result<Self> {
        let tokens: Vec<String> = split_columns(header)
            .map(|token| token.to_lowercase())
            .collect();
        let position = |column: &str| tokens.iter().position(|token| token == column);

        match (
            position(NAME_COLUMN),
            position(ID_COLUMN),
            position(VERSION_COLUMN),
        ) {
            (Some(name), Some(id), Some(version)) => Ok(Self { name, id, version }),
            (name, id, version) => {
                let missing = [
                    (NAME_COLUMN, name),
                    (ID_COLUMN, id),
                    (VERSION_COLUMN, version),
                ]
                .into_iter()
                .filter(|(_, found)| found.is_none())
                .map(|(column, _)| column)
                .collect();
                Err(Error::ColumnDetection { missing })
            }
        }
    }

    fn max_index(&self) -> usize {
        self.name.max(self.id).max(self.version)
    }

    /// Extract a record from one data line, or `None` for ragged lines that
    /// do not reach every required column.
    pub fn extract(&self, line: &str) -> Option<PackageRecord> {
        let tokens: Vec<&str> = split_columns(line).collect();
        if tokens.len() <= self.max_index() {
            return None;
        }

        Some(PackageRecord::new(
            tokens[self.name].trim(),
            tokens[self.id].trim(),
            tokens[self.version].trim(),
        ))
    }
}

fn split_columns(line: &str) -> impl Iterator<Item = &str> {
    COLUMN_DELIMITER.split(line.trim())
}

/// Normalize raw output into the lines that carry content.
///
/// Progress spinners are drawn with carriage returns on the same line as the
/// header; only the text after the last `\r` is what a terminal would show.
fn content_lines(raw: &str) -> Vec<&str> {
    raw.lines()
        .map(|line| line.trim_end())
        .map(|line| line.rsplit('\r').next().unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
        .collect()
}

/// Parse aligned-column output (header line followed by one package per line).
///
/// Fewer than two content lines is "no data" and yields an empty list. A
/// header without `Name`, `Id` and `Version` is a `ColumnDetection` error.
/// Records are returned in source order; duplicates are left to the store.
pub fn parse_table(raw: &str) -> Result<Vec<PackageRecord>> {
    let lines = content_lines(raw);
    if lines.len() < 2 {
        tracing::debug!(lines = lines.len(), "table output has no data rows");
        return Ok(Vec::new());
    }

    let layout = ColumnLayout::detect(lines[0])?;

    let total_rows = lines.len() - 1;
    let records: Vec<PackageRecord> = lines[1..]
        .iter()
        .filter_map(|line| layout.extract(line))
        .collect();

    tracing::debug!(
        rows = total_rows,
        parsed = records.len(),
        ragged = total_rows - records.len(),
        "parsed table output"
    );

    Ok(records)
}

/// `OutputParser` for the tool's default listing format
pub struct TableParser;

impl OutputParser for TableParser {
    fn id(&self) -> &'static str {
        "table"
    }

    fn parse(&self, raw: &str) -> ParseOutcome {
        parse_table(raw).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_layout_any_order() {
        let layout = ColumnLayout::detect("Version  Source  Id  Name").unwrap();
        assert_eq!(
            layout,
            ColumnLayout {
                name: 3,
                id: 2,
                version: 0
            }
        );
    }

    #[test]
    fn test_detect_layout_reports_missing_columns() {
        let err = ColumnLayout::detect("Name  Identifier  Version").unwrap_err();
        match err {
            Error::ColumnDetection { missing } => assert_eq!(missing, vec!["id"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_single_space_is_not_a_delimiter() {
        let layout = ColumnLayout::detect("Name  Id  Version").unwrap();
        let record = layout
            .extract("Visual Studio Code  Microsoft.VisualStudioCode  1.85.1")
            .unwrap();
        assert_eq!(record.name, "Visual Studio Code");
        assert_eq!(record.package_id, "Microsoft.VisualStudioCode");
        assert_eq!(record.version, "1.85.1");
    }

    #[test]
    fn test_ragged_line_rejected() {
        let layout = ColumnLayout::detect("Name  Id  Version").unwrap();
        assert!(layout.extract("Only Name  Pub.Only").is_none());
        assert!(layout.extract("----------------------").is_none());
    }

    #[test]
    fn test_spinner_prefix_is_discarded() {
        let lines = content_lines("   - \r   \\ \rName  Id  Version\r\nApp  Pub.App  1.0\r\n");
        assert_eq!(lines, vec!["Name  Id  Version", "App  Pub.App  1.0"]);
    }

    #[test]
    fn test_header_only_is_no_data() {
        assert!(parse_table("Name  Id  Version\n\n   \n").unwrap().is_empty());
        assert!(parse_table("").unwrap().is_empty());
    }
}
