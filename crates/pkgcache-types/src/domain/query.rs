use serde::{Deserialize, Serialize};
use std::fmt;

use super::record::StoredPackage;

pub const DEFAULT_PAGE_SIZE: u32 = 50;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Publisher fixed by the Microsoft preset query.
pub const MICROSOFT_PUBLISHER: &str = "Microsoft";

/// Columns a listing may be ordered by.
///
/// This is the only way a sort key reaches the store, so arbitrary client
/// input can never end up in an ORDER BY clause.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortField {
    #[default]
    Name,
    PackageId,
    Version,
}

impl SortField {
    /// Parse a client-supplied sort key. Anything outside the allow-list
    /// (including the empty string) falls back to `Name`.
    pub fn parse_or_default(value: &str) -> Self {
        match value.trim() {
            "name" => Self::Name,
            "package_id" => Self::PackageId,
            "version" => Self::Version,
            _ => Self::default(),
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::PackageId => "package_id",
            Self::Version => "version",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Substring filters applied to the package table. `None` means "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageFilter {
    /// Matches `name` OR `package_id`.
    pub text: Option<String>,
    /// Matches `package_id` only (publisher is the identifier prefix).
    pub publisher: Option<String>,
}

impl PackageFilter {
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.publisher.is_none()
    }
}

/// A read request against the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageQuery {
    pub query: String,
    pub publisher: String,
    pub sort: SortField,
    page: u32,
    page_size: u32,
}

impl Default for PackageQuery {
    fn default() -> Self {
        Self {
            query: String::new(),
            publisher: String::new(),
            sort: SortField::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PackageQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset: publisher fixed to Microsoft, free-text query cleared.
    pub fn microsoft(sort: &str, page: u32, page_size: u32) -> Self {
        Self::new()
            .with_publisher(MICROSOFT_PUBLISHER)
            .sorted_by(sort)
            .with_page(page, page_size)
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_publisher(mut self, publisher: impl Into<String>) -> Self {
        self.publisher = publisher.into();
        self
    }

    pub fn sorted_by(mut self, sort: &str) -> Self {
        self.sort = SortField::parse_or_default(sort);
        self
    }

    /// Set the page window. `page` is clamped to at least 1 and `page_size`
    /// to `1..=MAX_PAGE_SIZE`.
    pub fn with_page(mut self, page: u32, page_size: u32) -> Self {
        self.page = page.max(1);
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.page_size as u64
    }

    pub fn filter(&self) -> PackageFilter {
        PackageFilter {
            text: non_empty(&self.query),
            publisher: non_empty(&self.publisher),
        }
    }

    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.page_size as u64)
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// One page of query results, serialized in the wire shape clients expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackagePage {
    #[serde(rename = "Packages")]
    pub packages: Vec<StoredPackage>,
    #[serde(rename = "Total")]
    pub total: u64,
    #[serde(rename = "CurrentPage")]
    pub current_page: u32,
    #[serde(rename = "TotalPages")]
    pub total_pages: u64,
}
