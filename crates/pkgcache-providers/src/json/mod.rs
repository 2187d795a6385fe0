mod schema;

use pkgcache_types::PackageRecord;
use serde_json::Value;

use self::schema::{DataEntry, SourcePackage, decode_entry};
use crate::Result;
use crate::traits::{OutputParser, ParseOutcome};

/// Top-level layout of a JSON catalog, checked in declaration order.
#[derive(Debug)]
pub enum CatalogShape {
    /// `{"sources": [{"packages": [{name, id|packageIdentifier, version}]}]}`
    Sources(Vec<Vec<Value>>),
    /// `{"data": [{Name, Id|PackageIdentifier, Version}]}`
    Data(Vec<Value>),
    /// Valid JSON with nothing to import
    Unrecognized,
}

impl CatalogShape {
    pub fn decode(document: Value) -> Self {
        let Value::Object(mut root) = document else {
            return Self::Unrecognized;
        };

        if let Some(Value::Array(sources)) = root.remove("sources") {
            let packages = sources
                .into_iter()
                .map(|source| match source {
                    Value::Object(mut source) => match source.remove("packages") {
                        Some(Value::Array(packages)) => packages,
                        _ => Vec::new(),
                    },
                    _ => Vec::new(),
                })
                .collect();
            return Self::Sources(packages);
        }

        if let Some(Value::Array(data)) = root.remove("data") {
            return Self::Data(data);
        }

        Self::Unrecognized
    }

    /// Flatten into records, one per nested package entry.
    pub fn into_records(self) -> Vec<PackageRecord> {
        match self {
            Self::Sources(sources) => sources
                .into_iter()
                .flatten()
                .map(|pkg| PackageRecord::from(decode_entry::<SourcePackage>(pkg)))
                .collect(),
            Self::Data(entries) => entries
                .into_iter()
                .map(|entry| PackageRecord::from(decode_entry::<DataEntry>(entry)))
                .collect(),
            Self::Unrecognized => Vec::new(),
        }
    }
}

/// Parse JSON catalog output.
///
/// Malformed text is an error; well-formed JSON of an unknown shape is simply
/// empty. Entries with missing fields are still returned.
pub fn parse_json(raw: &str) -> Result<Vec<PackageRecord>> {
    let document: Value = serde_json::from_str(raw)?;
    let shape = CatalogShape::decode(document);

    if matches!(shape, CatalogShape::Unrecognized) {
        tracing::warn!("JSON output has neither a 'sources' nor a 'data' array");
    }

    let records = shape.into_records();
    tracing::debug!(parsed = records.len(), "parsed JSON output");
    Ok(records)
}

/// `OutputParser` for the tool's JSON search output
pub struct JsonParser;

impl OutputParser for JsonParser {
    fn id(&self) -> &'static str {
        "json"
    }

    fn parse(&self, raw: &str) -> ParseOutcome {
        parse_json(raw).into()
    }
}
