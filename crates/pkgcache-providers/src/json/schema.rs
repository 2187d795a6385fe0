use pkgcache_types::PackageRecord;
use serde::Deserialize;
use serde_json::Value;

/// Package entry nested under `sources[].packages[]`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SourcePackage {
    pub name: Option<Value>,
    pub id: Option<Value>,
    #[serde(rename = "packageIdentifier")]
    pub package_identifier: Option<Value>,
    pub version: Option<Value>,
}

/// Entry of a top-level `data[]` array.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct DataEntry {
    #[serde(rename = "Name")]
    pub name: Option<Value>,
    #[serde(rename = "Id")]
    pub id: Option<Value>,
    #[serde(rename = "PackageIdentifier")]
    pub package_identifier: Option<Value>,
    #[serde(rename = "Version")]
    pub version: Option<Value>,
}

/// Decode an entry leniently: anything that is not an object becomes an
/// entry with no fields rather than aborting the whole document.
pub(crate) fn decode_entry<T>(value: Value) -> T
where
    T: for<'de> Deserialize<'de> + Default,
{
    serde_json::from_value(value).unwrap_or_default()
}

impl From<SourcePackage> for PackageRecord {
    fn from(pkg: SourcePackage) -> Self {
        build_record(pkg.name, pkg.id, pkg.package_identifier, pkg.version)
    }
}

impl From<DataEntry> for PackageRecord {
    fn from(entry: DataEntry) -> Self {
        build_record(entry.name, entry.id, entry.package_identifier, entry.version)
    }
}

// Missing fields become empty strings; completeness is checked by the store.
fn build_record(
    name: Option<Value>,
    id: Option<Value>,
    package_identifier: Option<Value>,
    version: Option<Value>,
) -> PackageRecord {
    let package_id = id
        .and_then(scalar_text)
        .or_else(|| package_identifier.and_then(scalar_text));

    PackageRecord::new(
        name.and_then(scalar_text).unwrap_or_default(),
        package_id.unwrap_or_default(),
        version.and_then(scalar_text).unwrap_or_default(),
    )
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
