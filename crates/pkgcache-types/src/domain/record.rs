use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Canonical package record produced by every output parser.
///
/// Identity is `package_id` alone: two records with the same identifier are
/// the same package even if name or version differ.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageRecord {
    /// Display name (not unique).
    pub name: String,
    /// Canonical identifier, e.g. `Microsoft.Edge`.
    pub package_id: String,
    /// Free-form version string.
    pub version: String,
}

impl PackageRecord {
    pub fn new(
        name: impl Into<String>,
        package_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            package_id: package_id.into(),
            version: version.into(),
        }
    }

    /// True when name, identifier and version are all present.
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.package_id.is_empty() && !self.version.is_empty()
    }
}

impl PartialEq for PackageRecord {
    fn eq(&self, other: &Self) -> bool {
        self.package_id == other.package_id
    }
}

impl Eq for PackageRecord {}

impl Hash for PackageRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.package_id.hash(state);
    }
}

/// Package row as persisted by the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredPackage {
    pub name: String,
    pub package_id: String,
    pub version: String,
    /// First time this identifier was stored (RFC 3339).
    pub created_at: String,
    /// Last refresh that saw this identifier (RFC 3339).
    pub updated_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_identity_is_package_id_only() {
        let a = PackageRecord::new("App", "Pub.App", "1.0");
        let b = PackageRecord::new("App (renamed)", "Pub.App", "2.0");
        let c = PackageRecord::new("App", "Pub.Other", "1.0");

        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: HashSet<_> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_is_complete() {
        assert!(PackageRecord::new("App", "Pub.App", "1.0").is_complete());
        assert!(!PackageRecord::new("", "Pub.App", "1.0").is_complete());
        assert!(!PackageRecord::new("App", "", "1.0").is_complete());
        assert!(!PackageRecord::new("App", "Pub.App", "").is_complete());
    }
}
