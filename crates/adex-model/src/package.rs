//! The reference metadata package stored in the platform data store.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top-level keys a reference package must carry, in reporting order.
pub const REQUIRED_PACKAGE_KEYS: [&str; 6] = [
    "package",
    "attributes",
    "indicators",
    "userGroups",
    "indicatorTypes",
    "indicatorGroups",
];

/// The externally published bundle defining the canonical program indicators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataPackage {
    #[serde(default)]
    pub package: Option<Vec<PackageInfo>>,
    #[serde(default)]
    pub attributes: Option<Vec<Value>>,
    #[serde(default)]
    pub indicators: Option<Vec<PackageIndicator>>,
    #[serde(default)]
    pub user_groups: Option<Vec<Value>>,
    #[serde(default)]
    pub indicator_types: Option<Vec<Value>>,
    #[serde(default)]
    pub indicator_groups: Option<Vec<Value>>,
}

impl MetadataPackage {
    /// Required keys absent from this package, in canonical order.
    #[must_use]
    pub fn missing_keys(&self) -> Vec<&'static str> {
        let present = [
            self.package.is_some(),
            self.attributes.is_some(),
            self.indicators.is_some(),
            self.user_groups.is_some(),
            self.indicator_types.is_some(),
            self.indicator_groups.is_some(),
        ];
        REQUIRED_PACKAGE_KEYS
            .iter()
            .zip(present)
            .filter(|(_, present)| !present)
            .map(|(key, _)| *key)
            .collect()
    }

    /// The first package descriptor, which carries version and origin.
    #[must_use]
    pub fn info(&self) -> Option<&PackageInfo> {
        self.package.as_ref().and_then(|infos| infos.first())
    }

    /// Declared package version, if any.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.info().and_then(|info| info.version.as_deref())
    }

    /// Indicator ids defined by the package.
    pub fn indicator_ids(&self) -> impl Iterator<Item = &str> {
        self.indicators
            .iter()
            .flatten()
            .map(|indicator| indicator.id.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageInfo {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub origin: Option<String>,
}

/// Indicator entry of the reference package.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageIndicator {
    pub id: String,
    #[serde(default, deserialize_with = "crate::wire::null_as_default")]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_in_canonical_order() {
        let package: MetadataPackage = serde_json::from_str(
            r#"{"package": [{"version": "1.2.3", "origin": "https://adex.theglobalfund.org"}], "indicators": []}"#,
        )
        .unwrap();
        assert_eq!(
            package.missing_keys(),
            vec!["attributes", "userGroups", "indicatorTypes", "indicatorGroups"]
        );
        assert_eq!(package.version(), Some("1.2.3"));
    }

    #[test]
    fn test_complete_package_has_no_missing_keys() {
        let package: MetadataPackage = serde_json::from_str(
            r#"{"package": [], "attributes": [], "indicators": [], "userGroups": [],
                "indicatorTypes": [], "indicatorGroups": []}"#,
        )
        .unwrap();
        assert!(package.missing_keys().is_empty());
        assert!(package.info().is_none());
    }
}
