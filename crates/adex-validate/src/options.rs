//! Validation options.

use serde::{Deserialize, Serialize};

use crate::tables::ImplementerTypes;

/// Output id scheme every request must use.
pub const DEFAULT_OUTPUT_ID_SCHEME: &str = "ATTRIBUTE:nHzX73VyNun";

/// Production endpoint exchanges must target.
pub const DEFAULT_TARGET_API_URL: &str = "https://adex.theglobalfund.org/";

/// Attribute holding the ISO3 code of the root organisation unit.
pub const DEFAULT_ISO3_ATTRIBUTE_ID: &str = "hpe7LiGDgvo";

/// How invalid version strings are handled during version comparisons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionPolicy {
    /// Log and skip the comparison.
    #[default]
    Skip,
    /// Record the raw strings as a finding.
    Report,
}

/// How indicators appearing in more than two period buckets are reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodConflictMode {
    /// One row per conflicting indicator.
    #[default]
    PerIndicator,
    /// One row per indicator and conflicting bucket pair.
    PerBucketPair,
}

/// Options for a validation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    pub output_id_scheme: String,
    /// Compared ignoring a single trailing slash.
    pub target_api_url: String,
    pub target_org_unit_id_scheme: String,
    pub target_id_scheme: String,
    pub iso3_attribute_id: String,
    /// Suffix the reference package origin must end with.
    pub package_origin_suffix: String,
    /// Marker every reference package indicator name must contain.
    pub package_indicator_marker: String,
    pub version_policy: VersionPolicy,
    pub period_conflicts: PeriodConflictMode,
    /// Implementer type allow-list. The implementer type check is skipped while empty.
    pub implementer_types: ImplementerTypes,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            output_id_scheme: DEFAULT_OUTPUT_ID_SCHEME.to_string(),
            target_api_url: DEFAULT_TARGET_API_URL.to_string(),
            target_org_unit_id_scheme: "CODE".to_string(),
            target_id_scheme: "UID".to_string(),
            iso3_attribute_id: DEFAULT_ISO3_ATTRIBUTE_ID.to_string(),
            package_origin_suffix: "globalfund.org".to_string(),
            package_indicator_marker: "GFADEX".to_string(),
            version_policy: VersionPolicy::default(),
            period_conflicts: PeriodConflictMode::default(),
            implementer_types: ImplementerTypes::default(),
        }
    }
}

impl ValidationOptions {
    #[must_use]
    pub fn with_version_policy(mut self, policy: VersionPolicy) -> Self {
        self.version_policy = policy;
        self
    }

    #[must_use]
    pub fn with_period_conflicts(mut self, mode: PeriodConflictMode) -> Self {
        self.period_conflicts = mode;
        self
    }

    #[must_use]
    pub fn with_implementer_types(mut self, types: ImplementerTypes) -> Self {
        self.implementer_types = types;
        self
    }

    /// Whether the url points at the configured production endpoint.
    pub fn is_target_api(&self, url: &str) -> bool {
        strip_trailing_slash(url) == strip_trailing_slash(&self.target_api_url)
    }
}

fn strip_trailing_slash(url: &str) -> &str {
    url.strip_suffix('/').unwrap_or(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_api_ignores_trailing_slash() {
        let options = ValidationOptions::default();
        assert!(options.is_target_api("https://adex.theglobalfund.org"));
        assert!(options.is_target_api("https://adex.theglobalfund.org/"));
        assert!(!options.is_target_api("https://uat.adex.theglobalfund.org"));
    }

    #[test]
    fn test_partial_options_use_defaults() {
        let options: ValidationOptions =
            serde_json::from_str(r#"{"version_policy": "report"}"#).unwrap();
        assert_eq!(options.version_policy, VersionPolicy::Report);
        assert_eq!(options.period_conflicts, PeriodConflictMode::PerIndicator);
        assert_eq!(options.output_id_scheme, DEFAULT_OUTPUT_ID_SCHEME);
    }
}
