//! Program indicators.

use serde::{Deserialize, Serialize};

use crate::exchange::Sharing;

/// Numerator sentinel marking an indicator that has not been configured.
pub const UNCONFIGURED_NUMERATOR: &str = "0";

/// A computed metric with a numerator/denominator formula.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Indicator {
    pub id: String,
    #[serde(default, deserialize_with = "crate::wire::null_as_default")]
    pub name: String,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "crate::wire::null_as_default")]
    pub numerator: String,
    #[serde(default)]
    pub denominator: Option<String>,
    #[serde(default)]
    pub decimals: Option<i64>,
    /// Implementer type reference (attribute option combo used on export).
    #[serde(default)]
    pub aggregate_export_attribute_option_combo: Option<String>,
    #[serde(default)]
    pub sharing: Option<Sharing>,
}

impl Indicator {
    /// Whether the numerator is the literal "0" sentinel, ignoring surrounding whitespace.
    #[must_use]
    pub fn is_unconfigured(&self) -> bool {
        self.numerator.trim() == UNCONFIGURED_NUMERATOR
    }

    /// The indicator code, or an empty string when absent.
    #[must_use]
    pub fn code_or_empty(&self) -> &str {
        self.code.as_deref().unwrap_or("")
    }
}
