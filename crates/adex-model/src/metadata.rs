//! Supporting metadata used for report headers and formula annotation.

use serde::{Deserialize, Serialize};

/// Platform system information.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemInfo {
    #[serde(default)]
    pub context_path: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub revision: Option<String>,
}

/// A data element/category option combo pair, addressed as `de.coc`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataElementOperand {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub short_name: Option<String>,
    pub dimension_item: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataElement {
    pub id: String,
    #[serde(default)]
    pub short_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSet {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}
