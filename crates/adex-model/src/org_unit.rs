//! Organisation units.

use serde::{Deserialize, Serialize};

/// An organisation unit; the audit only looks at the level 1 (root) unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganisationUnit {
    pub id: String,
    #[serde(default, deserialize_with = "crate::wire::null_as_default")]
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "crate::wire::null_as_default")]
    pub attribute_values: Vec<AttributeValue>,
}

impl OrganisationUnit {
    /// Value of the attribute with the given id, if assigned.
    #[must_use]
    pub fn attribute_value(&self, attribute_id: &str) -> Option<&str> {
        self.attribute_values
            .iter()
            .find(|value| value.attribute.id == attribute_id)
            .and_then(|value| value.value.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeValue {
    pub attribute: AttributeRef,
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeRef {
    pub id: String,
}
