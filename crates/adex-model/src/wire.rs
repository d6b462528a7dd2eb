//! JSON boundary helpers.
//!
//! The Web API wraps collections in an object keyed by the collection name
//! (`{"indicators": [...]}`) while offline exports are often bare arrays.
//! Both shapes are accepted.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{ModelError, Result};

/// Unwrap the raw records of a collection without parsing them.
pub fn collection_items(value: Value, key: &str) -> Result<Vec<Value>> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut object) => match object.remove(key) {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(ModelError::UnexpectedShape {
                    key: key.to_string(),
                });
            }
        },
        _ => {
            return Err(ModelError::UnexpectedShape {
                key: key.to_string(),
            });
        }
    };
    Ok(items)
}

/// Parse every record of a collection on its own.
///
/// Only the collection shape fails as a whole; each record carries its own
/// result so one malformed record does not hide the others.
pub fn collection_records<T: DeserializeOwned>(value: Value, key: &str) -> Result<Vec<Result<T>>> {
    Ok(collection_items(value, key)?
        .into_iter()
        .map(|item| serde_json::from_value(item).map_err(|e| ModelError::json(key, e)))
        .collect())
}

/// Deserialize an explicit `null` as the field type's default.
///
/// The Web API writes `null` for unset lists (`"dx": null`); the record is
/// kept and its empty value is judged by the rules.
pub fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Normalize an empty collection to the absent sentinel.
#[must_use]
pub fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() { None } else { Some(items) }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::DataSet;

    #[test]
    fn test_wrapped_collection() {
        let sets: Vec<Result<DataSet>> =
            collection_records(json!({"dataSets": [{"id": "DS1", "name": "Monthly"}]}), "dataSets").unwrap();
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].as_ref().unwrap().name.as_deref(), Some("Monthly"));
    }

    #[test]
    fn test_bare_array() {
        let items = collection_items(json!([{"id": "DS1"}, {"name": "x"}]), "dataSets").unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_wrong_key_is_shape_error() {
        let result = collection_items(json!({"pager": {}}), "dataSets");
        assert!(matches!(result, Err(ModelError::UnexpectedShape { .. })));
        let result = collection_items(json!({"dataSets": {"id": "DS1"}}), "dataSets");
        assert!(matches!(result, Err(ModelError::UnexpectedShape { .. })));
    }

    #[test]
    fn test_invalid_record_does_not_hide_others() {
        let records: Vec<Result<DataSet>> =
            collection_records(json!([{"name": "no id"}, {"id": "DS2"}]), "dataSets").unwrap();
        assert!(matches!(records[0], Err(ModelError::Json { .. })));
        assert_eq!(records[1].as_ref().unwrap().id, "DS2");
    }

    #[test]
    fn test_null_lists_read_as_empty() {
        let request: crate::Request =
            serde_json::from_str(r#"{"name": "Monthly", "dx": null, "pe": null, "ou": ["OU1"]}"#)
                .unwrap();
        assert!(request.dx.is_empty());
        assert!(request.pe.is_empty());
        assert_eq!(request.ou, vec!["OU1".to_string()]);
    }

    #[test]
    fn test_non_empty() {
        assert!(non_empty::<u8>(vec![]).is_none());
        assert_eq!(non_empty(vec![1]), Some(vec![1]));
    }
}
