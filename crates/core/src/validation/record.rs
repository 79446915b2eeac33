//! The flat field map handed over by the extractor.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;

/// Field label to raw extracted text.
///
/// Values are stored as received; [`ExtractedRecord::value`] trims on read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractedRecord {
    fields: IndexMap<String, String>,
}

impl ExtractedRecord {
    /// Build a record from an extractor's JSON output.
    ///
    /// The top level must be an object. Strings are kept, numbers are kept as
    /// their decimal text, and anything else (null, booleans, arrays, nested
    /// objects) is dropped so the field reads as absent.
    pub fn from_json(value: Value) -> Result<Self, CoreError> {
        let map = match value {
            Value::Object(map) => map,
            other => {
                return Err(CoreError::MalformedRecord(format!(
                    "expected a JSON object, got {}",
                    json_type_name(&other)
                )))
            }
        };

        let fields = map
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::String(s) => Some((key, s)),
                Value::Number(n) => Some((key, n.to_string())),
                _ => None,
            })
            .collect();

        Ok(Self { fields })
    }

    /// The trimmed value for `key`, or `""` when the key is absent.
    pub fn value(&self, key: &str) -> &str {
        self.fields.get(key).map(|v| v.trim()).unwrap_or_default()
    }

    /// The untrimmed value as received.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.fields.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.fields.shift_remove(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for ExtractedRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
