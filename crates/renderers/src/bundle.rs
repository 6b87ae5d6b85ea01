//! MIME bundles: alternative representations of one output.

use rendermime_core::RenderError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// MIME type to payload, as found in a notebook output's `data` field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MimeBundle {
    entries: BTreeMap<String, String>,
}

impl MimeBundle {
    /// An empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a bundle from notebook JSON.
    ///
    /// Multi-line strings stored as arrays are joined; other non-string
    /// values (JSON MIME types) are kept as serialized JSON.
    pub fn from_json(value: &Value) -> Result<Self, RenderError> {
        let Value::Object(map) = value else {
            return Err(RenderError::Bundle(format!(
                "expected an object, found {}",
                json_kind(value)
            )));
        };
        Ok(map
            .iter()
            .map(|(mimetype, data)| (mimetype.clone(), payload(data)))
            .collect())
    }

    /// Adds or replaces a representation.
    pub fn insert(&mut self, mimetype: impl Into<String>, data: impl Into<String>) {
        self.entries.insert(mimetype.into(), data.into());
    }

    /// The payload for a MIME type.
    pub fn get(&self, mimetype: &str) -> Option<&str> {
        self.entries.get(mimetype).map(String::as_str)
    }

    /// True when the bundle has a representation of this type.
    pub fn contains(&self, mimetype: &str) -> bool {
        self.entries.contains_key(mimetype)
    }

    /// Number of representations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the bundle is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Representations, sorted by MIME type.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(m, d)| (m.as_str(), d.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MimeBundle {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn payload(data: &Value) -> String {
    match data {
        Value::String(s) => s.clone(),
        Value::Array(lines) if lines.iter().all(Value::is_string) => lines
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .concat(),
        other => other.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn joins_multiline_sources() {
        let bundle = MimeBundle::from_json(&json!({
            "text/plain": ["line one\n", "line two"],
            "text/html": "<b>x</b>",
        }))
        .unwrap();
        assert_eq!(bundle.get("text/plain"), Some("line one\nline two"));
        assert_eq!(bundle.get("text/html"), Some("<b>x</b>"));
        assert_eq!(bundle.len(), 2);
    }

    #[test]
    fn json_payloads_stay_serialized() {
        let bundle = MimeBundle::from_json(&json!({ "application/json": { "a": 1 } })).unwrap();
        assert_eq!(bundle.get("application/json"), Some(r#"{"a":1}"#));
    }

    #[test]
    fn rejects_non_objects() {
        let err = MimeBundle::from_json(&json!(["text/plain"])).unwrap_err();
        assert!(matches!(err, RenderError::Bundle(msg) if msg.contains("an array")));
    }
}
