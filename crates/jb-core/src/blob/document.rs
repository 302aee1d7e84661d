use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("document is not serializable as JSON: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("stored document is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("document does not survive a JSON round trip")]
    NotRoundTrippable,
}

/// An arbitrary JSON value, opaque to the store.
///
/// The shape is intentionally unconstrained; the only requirement is that
/// the value serializes to JSON text and parses back to an equal value.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonDocument(Value);

impl JsonDocument {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Parse a document previously produced by [`JsonDocument::to_json_string`].
    pub fn from_json_str(text: &str) -> Result<Self, DocumentError> {
        serde_json::from_str(text)
            .map(Self)
            .map_err(DocumentError::Parse)
    }

    pub fn to_json_string(&self) -> Result<String, DocumentError> {
        serde_json::to_string(&self.0).map_err(DocumentError::Serialize)
    }

    /// Serialize, parse back and compare. Returns the serialized text on success.
    pub fn verify_round_trip(&self) -> Result<String, DocumentError> {
        let text = self.to_json_string()?;
        let parsed: Value = serde_json::from_str(&text).map_err(DocumentError::Parse)?;

        if parsed != self.0 {
            return Err(DocumentError::NotRoundTrippable);
        }

        Ok(text)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for JsonDocument {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_round_trip_keeps_nested_values() {
        let doc = JsonDocument::new(json!({
            "a": 1,
            "b": [1, 2, 3],
            "c": {"d": null, "e": "x", "f": 1.5e-7, "g": -0.0}
        }));

        let text = doc.verify_round_trip().unwrap();
        let back = JsonDocument::from_json_str(&text).unwrap();

        assert_eq!(back, doc);
    }

    #[test]
    fn test_scalars_are_valid_documents() {
        for value in [json!(0), json!(false), json!(""), json!("text"), json!(u64::MAX)] {
            assert!(JsonDocument::new(value).verify_round_trip().is_ok());
        }
    }

    #[test]
    fn test_high_precision_floats_survive_round_trip() {
        for text in [
            r#"{"p": 0.93339300997433963}"#,
            "8922838799831460e0",
            "[0.97334747394148494, 0.95756684853331558]",
        ] {
            let doc = JsonDocument::from_json_str(text).unwrap();
            let written = doc.verify_round_trip().unwrap();

            assert_eq!(JsonDocument::from_json_str(&written).unwrap(), doc, "{text}");
        }
    }

    #[test]
    fn test_from_json_str_rejects_garbage() {
        assert!(matches!(
            JsonDocument::from_json_str("{not json"),
            Err(DocumentError::Parse(_))
        ));
    }
}
