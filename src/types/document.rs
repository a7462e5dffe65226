//! Generic document shape shared by every record store

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One document from a store collection: its id plus schemaless fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Raw field value by name
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// First present field among `keys`, rendered as display text.
    /// Returns `None` when none of the keys exist or the value is null.
    pub fn text(&self, keys: &[&str]) -> Option<String> {
        keys.iter()
            .filter_map(|k| self.fields.get(*k))
            .find(|v| !v.is_null())
            .map(display_value)
    }

    /// Like [`Document::text`] but missing fields render as an empty string
    pub fn text_or_empty(&self, keys: &[&str]) -> String {
        self.text(keys).unwrap_or_default()
    }

    /// Numeric field, accepting numbers and numeric strings (prices are often stored as text)
    pub fn amount(&self, key: &str) -> Option<f64> {
        match self.fields.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Timestamp field stored either as RFC 3339 text or as `{seconds, nanoseconds}`
    pub fn timestamp(&self, key: &str) -> Option<DateTime<Utc>> {
        match self.fields.get(key)? {
            Value::String(s) => DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            Value::Object(obj) => {
                let seconds = obj
                    .get("seconds")
                    .or_else(|| obj.get("_seconds"))?
                    .as_i64()?;
                let nanos = obj
                    .get("nanoseconds")
                    .or_else(|| obj.get("_nanoseconds"))
                    .and_then(Value::as_u64)
                    .unwrap_or(0);
                Utc.timestamp_opt(seconds, nanos as u32).single()
            }
            _ => None,
        }
    }
}

/// Render a JSON value the way a table cell shows it
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_id_is_split_from_fields() {
        let d = doc(json!({"id": "s1", "supplierName": "Acme"}));
        assert_eq!(d.id, "s1");
        assert_eq!(d.fields.len(), 1);
        assert!(d.get("id").is_none());
    }

    #[test]
    fn test_text_prefers_first_present_key() {
        let d = doc(json!({"id": "r1", "BusinessName": "Upper", "businessName": "lower"}));
        assert_eq!(d.text(&["businessName", "BusinessName"]).unwrap(), "lower");
        assert_eq!(d.text(&["missing", "BusinessName"]).unwrap(), "Upper");
        assert!(d.text(&["missing"]).is_none());
    }

    #[test]
    fn test_text_skips_null_and_renders_numbers() {
        let d = doc(json!({"id": "x", "a": null, "b": 12}));
        assert_eq!(d.text(&["a", "b"]).unwrap(), "12");
        assert_eq!(d.text_or_empty(&["a"]), "");
    }

    #[test]
    fn test_amount_accepts_numeric_strings() {
        let d = doc(json!({"id": "p", "amountPaid": "1500.50", "servicePrice": 3000, "bad": "n/a"}));
        assert_eq!(d.amount("amountPaid"), Some(1500.5));
        assert_eq!(d.amount("servicePrice"), Some(3000.0));
        assert_eq!(d.amount("bad"), None);
    }

    #[test]
    fn test_timestamp_from_seconds_object() {
        let d = doc(json!({"id": "c", "createdAt": {"seconds": 1_700_000_000, "nanoseconds": 0}}));
        let ts = d.timestamp("createdAt").unwrap();
        assert_eq!(ts.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_timestamp_from_rfc3339() {
        let d = doc(json!({"id": "c", "timestamp": "2024-05-01T10:30:00Z"}));
        let ts = d.timestamp("timestamp").unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-05-01T10:30:00+00:00");
    }

    #[test]
    fn test_timestamp_garbage_is_none() {
        let d = doc(json!({"id": "c", "timestamp": "yesterday"}));
        assert!(d.timestamp("timestamp").is_none());
    }
}
