//! Conversion between Firestore typed values and plain JSON values
//!
//! Firestore's REST API wraps every field in a single-key object naming its
//! type (`{"stringValue": "x"}`, `{"integerValue": "42"}`, ...). Documents are
//! handled as plain JSON inside the crate; this module converts at the edge.
//!
//! Strings, numbers, booleans, null, maps and arrays survive a decode/encode
//! cycle. Timestamps, references, bytes and geo points do not: they decode to
//! plain strings or maps and are written back as `stringValue` or `mapValue`.

use serde_json::{json, Map, Number, Value};

use crate::types::{AdminError, Result};

/// Decode one typed Firestore value into plain JSON.
///
/// Timestamps become RFC 3339 strings, references stay as their resource
/// path, and geo points become `{latitude, longitude}`. A non-finite
/// `doubleValue` ("NaN", "Infinity") is kept as its text so numeric
/// consumers reject it instead of computing with it.
pub fn decode_value(typed: &Value) -> Result<Value> {
    let obj = typed
        .as_object()
        .ok_or_else(|| AdminError::Decode(format!("expected typed value object, got {}", typed)))?;

    let (kind, inner) = obj
        .iter()
        .next()
        .ok_or_else(|| AdminError::Decode("empty typed value".into()))?;

    match kind.as_str() {
        "nullValue" => Ok(Value::Null),
        "booleanValue" => inner
            .as_bool()
            .map(Value::Bool)
            .ok_or_else(|| AdminError::Decode(format!("bad booleanValue: {}", inner))),
        "integerValue" => {
            // int64 is transported as a decimal string
            let parsed = match inner {
                Value::String(s) => s.parse::<i64>().ok(),
                Value::Number(n) => n.as_i64(),
                _ => None,
            };
            parsed
                .map(|i| Value::Number(i.into()))
                .ok_or_else(|| AdminError::Decode(format!("bad integerValue: {}", inner)))
        }
        "doubleValue" => match inner {
            Value::Number(n) => Ok(Value::Number(n.clone())),
            Value::String(s) => Ok(Value::String(s.clone())),
            _ => Err(AdminError::Decode(format!("bad doubleValue: {}", inner))),
        },
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => inner
            .as_str()
            .map(|s| Value::String(s.to_string()))
            .ok_or_else(|| AdminError::Decode(format!("bad {}: {}", kind, inner))),
        "geoPointValue" => Ok(inner.clone()),
        "arrayValue" => {
            let values = match inner.get("values") {
                Some(Value::Array(items)) => items
                    .iter()
                    .map(decode_value)
                    .collect::<Result<Vec<_>>>()?,
                _ => Vec::new(),
            };
            Ok(Value::Array(values))
        }
        "mapValue" => Ok(Value::Object(decode_fields(inner.get("fields"))?)),
        other => Err(AdminError::Decode(format!("unsupported value type: {}", other))),
    }
}

/// Decode a document's `fields` object (absent → empty map)
pub fn decode_fields(fields: Option<&Value>) -> Result<Map<String, Value>> {
    let mut out = Map::new();
    if let Some(Value::Object(fields)) = fields {
        for (name, typed) in fields {
            out.insert(name.clone(), decode_value(typed)?);
        }
    }
    Ok(out)
}

/// Encode plain JSON into a typed Firestore value
pub fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => encode_number(n),
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            let values: Vec<Value> = items.iter().map(encode_value).collect();
            json!({ "arrayValue": { "values": values } })
        }
        Value::Object(map) => json!({ "mapValue": { "fields": encode_fields(map) } }),
    }
}

/// Encode a field map into a typed `fields` object
pub fn encode_fields(fields: &Map<String, Value>) -> Value {
    let encoded: Map<String, Value> = fields
        .iter()
        .map(|(name, value)| (name.clone(), encode_value(value)))
        .collect();
    Value::Object(encoded)
}

fn encode_number(n: &Number) -> Value {
    if let Some(i) = n.as_i64() {
        json!({ "integerValue": i.to_string() })
    } else {
        json!({ "doubleValue": n.as_f64() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_scalars() {
        assert_eq!(decode_value(&json!({"stringValue": "Acme"})).unwrap(), json!("Acme"));
        assert_eq!(decode_value(&json!({"integerValue": "5"})).unwrap(), json!(5));
        assert_eq!(decode_value(&json!({"doubleValue": 4.5})).unwrap(), json!(4.5));
        assert_eq!(decode_value(&json!({"booleanValue": true})).unwrap(), json!(true));
        assert_eq!(decode_value(&json!({"nullValue": null})).unwrap(), Value::Null);
    }

    #[test]
    fn test_decode_timestamp_as_text() {
        let v = decode_value(&json!({"timestampValue": "2024-03-01T09:00:00.123Z"})).unwrap();
        assert_eq!(v, json!("2024-03-01T09:00:00.123Z"));
    }

    #[test]
    fn test_decode_nan_double_stays_textual() {
        let v = decode_value(&json!({"doubleValue": "NaN"})).unwrap();
        assert_eq!(v, json!("NaN"));
    }

    #[test]
    fn test_decode_nested_map_and_array() {
        let typed = json!({
            "mapValue": {"fields": {
                "tags": {"arrayValue": {"values": [
                    {"stringValue": "a"}, {"integerValue": "2"}
                ]}},
                "empty": {"arrayValue": {}}
            }}
        });
        let v = decode_value(&typed).unwrap();
        assert_eq!(v, json!({"tags": ["a", 2], "empty": []}));
    }

    #[test]
    fn test_decode_rejects_bad_integer() {
        assert!(decode_value(&json!({"integerValue": "five"})).is_err());
        assert!(decode_value(&json!({"mysteryValue": 1})).is_err());
        assert!(decode_value(&json!("bare")).is_err());
    }

    #[test]
    fn test_encode_scalars() {
        assert_eq!(encode_value(&json!("Approved")), json!({"stringValue": "Approved"}));
        assert_eq!(encode_value(&json!(3)), json!({"integerValue": "3"}));
        assert_eq!(encode_value(&json!(2.5)), json!({"doubleValue": 2.5}));
        assert_eq!(encode_value(&Value::Null), json!({"nullValue": null}));
    }

    #[test]
    fn test_encode_decode_roundtrip_for_document_fields() {
        let fields = json!({
            "status": "Cancelled",
            "servicePrice": 25000,
            "rating": 4.5,
            "paid": false,
            "meta": {"tags": ["vip"]}
        });
        let Value::Object(map) = fields.clone() else {
            unreachable!()
        };
        let encoded = encode_fields(&map);
        let decoded = decode_fields(Some(&encoded)).unwrap();
        assert_eq!(Value::Object(decoded), fields);
    }

    #[test]
    fn test_timestamp_reference_geo_decode_one_way() {
        let typed = json!({
            "createdAt": {"timestampValue": "2024-03-01T09:00:00Z"},
            "owner": {"referenceValue": "projects/p/databases/(default)/documents/Clients/c1"},
            "venue": {"geoPointValue": {"latitude": 10.3, "longitude": 123.9}}
        });
        let decoded = decode_fields(Some(&typed)).unwrap();
        let encoded = encode_fields(&decoded);

        assert_eq!(
            encoded["createdAt"],
            json!({"stringValue": "2024-03-01T09:00:00Z"})
        );
        assert_eq!(
            encoded["owner"],
            json!({"stringValue": "projects/p/databases/(default)/documents/Clients/c1"})
        );
        assert_eq!(
            encoded["venue"],
            json!({"mapValue": {"fields": {
                "latitude": {"doubleValue": 10.3},
                "longitude": {"doubleValue": 123.9}
            }}})
        );
        assert_ne!(encoded, typed);
    }
}
