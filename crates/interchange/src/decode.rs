//! Decoding dataset JSON into the canonical value model.
//!
//! The file format is a JSON array of
//! `{ "collectionName": string, "documents": [ {...}, ... ] }` objects. Any
//! field value inside a document may be a typed-value descriptor: an object
//! with exactly one key starting with the configured marker. The marker key
//! carries the payload and names the kind (`$$INT64`), an empty token
//! (`$$`) means untyped, and an optional sibling `comparator` field names
//! the operator.

use serde_json::{Map, Value};
use tracing::error;

use docunit_core::{
    CodecConfig, Collection, Dataset, DocUnitError, Document, Operator, RawValue, TypedValue,
    ValueKind,
};

/// Parse a complete dataset from JSON text.
pub fn parse_dataset(json_text: &str, config: &CodecConfig) -> Result<Dataset, DocUnitError> {
    let root: Value = serde_json::from_str(json_text).map_err(|e| {
        error!("malformed dataset JSON: {e}");
        DocUnitError::Parse(e.to_string())
    })?;

    let collections = root.as_array().ok_or_else(|| {
        DocUnitError::Parse("dataset root must be a JSON array of collections".to_string())
    })?;

    collections
        .iter()
        .map(|entry| parse_collection(entry, config))
        .collect()
}

fn parse_collection(entry: &Value, config: &CodecConfig) -> Result<Collection, DocUnitError> {
    let object = entry.as_object().ok_or_else(|| {
        DocUnitError::Parse(format!(
            "each dataset entry must be an object with 'collectionName' and 'documents', \
             got '{entry}'"
        ))
    })?;

    let name = object
        .get("collectionName")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            DocUnitError::Parse(
                "dataset entry is missing a string 'collectionName' field".to_string(),
            )
        })?;

    let documents = object
        .get("documents")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            DocUnitError::Parse(format!(
                "collection '{name}' is missing a 'documents' array"
            ))
        })?;

    let documents = documents
        .iter()
        .enumerate()
        .map(|(index, doc)| {
            let object = doc.as_object().ok_or_else(|| {
                DocUnitError::Parse(format!("document must be a JSON object, got '{doc}'"))
            })?;
            decode_document(object, config)
                .map_err(|e| e.context(format!("Document array index of '{index}'")))
        })
        .collect::<Result<Vec<Document>, DocUnitError>>()
        .map_err(|e| e.context(format!("Collection '{name}'")))?;

    Ok(Collection {
        name: name.to_string(),
        documents,
    })
}

fn decode_document(
    object: &Map<String, Value>,
    config: &CodecConfig,
) -> Result<Document, DocUnitError> {
    object
        .iter()
        .map(|(name, value)| {
            let decoded = decode_value(value, config)
                .map_err(|e| e.context(format!("Field name '{name}'")))?;
            Ok((name.clone(), decoded))
        })
        .collect()
}

/// Decode a single JSON value into a [`TypedValue`], recognizing descriptor
/// objects.
pub(crate) fn decode_value(
    value: &Value,
    config: &CodecConfig,
) -> Result<TypedValue, DocUnitError> {
    if let Value::Object(object) = value {
        if has_marker_field(object, config) {
            return decode_descriptor(object, config);
        }
    }
    Ok(TypedValue::untyped(decode_raw(value, config)?))
}

fn has_marker_field(object: &Map<String, Value>, config: &CodecConfig) -> bool {
    object.keys().any(|k| k.starts_with(config.marker()))
}

/// Decode a descriptor object: exactly one marker-prefixed key carrying the
/// payload, plus an optional `comparator` sibling.
fn decode_descriptor(
    object: &Map<String, Value>,
    config: &CodecConfig,
) -> Result<TypedValue, DocUnitError> {
    let marker_keys: Vec<&String> = object
        .keys()
        .filter(|k| k.starts_with(config.marker()))
        .collect();

    // Ambiguous descriptors are rejected rather than picking a key.
    if marker_keys.len() > 1 {
        return Err(DocUnitError::Parse(format!(
            "descriptor document has {} marker-prefixed fields ({}), expected exactly one",
            marker_keys.len(),
            marker_keys
                .iter()
                .map(|k| format!("'{k}'"))
                .collect::<Vec<_>>()
                .join(", ")
        )));
    }

    let marker_key = marker_keys[0];
    let token = &marker_key[config.marker().len()..];
    let kind = if token.is_empty() {
        None
    } else {
        Some(
            ValueKind::parse(token)
                .ok_or_else(|| DocUnitError::unsupported_kind(token))?,
        )
    };

    let comparator = match object.get(CodecConfig::COMPARATOR_FIELD) {
        None => None,
        Some(Value::String(token)) => Some(Operator::parse(token)?),
        Some(other) => {
            return Err(DocUnitError::Parse(format!(
                "the '{}' field must be a string, got '{other}'",
                CodecConfig::COMPARATOR_FIELD
            )));
        }
    };

    let raw = decode_raw(&object[marker_key], config)?;

    Ok(TypedValue {
        kind,
        raw,
        comparator,
    })
}

/// Decode a payload structurally. Markers still apply inside container
/// payloads (through [`decode_value`]), but the payload itself is taken
/// as-is.
fn decode_raw(value: &Value, config: &CodecConfig) -> Result<RawValue, DocUnitError> {
    let raw = match value {
        Value::Null => RawValue::Null,
        Value::Bool(b) => RawValue::Bool(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                RawValue::Int(i)
            } else if let Some(d) = n.as_f64() {
                RawValue::Double(d)
            } else {
                // u64 above i64::MAX
                return Err(DocUnitError::Parse(format!(
                    "numeric value '{n}' does not fit a signed 64-bit integer"
                )));
            }
        }
        Value::String(s) => RawValue::String(s.clone()),
        Value::Array(values) => RawValue::Array(
            values
                .iter()
                .map(|v| decode_value(v, config))
                .collect::<Result<Vec<TypedValue>, DocUnitError>>()?,
        ),
        Value::Object(object) => RawValue::Document(decode_document(object, config)?),
    };
    Ok(raw)
}
