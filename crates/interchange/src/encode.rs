//! Encoding the canonical value model back into dataset JSON.
//!
//! Used by extraction/export: a value whose kind is in the config's
//! preserve set is wrapped as a typed-value descriptor; every other value is
//! emitted as its plain projected scalar/container, and its kind tag is
//! intentionally lost on a later decode.

use serde_json::{Map, Number, Value};

use docunit_core::{
    datetime, CodecConfig, Dataset, DocUnitError, Document, RawValue, TypedValue, ValueKind,
};

/// Serialize a dataset as pretty-printed dataset JSON.
pub fn write_dataset(dataset: &Dataset, config: &CodecConfig) -> Result<String, DocUnitError> {
    let collections = dataset
        .iter()
        .map(|collection| {
            let documents = collection
                .documents
                .iter()
                .enumerate()
                .map(|(index, doc)| {
                    encode_document(doc, config)
                        .map_err(|e| e.context(format!("Document array index of '{index}'")))
                })
                .collect::<Result<Vec<Value>, DocUnitError>>()
                .map_err(|e| e.context(format!("Collection '{}'", collection.name)))?;

            let mut entry = Map::new();
            entry.insert(
                "collectionName".to_string(),
                Value::String(collection.name.clone()),
            );
            entry.insert("documents".to_string(), Value::Array(documents));
            Ok(Value::Object(entry))
        })
        .collect::<Result<Vec<Value>, DocUnitError>>()?;

    serde_json::to_string_pretty(&Value::Array(collections))
        .map_err(|e| DocUnitError::Parse(e.to_string()))
}

fn encode_document(document: &Document, config: &CodecConfig) -> Result<Value, DocUnitError> {
    let mut object = Map::new();
    for (name, value) in document.iter() {
        let encoded =
            encode_value(value, config).map_err(|e| e.context(format!("Field name '{name}'")))?;
        object.insert(name.clone(), encoded);
    }
    Ok(Value::Object(object))
}

/// Encode a single value, wrapping it as a descriptor when its kind is in
/// the preserve set.
pub(crate) fn encode_value(
    value: &TypedValue,
    config: &CodecConfig,
) -> Result<Value, DocUnitError> {
    match value.kind {
        Some(kind) if config.preserves(kind) => {
            let payload = encode_payload(kind, &value.raw, config)?;
            let mut descriptor = Map::new();
            descriptor.insert(format!("{}{}", config.marker(), kind.token()), payload);
            Ok(Value::Object(descriptor))
        }
        _ => encode_raw(&value.raw, config),
    }
}

/// Descriptor payloads are the plain raw projection, except DateTime which
/// is re-rendered as the fixed-format string when only the epoch-millis
/// projection is at hand.
fn encode_payload(
    kind: ValueKind,
    raw: &RawValue,
    config: &CodecConfig,
) -> Result<Value, DocUnitError> {
    if kind == ValueKind::DateTime {
        if let RawValue::Int(millis) = raw {
            return Ok(Value::String(datetime::format_epoch_millis(*millis)?));
        }
    }
    encode_raw(raw, config)
}

fn encode_raw(raw: &RawValue, config: &CodecConfig) -> Result<Value, DocUnitError> {
    let value = match raw {
        RawValue::Null => Value::Null,
        RawValue::Bool(b) => Value::Bool(*b),
        RawValue::Int(i) => Value::Number(Number::from(*i)),
        RawValue::Double(d) => Value::Number(Number::from_f64(*d).ok_or_else(|| {
            DocUnitError::TypeConversion(format!(
                "double value '{d}' is not representable in JSON"
            ))
        })?),
        // JSON has no lossless decimal number; emitted as its string form.
        RawValue::Decimal(d) => Value::String(d.to_string()),
        RawValue::String(s) => Value::String(s.clone()),
        RawValue::Array(values) => Value::Array(
            values
                .iter()
                .map(|v| encode_value(v, config))
                .collect::<Result<Vec<Value>, DocUnitError>>()?,
        ),
        RawValue::Document(doc) => encode_document(doc, config)?,
    };
    Ok(value)
}
