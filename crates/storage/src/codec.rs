//! The store codec: extraction (wire to canonical) and reconstruction
//! (canonical to wire).
//!
//! Extraction projects every wire kind onto a canonical raw shape and tags
//! the result with the detected kind. The projection is deliberately lossy
//! for a few kinds: regex options and JavaScript scopes are dropped, and
//! `Undefined` collapses onto canonical null. Reconstruction inverts the
//! table for values carrying an explicit kind and passes untyped values
//! through by shape.

use std::str::FromStr;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use rust_decimal::Decimal;

use docunit_core::datetime::parse_epoch_millis;
use docunit_core::{Document, DocUnitError, RawValue, TypedValue, ValueKind};

use crate::wire::{WireDocument, WireValue};

/// Field names of the canonical projection of a DbPointer.
const DB_POINTER_NAMESPACE: &str = "namespace";
const DB_POINTER_OBJECT_ID: &str = "objectId";

// ──────────────────────────────────────────────
// Extraction: wire → canonical
// ──────────────────────────────────────────────

/// Convert a wire document into a canonical document. Field-level failures
/// come back qualified with the field name.
pub fn extract_document(doc: &WireDocument) -> Result<Document, DocUnitError> {
    doc.iter()
        .map(|(name, value)| {
            let extracted = extract_value(value)
                .map_err(|e| e.context(format!("Field name '{name}'")))?;
            Ok((name.clone(), extracted))
        })
        .collect()
}

/// Convert a single wire value into a canonical typed value. The result
/// always carries the detected kind.
pub fn extract_value(value: &WireValue) -> Result<TypedValue, DocUnitError> {
    let raw = match value {
        WireValue::Double(d) => RawValue::Double(*d),
        WireValue::String(s) => RawValue::String(s.clone()),
        WireValue::Document(doc) => RawValue::Document(extract_document(doc)?),
        WireValue::Array(items) => RawValue::Array(
            items.iter().map(extract_value).collect::<Result<_, _>>()?,
        ),
        WireValue::Binary(bytes) => RawValue::String(BASE64.encode(bytes)),
        WireValue::Undefined | WireValue::Null => RawValue::Null,
        WireValue::ObjectId(bytes) => RawValue::String(hex_string(bytes)),
        WireValue::Boolean(b) => RawValue::Bool(*b),
        WireValue::DateTime(millis) => RawValue::Int(*millis),
        WireValue::Regex { pattern, .. } => RawValue::String(pattern.clone()),
        WireValue::DbPointer {
            namespace,
            object_id,
        } => {
            let mut doc = Document::new();
            doc.insert(
                DB_POINTER_NAMESPACE,
                TypedValue::untyped(RawValue::String(namespace.clone())),
            );
            doc.insert(
                DB_POINTER_OBJECT_ID,
                TypedValue::untyped(RawValue::String(hex_string(object_id))),
            );
            RawValue::Document(doc)
        }
        WireValue::JavaScript(code) => RawValue::String(code.clone()),
        WireValue::Symbol(s) => RawValue::String(s.clone()),
        WireValue::JavaScriptWithScope { code, .. } => RawValue::String(code.clone()),
        WireValue::Int32(i) => RawValue::Int(i64::from(*i)),
        WireValue::Timestamp(t) => RawValue::Int(*t as i64),
        WireValue::Int64(i) => RawValue::Int(*i),
        WireValue::Decimal128(d) => RawValue::Decimal(*d),
        WireValue::MinKey | WireValue::MaxKey => {
            return Err(DocUnitError::unsupported_kind(value.kind_token()));
        }
    };
    Ok(TypedValue::of_kind(detected_kind(value), raw))
}

fn detected_kind(value: &WireValue) -> ValueKind {
    match value {
        WireValue::Double(_) => ValueKind::Double,
        WireValue::String(_) => ValueKind::String,
        WireValue::Document(_) => ValueKind::Document,
        WireValue::Array(_) => ValueKind::Array,
        WireValue::Binary(_) => ValueKind::Binary,
        WireValue::Undefined => ValueKind::Undefined,
        WireValue::ObjectId(_) => ValueKind::ObjectId,
        WireValue::Boolean(_) => ValueKind::Boolean,
        WireValue::DateTime(_) => ValueKind::DateTime,
        WireValue::Null => ValueKind::Null,
        WireValue::Regex { .. } => ValueKind::RegularExpression,
        WireValue::DbPointer { .. } => ValueKind::DbPointer,
        WireValue::JavaScript(_) => ValueKind::JavaScript,
        WireValue::Symbol(_) => ValueKind::Symbol,
        WireValue::JavaScriptWithScope { .. } => ValueKind::JavaScriptWithScope,
        WireValue::Int32(_) => ValueKind::Int32,
        WireValue::Timestamp(_) => ValueKind::Timestamp,
        WireValue::Int64(_) => ValueKind::Int64,
        WireValue::Decimal128(_) => ValueKind::Decimal128,
        // Callers reject these before asking for a kind.
        WireValue::MinKey | WireValue::MaxKey => ValueKind::Null,
    }
}

fn hex_string(bytes: &[u8; 12]) -> String {
    let mut out = String::with_capacity(24);
    for byte in bytes {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

// ──────────────────────────────────────────────
// Reconstruction: canonical → wire
// ──────────────────────────────────────────────

/// Convert a canonical document into a wire document for insertion.
pub fn reconstruct_document(doc: &Document) -> Result<WireDocument, DocUnitError> {
    doc.iter()
        .map(|(name, value)| {
            let wire = reconstruct_value(value)
                .map_err(|e| e.context(format!("Field name '{name}'")))?;
            Ok((name.clone(), wire))
        })
        .collect()
}

/// Convert a canonical typed value into a wire value.
///
/// An explicit kind demands exactly that wire kind and fails with
/// `TypeConversion` when the raw shape cannot supply it. Untyped values map
/// by shape, with integers widening to `Int64`.
pub fn reconstruct_value(value: &TypedValue) -> Result<WireValue, DocUnitError> {
    let Some(kind) = value.kind else {
        return reconstruct_untyped(&value.raw);
    };

    match kind {
        ValueKind::Array => match &value.raw {
            RawValue::Array(items) => Ok(WireValue::Array(
                items.iter().map(reconstruct_value).collect::<Result<_, _>>()?,
            )),
            other => Err(shape_error(kind, other)),
        },
        ValueKind::Document => match &value.raw {
            RawValue::Document(doc) => Ok(WireValue::Document(reconstruct_document(doc)?)),
            other => Err(shape_error(kind, other)),
        },
        ValueKind::Double => match &value.raw {
            RawValue::Double(d) => Ok(WireValue::Double(*d)),
            RawValue::Int(i) => Ok(WireValue::Double(*i as f64)),
            other => Err(shape_error(kind, other)),
        },
        ValueKind::String => match &value.raw {
            RawValue::String(s) => Ok(WireValue::String(s.clone())),
            other => Err(shape_error(kind, other)),
        },
        ValueKind::Binary => match &value.raw {
            RawValue::String(s) => BASE64.decode(s).map(WireValue::Binary).map_err(|_| {
                DocUnitError::TypeConversion(format!(
                    "BINARY value '{s}' is not valid base64"
                ))
            }),
            other => Err(shape_error(kind, other)),
        },
        ValueKind::ObjectId => match &value.raw {
            RawValue::String(s) => Ok(WireValue::ObjectId(parse_hex(s)?)),
            other => Err(shape_error(kind, other)),
        },
        ValueKind::Boolean => match &value.raw {
            RawValue::Bool(b) => Ok(WireValue::Boolean(*b)),
            other => Err(shape_error(kind, other)),
        },
        ValueKind::DateTime => match &value.raw {
            RawValue::String(s) => Ok(WireValue::DateTime(parse_epoch_millis(s)?)),
            other => Err(shape_error(kind, other)),
        },
        ValueKind::Null => Ok(WireValue::Null),
        ValueKind::Undefined => Ok(WireValue::Undefined),
        ValueKind::RegularExpression => match &value.raw {
            RawValue::String(s) => Ok(WireValue::Regex {
                pattern: s.clone(),
                options: String::new(),
            }),
            other => Err(shape_error(kind, other)),
        },
        ValueKind::DbPointer => match &value.raw {
            RawValue::Document(doc) => reconstruct_db_pointer(doc),
            other => Err(shape_error(kind, other)),
        },
        ValueKind::JavaScript => match &value.raw {
            RawValue::String(s) => Ok(WireValue::JavaScript(s.clone())),
            other => Err(shape_error(kind, other)),
        },
        // Scope was dropped at extraction; reconstruct with an empty one.
        ValueKind::JavaScriptWithScope => match &value.raw {
            RawValue::String(s) => Ok(WireValue::JavaScriptWithScope {
                code: s.clone(),
                scope: Vec::new(),
            }),
            other => Err(shape_error(kind, other)),
        },
        ValueKind::Symbol => match &value.raw {
            RawValue::String(s) => Ok(WireValue::Symbol(s.clone())),
            other => Err(shape_error(kind, other)),
        },
        ValueKind::Int32 => match &value.raw {
            RawValue::Int(i) => i32::try_from(*i).map(WireValue::Int32).map_err(|_| {
                DocUnitError::TypeConversion(format!(
                    "value '{i}' does not fit into an INT32"
                ))
            }),
            other => Err(shape_error(kind, other)),
        },
        ValueKind::Timestamp => match &value.raw {
            RawValue::Int(i) => u64::try_from(*i).map(WireValue::Timestamp).map_err(|_| {
                DocUnitError::TypeConversion(format!(
                    "TIMESTAMP value '{i}' must not be negative"
                ))
            }),
            other => Err(shape_error(kind, other)),
        },
        ValueKind::Int64 => match &value.raw {
            RawValue::Int(i) => Ok(WireValue::Int64(*i)),
            other => Err(shape_error(kind, other)),
        },
        ValueKind::Decimal128 => reconstruct_decimal(&value.raw).map(WireValue::Decimal128),
    }
}

fn reconstruct_untyped(raw: &RawValue) -> Result<WireValue, DocUnitError> {
    match raw {
        RawValue::Null => Ok(WireValue::Null),
        RawValue::Bool(b) => Ok(WireValue::Boolean(*b)),
        RawValue::Int(i) => Ok(WireValue::Int64(*i)),
        RawValue::Double(d) => Ok(WireValue::Double(*d)),
        RawValue::Decimal(d) => Ok(WireValue::Decimal128(*d)),
        RawValue::String(s) => Ok(WireValue::String(s.clone())),
        RawValue::Array(items) => Ok(WireValue::Array(
            items.iter().map(reconstruct_value).collect::<Result<_, _>>()?,
        )),
        RawValue::Document(doc) => Ok(WireValue::Document(reconstruct_document(doc)?)),
    }
}

fn reconstruct_db_pointer(doc: &Document) -> Result<WireValue, DocUnitError> {
    let namespace = match doc.get(DB_POINTER_NAMESPACE).map(|v| &v.raw) {
        Some(RawValue::String(s)) => s.clone(),
        _ => {
            return Err(DocUnitError::TypeConversion(format!(
                "DB_POINTER value must be a document with a string '{DB_POINTER_NAMESPACE}' field"
            )));
        }
    };
    let object_id = match doc.get(DB_POINTER_OBJECT_ID).map(|v| &v.raw) {
        Some(RawValue::String(s)) => parse_hex(s)?,
        _ => {
            return Err(DocUnitError::TypeConversion(format!(
                "DB_POINTER value must be a document with a string '{DB_POINTER_OBJECT_ID}' field"
            )));
        }
    };
    Ok(WireValue::DbPointer {
        namespace,
        object_id,
    })
}

// The string constructor keeps the value exact; going through f64 would not.
fn reconstruct_decimal(raw: &RawValue) -> Result<Decimal, DocUnitError> {
    let text = match raw {
        RawValue::Decimal(d) => return Ok(*d),
        RawValue::Int(i) => i.to_string(),
        RawValue::Double(d) => d.to_string(),
        RawValue::String(s) => s.clone(),
        other => return Err(shape_error(ValueKind::Decimal128, other)),
    };
    Decimal::from_str(&text).map_err(|_| {
        DocUnitError::TypeConversion(format!(
            "value '{text}' cannot be interpreted as a DECIMAL128"
        ))
    })
}

fn parse_hex(text: &str) -> Result<[u8; 12], DocUnitError> {
    let bad = || {
        DocUnitError::TypeConversion(format!(
            "value '{text}' is not a 24-character hex object id"
        ))
    };
    // from_str_radix tolerates a leading '+', so digits are checked first.
    if text.len() != 24 || !text.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(bad());
    }
    let mut bytes = [0u8; 12];
    for (i, chunk) in text.as_bytes().chunks(2).enumerate() {
        let pair = std::str::from_utf8(chunk).map_err(|_| bad())?;
        bytes[i] = u8::from_str_radix(pair, 16).map_err(|_| bad())?;
    }
    Ok(bytes)
}

fn shape_error(kind: ValueKind, raw: &RawValue) -> DocUnitError {
    DocUnitError::TypeConversion(format!(
        "a {} raw value cannot be converted to kind '{kind}'",
        raw.shape_name()
    ))
}
