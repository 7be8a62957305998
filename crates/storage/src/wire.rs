//! The native wire value model: what a document store hands back through a
//! [`crate::StoreHandle`].
//!
//! Mirrors the BSON kind set one-to-one. Two wire kinds, `MinKey` and
//! `MaxKey`, have no canonical projection at all; the codec rejects them
//! with an `UnsupportedKind` error rather than inventing one.

use rust_decimal::Decimal;

/// A document as it travels over the wire: an ordered list of named values.
pub type WireDocument = Vec<(String, WireValue)>;

/// A single native store value.
#[derive(Debug, Clone, PartialEq)]
pub enum WireValue {
    Double(f64),
    String(String),
    Document(WireDocument),
    Array(Vec<WireValue>),
    Binary(Vec<u8>),
    Undefined,
    ObjectId([u8; 12]),
    Boolean(bool),
    /// Epoch milliseconds, UTC.
    DateTime(i64),
    Null,
    Regex {
        pattern: String,
        options: String,
    },
    DbPointer {
        namespace: String,
        object_id: [u8; 12],
    },
    JavaScript(String),
    Symbol(String),
    JavaScriptWithScope {
        code: String,
        scope: WireDocument,
    },
    Int32(i32),
    Timestamp(u64),
    Int64(i64),
    Decimal128(Decimal),
    MinKey,
    MaxKey,
}

impl WireValue {
    /// The wire-protocol token for this value's kind, used in diagnostics.
    pub fn kind_token(&self) -> &'static str {
        match self {
            WireValue::Double(_) => "DOUBLE",
            WireValue::String(_) => "STRING",
            WireValue::Document(_) => "DOCUMENT",
            WireValue::Array(_) => "ARRAY",
            WireValue::Binary(_) => "BINARY",
            WireValue::Undefined => "UNDEFINED",
            WireValue::ObjectId(_) => "OBJECT_ID",
            WireValue::Boolean(_) => "BOOLEAN",
            WireValue::DateTime(_) => "DATE_TIME",
            WireValue::Null => "NULL",
            WireValue::Regex { .. } => "REGULAR_EXPRESSION",
            WireValue::DbPointer { .. } => "DB_POINTER",
            WireValue::JavaScript(_) => "JAVASCRIPT",
            WireValue::Symbol(_) => "SYMBOL",
            WireValue::JavaScriptWithScope { .. } => "JAVASCRIPT_WITH_SCOPE",
            WireValue::Int32(_) => "INT32",
            WireValue::Timestamp(_) => "TIMESTAMP",
            WireValue::Int64(_) => "INT64",
            WireValue::Decimal128(_) => "DECIMAL128",
            WireValue::MinKey => "MIN_KEY",
            WireValue::MaxKey => "MAX_KEY",
        }
    }
}
