//! The canonical value model shared by parsing, extraction, seeding, and
//! matching.
//!
//! A dataset is an ordered list of named collections; a collection is an
//! ordered list of documents; a document maps field names to [`TypedValue`]s.
//! A typed value couples a canonical raw value with an optional explicit
//! [`ValueKind`] and, on the expected side of an assertion only, an optional
//! comparison [`Operator`].

use std::fmt;

use indexmap::IndexMap;
use rust_decimal::Decimal;

use crate::error::DocUnitError;

// ──────────────────────────────────────────────
// ValueKind
// ──────────────────────────────────────────────

/// The closed set of richer wire kinds a value may be tagged with.
///
/// Exactly these 19 kinds are supported. Marker fields name them by their
/// wire-protocol token (`$$OBJECT_ID`, `$$DATE_TIME`, ...); anything else
/// encountered on the wire or in a marker token is an unrecoverable
/// `UnsupportedKind` error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValueKind {
    Array,
    Document,
    Double,
    String,
    Binary,
    ObjectId,
    Boolean,
    DateTime,
    Null,
    Undefined,
    RegularExpression,
    DbPointer,
    JavaScript,
    JavaScriptWithScope,
    Symbol,
    Int32,
    Timestamp,
    Int64,
    Decimal128,
}

impl ValueKind {
    /// Every supported kind, in wire-protocol declaration order.
    pub const ALL: [ValueKind; 19] = [
        ValueKind::Array,
        ValueKind::Document,
        ValueKind::Double,
        ValueKind::String,
        ValueKind::Binary,
        ValueKind::ObjectId,
        ValueKind::Boolean,
        ValueKind::DateTime,
        ValueKind::Null,
        ValueKind::Undefined,
        ValueKind::RegularExpression,
        ValueKind::DbPointer,
        ValueKind::JavaScript,
        ValueKind::JavaScriptWithScope,
        ValueKind::Symbol,
        ValueKind::Int32,
        ValueKind::Timestamp,
        ValueKind::Int64,
        ValueKind::Decimal128,
    ];

    /// The token used after the marker prefix in dataset JSON.
    pub fn token(self) -> &'static str {
        match self {
            ValueKind::Array => "ARRAY",
            ValueKind::Document => "DOCUMENT",
            ValueKind::Double => "DOUBLE",
            ValueKind::String => "STRING",
            ValueKind::Binary => "BINARY",
            ValueKind::ObjectId => "OBJECT_ID",
            ValueKind::Boolean => "BOOLEAN",
            ValueKind::DateTime => "DATE_TIME",
            ValueKind::Null => "NULL",
            ValueKind::Undefined => "UNDEFINED",
            ValueKind::RegularExpression => "REGULAR_EXPRESSION",
            ValueKind::DbPointer => "DB_POINTER",
            ValueKind::JavaScript => "JAVASCRIPT",
            ValueKind::JavaScriptWithScope => "JAVASCRIPT_WITH_SCOPE",
            ValueKind::Symbol => "SYMBOL",
            ValueKind::Int32 => "INT32",
            ValueKind::Timestamp => "TIMESTAMP",
            ValueKind::Int64 => "INT64",
            ValueKind::Decimal128 => "DECIMAL128",
        }
    }

    /// Exact-match lookup of a kind by its token. Returns `None` for any
    /// other spelling; callers decide whether that is an error.
    pub fn parse(token: &str) -> Option<ValueKind> {
        ValueKind::ALL.iter().copied().find(|k| k.token() == token)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

// ──────────────────────────────────────────────
// Operator
// ──────────────────────────────────────────────

/// Comparison operator carried by an expected value. Defaults to `Equal`
/// when the descriptor omits the `comparator` field.
///
/// Relational operators read expected-first: `LessThan` asserts
/// expected < actual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Operator {
    #[default]
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
}

impl Operator {
    pub fn token(self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::NotEqual => "!=",
            Operator::LessThan => "<",
            Operator::LessThanOrEqual => "<=",
            Operator::GreaterThan => ">",
            Operator::GreaterThanOrEqual => ">=",
        }
    }

    /// Parse an operator token. An unknown token is a caller configuration
    /// mistake, surfaced as a `Comparator` error.
    pub fn parse(token: &str) -> Result<Operator, DocUnitError> {
        match token {
            "=" => Ok(Operator::Equal),
            "!=" => Ok(Operator::NotEqual),
            "<" => Ok(Operator::LessThan),
            "<=" => Ok(Operator::LessThanOrEqual),
            ">" => Ok(Operator::GreaterThan),
            ">=" => Ok(Operator::GreaterThanOrEqual),
            other => Err(DocUnitError::Comparator(format!(
                "comparator value of '{other}' is not supported"
            ))),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

// ──────────────────────────────────────────────
// RawValue / TypedValue
// ──────────────────────────────────────────────

/// The canonical, kind-agnostic representation of a single value.
///
/// Richer wire kinds project into these shapes at extraction time (object
/// ids become hex strings, binary becomes base64, dates become epoch-millis
/// integers or fixed-format strings, and so on).
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    Decimal(Decimal),
    String(String),
    Array(Vec<TypedValue>),
    Document(Document),
}

impl RawValue {
    pub fn is_null(&self) -> bool {
        matches!(self, RawValue::Null)
    }

    /// Short shape name for diagnostics.
    pub fn shape_name(&self) -> &'static str {
        match self {
            RawValue::Null => "null",
            RawValue::Bool(_) => "boolean",
            RawValue::Int(_) => "integer",
            RawValue::Double(_) => "double",
            RawValue::Decimal(_) => "decimal",
            RawValue::String(_) => "string",
            RawValue::Array(_) => "array",
            RawValue::Document(_) => "document",
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Null => f.write_str("null"),
            RawValue::Bool(b) => write!(f, "{b}"),
            RawValue::Int(i) => write!(f, "{i}"),
            RawValue::Double(d) => write!(f, "{d}"),
            RawValue::Decimal(d) => write!(f, "{d}"),
            RawValue::String(s) => f.write_str(s),
            RawValue::Array(values) => {
                f.write_str("[")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", v.raw)?;
                }
                f.write_str("]")
            }
            RawValue::Document(doc) => write!(f, "{doc}"),
        }
    }
}

/// A canonical value optionally tagged with an explicit kind and, on the
/// expected side of an assertion, a comparison operator.
///
/// `kind = None` means untyped: shape is inferred (document, array, scalar)
/// and no explicit-kind check happens during matching. The comparator is
/// ignored on actual values.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedValue {
    pub kind: Option<ValueKind>,
    pub raw: RawValue,
    pub comparator: Option<Operator>,
}

impl TypedValue {
    /// An untyped value with no comparator.
    pub fn untyped(raw: RawValue) -> Self {
        TypedValue {
            kind: None,
            raw,
            comparator: None,
        }
    }

    /// A value with an explicit kind tag and no comparator.
    pub fn of_kind(kind: ValueKind, raw: RawValue) -> Self {
        TypedValue {
            kind: Some(kind),
            raw,
            comparator: None,
        }
    }

    pub fn with_comparator(mut self, comparator: Operator) -> Self {
        self.comparator = Some(comparator);
        self
    }
}

// ──────────────────────────────────────────────
// Document / Collection / Dataset
// ──────────────────────────────────────────────

/// An ordered field-name → value map.
///
/// Field order is preserved for serialization round trips but is not
/// significant for matching; matching is by field name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    fields: IndexMap<String, TypedValue>,
}

impl Document {
    pub fn new() -> Self {
        Document::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: TypedValue) {
        self.fields.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&TypedValue> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &TypedValue)> {
        self.fields.iter()
    }
}

impl FromIterator<(String, TypedValue)> for Document {
    fn from_iter<I: IntoIterator<Item = (String, TypedValue)>>(iter: I) -> Self {
        Document {
            fields: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}: {}", value.raw)?;
        }
        f.write_str("}")
    }
}

/// A named, ordered list of documents.
///
/// Document order IS significant for matching: the i-th expected document is
/// compared against the i-th actual document. There is no key-based identity
/// matching.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    pub name: String,
    pub documents: Vec<Document>,
}

impl Collection {
    pub fn new(name: impl Into<String>) -> Self {
        Collection {
            name: name.into(),
            documents: Vec::new(),
        }
    }
}

/// An ordered list of collections. Collection names are unique only after
/// passing through [`crate::combine`].
pub type Dataset = Vec<Collection>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_token_round_trip() {
        for kind in ValueKind::ALL {
            assert_eq!(ValueKind::parse(kind.token()), Some(kind));
        }
    }

    #[test]
    fn kind_parse_is_exact_match() {
        assert_eq!(ValueKind::parse("object_id"), None);
        assert_eq!(ValueKind::parse("OBJECTID"), None);
        assert_eq!(ValueKind::parse(""), None);
        assert_eq!(ValueKind::parse("MIN_KEY"), None);
    }

    #[test]
    fn operator_tokens() {
        assert_eq!(Operator::parse("=").unwrap(), Operator::Equal);
        assert_eq!(Operator::parse(">=").unwrap(), Operator::GreaterThanOrEqual);
        assert_eq!(Operator::default(), Operator::Equal);
    }

    #[test]
    fn operator_unknown_token_is_comparator_error() {
        match Operator::parse("~") {
            Err(DocUnitError::Comparator(m)) => {
                assert!(m.contains("'~'"), "message should cite the token: {m}");
            }
            other => panic!("expected Comparator error, got {:?}", other),
        }
    }

    #[test]
    fn document_preserves_insertion_order() {
        let mut doc = Document::new();
        doc.insert("z", TypedValue::untyped(RawValue::Int(1)));
        doc.insert("a", TypedValue::untyped(RawValue::Int(2)));
        doc.insert("m", TypedValue::untyped(RawValue::Int(3)));
        let names: Vec<&String> = doc.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["z", "a", "m"]);
    }

    #[test]
    fn raw_value_display() {
        let mut doc = Document::new();
        doc.insert("age", TypedValue::untyped(RawValue::Int(5)));
        let value = RawValue::Array(vec![
            TypedValue::untyped(RawValue::String("x".to_string())),
            TypedValue::untyped(RawValue::Document(doc)),
        ]);
        assert_eq!(value.to_string(), "[x, {age: 5}]");
    }
}
