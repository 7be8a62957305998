//! Scalar comparison: operator application over the natural ordering of
//! canonical raw values.
//!
//! Relational operators read expected-first: `<` asserts expected < actual.
//! Null orders strictly below any non-null value; null equals null.
//! Numerics compare across Int/Double/Decimal representations. A raw-shape
//! pairing with no natural ordering (string vs integer, scalar vs
//! container) is a `Comparator` error, not a value difference.

use std::cmp::Ordering;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use docunit_core::{datetime, DocUnitError, Operator, RawValue, TypedValue, ValueKind};

use crate::matcher::MatchResult;

/// Compare two non-container values under the expected side's operator.
pub(crate) fn compare_scalars(
    expected: &TypedValue,
    actual: &TypedValue,
) -> Result<MatchResult, DocUnitError> {
    let operator = expected.comparator.unwrap_or_default();

    // A null expected value only supports equality checks; anything else is
    // a configuration mistake in the expected dataset.
    if expected.raw.is_null()
        && !matches!(operator, Operator::Equal | Operator::NotEqual)
    {
        return Err(DocUnitError::Comparator(
            "if expected value is specified as 'null', comparator must either be '=' or '!='"
                .to_string(),
        ));
    }

    // An explicitly declared expected kind must match the actual detected
    // kind exactly, regardless of operator.
    if let Some(expected_kind) = expected.kind {
        if actual.kind != Some(expected_kind) {
            let actual_kind = actual
                .kind
                .map(|k| k.token().to_string())
                .unwrap_or_else(|| "untyped".to_string());
            return Ok(MatchResult::failed(format!(
                "Expected explicitly specified kind of '{expected_kind}' but got \
                 '{actual_kind}'."
            )));
        }
    }

    let ordering = natural_ordering(expected, actual)?;
    let expected_text = display_value(expected);
    let actual_text = display_value(actual);

    let result = match operator {
        Operator::Equal => {
            if ordering == Ordering::Equal {
                MatchResult::matched("Values match.")
            } else {
                MatchResult::failed(format!("Expected '{expected_text}' but got '{actual_text}'."))
            }
        }
        Operator::NotEqual => {
            if ordering != Ordering::Equal {
                MatchResult::matched("Values are not equal as expected.")
            } else {
                MatchResult::failed(format!(
                    "Expected '{expected_text}' to be not equal to actual value but got \
                     '{actual_text}'."
                ))
            }
        }
        Operator::LessThan => {
            if ordering == Ordering::Less {
                MatchResult::matched("Expected is less than actual as expected.")
            } else {
                MatchResult::failed(format!(
                    "Expected '{expected_text}' to be less than actual but got '{actual_text}' \
                     as actual."
                ))
            }
        }
        Operator::LessThanOrEqual => {
            if ordering != Ordering::Greater {
                MatchResult::matched("Expected is less than or equal to actual as expected.")
            } else {
                MatchResult::failed(format!(
                    "Expected '{expected_text}' to be less than or equal to actual but got \
                     '{actual_text}' as actual."
                ))
            }
        }
        Operator::GreaterThan => {
            if ordering == Ordering::Greater {
                MatchResult::matched("Expected is greater than actual as expected.")
            } else {
                MatchResult::failed(format!(
                    "Expected '{expected_text}' to be greater than actual but got \
                     '{actual_text}' as actual."
                ))
            }
        }
        Operator::GreaterThanOrEqual => {
            if ordering != Ordering::Less {
                MatchResult::matched("Expected is greater than or equal to actual as expected.")
            } else {
                MatchResult::failed(format!(
                    "Expected '{expected_text}' to be greater than or equal to actual but got \
                     '{actual_text}' as actual."
                ))
            }
        }
    };

    Ok(result)
}

/// Order expected against actual. DateTime values normalize to epoch
/// milliseconds first so the string and integer projections compare
/// consistently.
fn natural_ordering(
    expected: &TypedValue,
    actual: &TypedValue,
) -> Result<Ordering, DocUnitError> {
    match (&expected.raw, &actual.raw) {
        (RawValue::Null, RawValue::Null) => return Ok(Ordering::Equal),
        (RawValue::Null, _) => return Ok(Ordering::Less),
        (_, RawValue::Null) => return Ok(Ordering::Greater),
        _ => {}
    }

    if expected.kind == Some(ValueKind::DateTime) || actual.kind == Some(ValueKind::DateTime) {
        let expected_millis = to_millis(&expected.raw)?;
        let actual_millis = to_millis(&actual.raw)?;
        return Ok(expected_millis.cmp(&actual_millis));
    }

    compare_raw(&expected.raw, &actual.raw)
}

fn to_millis(raw: &RawValue) -> Result<i64, DocUnitError> {
    match raw {
        RawValue::Int(millis) => Ok(*millis),
        RawValue::String(text) => datetime::parse_epoch_millis(text),
        other => Err(DocUnitError::Comparator(format!(
            "a DATE_TIME value must be an epoch-millisecond integer or a fixed-format date \
             string, got '{other}'"
        ))),
    }
}

fn compare_raw(expected: &RawValue, actual: &RawValue) -> Result<Ordering, DocUnitError> {
    if let (Some(left), Some(right)) = (as_numeric(expected), as_numeric(actual)) {
        return numeric_ordering(left, right);
    }

    match (expected, actual) {
        (RawValue::Bool(l), RawValue::Bool(r)) => Ok(l.cmp(r)),
        (RawValue::String(l), RawValue::String(r)) => Ok(l.cmp(r)),
        _ => Err(DocUnitError::Comparator(format!(
            "expected value of '{expected}' ({}) is not comparable with actual value of \
             '{actual}' ({})",
            expected.shape_name(),
            actual.shape_name()
        ))),
    }
}

#[derive(Clone, Copy)]
enum Numeric {
    Int(i64),
    Double(f64),
    Decimal(Decimal),
}

fn as_numeric(raw: &RawValue) -> Option<Numeric> {
    match raw {
        RawValue::Int(i) => Some(Numeric::Int(*i)),
        RawValue::Double(d) => Some(Numeric::Double(*d)),
        RawValue::Decimal(d) => Some(Numeric::Decimal(*d)),
        _ => None,
    }
}

fn numeric_ordering(left: Numeric, right: Numeric) -> Result<Ordering, DocUnitError> {
    match (left, right) {
        (Numeric::Int(l), Numeric::Int(r)) => Ok(l.cmp(&r)),
        (Numeric::Decimal(l), Numeric::Decimal(r)) => Ok(l.cmp(&r)),
        (Numeric::Decimal(l), Numeric::Int(r)) => Ok(l.cmp(&Decimal::from(r))),
        (Numeric::Int(l), Numeric::Decimal(r)) => Ok(Decimal::from(l).cmp(&r)),
        // Any Double involved: compare in f64 space.
        _ => {
            let l = to_f64(left)?;
            let r = to_f64(right)?;
            l.partial_cmp(&r).ok_or_else(|| {
                DocUnitError::Comparator(format!(
                    "cannot order non-finite double values ({l} vs {r})"
                ))
            })
        }
    }
}

fn to_f64(value: Numeric) -> Result<f64, DocUnitError> {
    match value {
        Numeric::Int(i) => Ok(i as f64),
        Numeric::Double(d) => Ok(d),
        Numeric::Decimal(d) => d.to_f64().ok_or_else(|| {
            DocUnitError::Comparator(format!("decimal value '{d}' is not representable as f64"))
        }),
    }
}

/// Render a value for a diagnostic message. DateTime millis render as the
/// fixed-format date string for readability.
fn display_value(value: &TypedValue) -> String {
    if value.kind == Some(ValueKind::DateTime) {
        if let RawValue::Int(millis) = value.raw {
            if let Ok(text) = datetime::format_epoch_millis(millis) {
                return text;
            }
        }
    }
    value.raw.to_string()
}
