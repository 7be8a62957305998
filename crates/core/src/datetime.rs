//! The fixed dataset timestamp format: `yyyy-MM-dd'T'HH:mm:ss.SSS'Z'`,
//! always UTC, millisecond precision.

use time::format_description::FormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::error::DocUnitError;

/// Human-readable spelling of the format, used in diagnostics.
pub const DATE_FORMAT_LABEL: &str = "yyyy-MM-dd'T'HH:mm:ss.SSS'Z'";

const DATE_FORMAT: &[FormatItem<'_>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
);

/// Parse a fixed-format UTC timestamp string into epoch milliseconds.
pub fn parse_epoch_millis(value: &str) -> Result<i64, DocUnitError> {
    let parsed = PrimitiveDateTime::parse(value, DATE_FORMAT).map_err(|_| {
        DocUnitError::TypeConversion(format!(
            "date value was not in the supported format of {DATE_FORMAT_LABEL}; \
             tried to parse '{value}'"
        ))
    })?;
    let nanos = parsed.assume_utc().unix_timestamp_nanos();
    Ok((nanos / 1_000_000) as i64)
}

/// Format epoch milliseconds as a fixed-format UTC timestamp string.
pub fn format_epoch_millis(millis: i64) -> Result<String, DocUnitError> {
    let instant = OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000)
        .map_err(|_| {
            DocUnitError::TypeConversion(format!(
                "epoch millisecond value '{millis}' is out of the representable date range"
            ))
        })?;
    instant.format(DATE_FORMAT).map_err(|e| {
        DocUnitError::TypeConversion(format!("failed to format date value '{millis}': {e}"))
    })
}
