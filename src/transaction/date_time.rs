//! Parsing and formatting of the date-times exchanged over the API.
//!
//! Date-times are always handled in UTC with millisecond precision. They are
//! written as ISO 8601 strings such as `2024-01-01T00:00:00.000Z` and stored in
//! the database as milliseconds since the Unix epoch.

use serde::{Deserialize, Deserializer, Serializer, de, ser};
use time::{
    Date, OffsetDateTime, PrimitiveDateTime, UtcOffset,
    error::ComponentRange,
    format_description::{
        BorrowedFormatItem,
        well_known::{Iso8601, Rfc3339},
    },
    macros::format_description,
};

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

const OUTPUT_FORMAT: &[BorrowedFormatItem<'_>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
);

/// Parse a date-time string sent by a client.
///
/// Accepts, in order of preference:
/// - an RFC 3339 timestamp, e.g. `2024-01-01T12:30:00+13:00`,
/// - any other ISO 8601 date-time with an offset,
/// - an ISO 8601 date-time without an offset, which is read as UTC,
/// - a calendar date `YYYY-MM-DD`, which is read as midnight UTC.
///
/// Returns `None` if `input` is not in any of these forms.
pub fn parse_date_time(input: &str) -> Option<OffsetDateTime> {
    let input = input.trim();

    let parsed = OffsetDateTime::parse(input, &Rfc3339)
        .or_else(|_| OffsetDateTime::parse(input, &Iso8601::DEFAULT))
        .or_else(|_| {
            PrimitiveDateTime::parse(input, &Iso8601::DEFAULT).map(PrimitiveDateTime::assume_utc)
        })
        .or_else(|_| Date::parse(input, DATE_FORMAT).map(|date| date.midnight().assume_utc()))
        .ok()?;

    Some(normalize(parsed))
}

/// Convert `date_time` to UTC and drop everything below a millisecond.
pub fn normalize(date_time: OffsetDateTime) -> OffsetDateTime {
    let date_time = date_time.to_offset(UtcOffset::UTC);

    date_time
        .replace_millisecond(date_time.millisecond())
        .unwrap_or(date_time)
}

/// The number of whole milliseconds between the Unix epoch and `date_time`.
pub fn to_unix_millis(date_time: OffsetDateTime) -> i64 {
    (date_time.unix_timestamp_nanos() / 1_000_000) as i64
}

/// The UTC date-time `millis` milliseconds after the Unix epoch.
///
/// # Errors
/// Returns an error if the result lies outside the range supported by [OffsetDateTime].
pub fn from_unix_millis(millis: i64) -> Result<OffsetDateTime, ComponentRange> {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000)
}

/// Format `date_time` the way the API writes date-times, e.g. `2024-01-01T00:00:00.000Z`.
///
/// # Errors
/// Returns an error if the year cannot be written with four digits.
pub fn format_date_time(date_time: OffsetDateTime) -> Result<String, time::error::Format> {
    date_time.to_offset(UtcOffset::UTC).format(OUTPUT_FORMAT)
}

/// Serialize a date-time with [format_date_time], for use with `#[serde(with = "...")]`.
pub fn serialize<S>(date_time: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let text = format_date_time(*date_time).map_err(ser::Error::custom)?;

    serializer.serialize_str(&text)
}

/// Deserialize a date-time with [parse_date_time], for use with `#[serde(with = "...")]`.
pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;

    parse_date_time(&text)
        .ok_or_else(|| de::Error::custom(format!("\"{text}\" is not a valid date-time")))
}
