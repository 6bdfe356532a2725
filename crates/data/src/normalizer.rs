//! Raw record normalization.
//!
//! Turns provider records into a [`PriceTable`]. Each [`RawRecordShape`] has
//! its own conversion function; [`normalize`] dispatches on the shape.
//!
//! ## Rules
//!
//! - Numeric fields are coerced to `f64`. Numbers pass through, numeric
//!   strings are parsed, anything else (null, bool, NaN, text) becomes `None`.
//!   A bad value never rejects the row.
//! - The timestamp must be present and parse as RFC 3339, a naive
//!   date-time, or a bare date (midnight UTC). Otherwise the whole batch
//!   fails with a schema error.
//! - Crypto quotes must carry every `quote.USD.*` key; a missing key fails
//!   the whole batch.
//! - Rows are sorted ascending by timestamp. Duplicates are kept.

use crate::models::{PriceBar, PriceTable, RawRecord, RawRecordShape};
use alpha_feed_core::{FeedError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

/// Quote currency the crypto provider is asked to convert into.
pub const QUOTE_CURRENCY: &str = "USD";

const CRYPTO_FIELDS: [&str; 6] = ["open", "high", "low", "close", "volume", "market_cap"];

/// Normalizes a batch of records of a known shape.
///
/// # Errors
/// Returns [`FeedError::Schema`] if any record lacks a required field.
pub fn normalize(shape: RawRecordShape, records: &[RawRecord]) -> Result<PriceTable> {
    let table = match shape {
        RawRecordShape::Equities => normalize_equities(records)?,
        RawRecordShape::CryptoOhlcv => normalize_crypto_ohlcv(records)?,
    };

    tracing::debug!(
        shape = shape.as_str(),
        rows = table.len(),
        "normalized raw records"
    );

    Ok(table)
}

/// Normalizes flat equities price records (`time`, `open`, `high`, `low`, `close`, `volume`).
///
/// # Errors
/// Returns [`FeedError::Schema`] if a record has no parseable `time`.
pub fn normalize_equities(records: &[RawRecord]) -> Result<PriceTable> {
    let field = RawRecordShape::Equities.timestamp_field();

    let rows = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let timestamp = record_timestamp(record, field, index)?;
            Ok(PriceBar {
                timestamp,
                open: coerce_f64(record.get("open")),
                high: coerce_f64(record.get("high")),
                low: coerce_f64(record.get("low")),
                close: coerce_f64(record.get("close")),
                volume: coerce_f64(record.get("volume")),
                market_cap: None,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(PriceTable::from_rows(rows))
}

/// Normalizes crypto OHLCV quotes with values nested under `quote.USD`.
///
/// # Errors
/// Returns [`FeedError::Schema`] if a record lacks `timestamp`, `quote`,
/// `quote.USD`, or any of the six value keys.
pub fn normalize_crypto_ohlcv(records: &[RawRecord]) -> Result<PriceTable> {
    let field = RawRecordShape::CryptoOhlcv.timestamp_field();

    let rows = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let timestamp = record_timestamp(record, field, index)?;

            let quote = record
                .get("quote")
                .and_then(Value::as_object)
                .ok_or_else(|| FeedError::schema(index, "quote"))?;
            let usd = quote
                .get(QUOTE_CURRENCY)
                .and_then(Value::as_object)
                .ok_or_else(|| FeedError::schema(index, format!("quote.{QUOTE_CURRENCY}")))?;

            let mut values = [None; CRYPTO_FIELDS.len()];
            for (slot, key) in values.iter_mut().zip(CRYPTO_FIELDS) {
                let raw = usd.get(key).ok_or_else(|| {
                    FeedError::schema(index, format!("quote.{QUOTE_CURRENCY}.{key}"))
                })?;
                *slot = coerce_f64(Some(raw));
            }
            let [open, high, low, close, volume, market_cap] = values;

            Ok(PriceBar {
                timestamp,
                open,
                high,
                low,
                close,
                volume,
                market_cap,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(PriceTable::from_rows(rows))
}

fn record_timestamp(record: &RawRecord, field: &str, index: usize) -> Result<DateTime<Utc>> {
    record
        .get(field)
        .and_then(Value::as_str)
        .and_then(parse_timestamp)
        .ok_or_else(|| FeedError::schema(index, field))
}

/// Coerces a JSON value to `f64`, mapping anything non-numeric to `None`.
#[must_use]
pub fn coerce_f64(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;

    (!parsed.is_nan()).then_some(parsed)
}

/// Parses an upstream timestamp into UTC.
///
/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM:SS[.f]`, `YYYY-MM-DD HH:MM:SS[.f]`
/// (both read as UTC), and `YYYY-MM-DD` (midnight UTC).
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
