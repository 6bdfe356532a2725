//! Upstream record shapes.

use alpha_feed_core::{FeedError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One upstream JSON object, before normalization.
pub type RawRecord = Map<String, Value>;

/// The upstream layouts the normalizer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawRecordShape {
    /// Flat `time, open, high, low, close, volume` records from the equities API
    Equities,
    /// `timestamp` plus values nested under `quote.USD` from the crypto API
    CryptoOhlcv,
}

impl RawRecordShape {
    /// Field the row timestamp is read from.
    #[must_use]
    pub const fn timestamp_field(self) -> &'static str {
        match self {
            Self::Equities => "time",
            Self::CryptoOhlcv => "timestamp",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equities => "equities",
            Self::CryptoOhlcv => "crypto_ohlcv",
        }
    }
}

/// Converts a list of JSON values into raw records.
///
/// # Errors
/// Returns a schema error naming the first item that is not a JSON object.
pub fn into_raw_records(values: Vec<Value>) -> Result<Vec<RawRecord>> {
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| match value {
            Value::Object(map) => Ok(map),
            _ => Err(FeedError::schema(index, "<object>")),
        })
        .collect()
}
