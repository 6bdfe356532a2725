//! Error types for provider fetches and record normalization.
//!
//! Every failure is terminal for the call that raised it; nothing here is retried.

use thiserror::Error;

/// Errors raised while fetching or normalizing market data.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Provider answered with a status other than 200.
    #[error("provider error: {status_code} - {body}")]
    Provider {
        /// HTTP status code.
        status_code: u16,
        /// Raw response body.
        body: String,
    },

    /// Provider answered 200 but the expected field was absent or empty.
    #[error("empty result: no {key} returned")]
    EmptyResult {
        /// The top-level key (or dotted path) that was expected.
        key: String,
    },

    /// A record lacked a required field during normalization.
    #[error("schema error: record {index} has missing or malformed `{path}`")]
    Schema {
        /// Position of the offending record in the input batch.
        index: usize,
        /// Dotted path of the missing or malformed field.
        path: String,
    },

    /// Transport failure before a status code was received.
    #[error("network error: {0}")]
    Network(String),

    /// Response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Agent state did not carry a required input.
    #[error("missing input: {0}")]
    MissingInput(String),
}

impl FeedError {
    /// Creates a provider error from status code and body.
    pub fn provider(status_code: u16, body: impl Into<String>) -> Self {
        Self::Provider {
            status_code,
            body: body.into(),
        }
    }

    /// Creates an empty-result error for the given key.
    pub fn empty_result(key: impl Into<String>) -> Self {
        Self::EmptyResult { key: key.into() }
    }

    /// Creates a schema error for the record at `index`.
    pub fn schema(index: usize, path: impl Into<String>) -> Self {
        Self::Schema {
            index,
            path: path.into(),
        }
    }

    /// Returns the HTTP status code for provider errors.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Provider { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Result type alias for feed operations.
pub type Result<T> = std::result::Result<T, FeedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_carries_status_and_body() {
        let err = FeedError::provider(500, "internal server error");
        assert_eq!(err.status_code(), Some(500));
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("internal server error"));
    }

    #[test]
    fn test_empty_result_names_key() {
        let err = FeedError::empty_result("prices");
        assert!(matches!(err, FeedError::EmptyResult { ref key } if key == "prices"));
        assert_eq!(err.to_string(), "empty result: no prices returned");
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn test_schema_error_names_record_and_path() {
        let err = FeedError::schema(2, "quote.USD.open");
        let display = err.to_string();
        assert!(display.contains("record 2"));
        assert!(display.contains("quote.USD.open"));
    }

    #[test]
    fn test_json_error_maps_to_decode() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: FeedError = json_err.into();
        assert!(matches!(err, FeedError::Decode(_)));
    }
}
