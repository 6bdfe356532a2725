//! Request plumbing shared by every provider client.
//!
//! One request, one status check, one key extraction. A status other than
//! 200 is a provider error carrying the body; a 200 whose expected key is
//! absent or empty is an empty-result error.

use alpha_feed_core::{FeedError, Result};
use alpha_feed_data::{into_raw_records, RawRecord};
use reqwest::{Client, Response, StatusCode};
use serde_json::{Map, Value};
use std::time::Duration;

/// Builds the HTTP client used by a provider.
///
/// # Errors
/// Returns error if the TLS backend cannot be initialised.
pub(crate) fn build_http(timeout_secs: u64) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| FeedError::Network(format!("failed to build HTTP client: {e}")))
}

/// Maps a transport error onto the feed taxonomy.
pub(crate) fn network_error(err: reqwest::Error) -> FeedError {
    if err.is_timeout() {
        FeedError::Network(format!("request timeout: {err}"))
    } else if err.is_connect() {
        FeedError::Network(format!("connection failed: {err}"))
    } else if err.is_decode() {
        FeedError::Decode(err.to_string())
    } else {
        FeedError::Network(err.to_string())
    }
}

/// Checks the status and decodes the body as JSON.
///
/// # Errors
/// Returns [`FeedError::Provider`] for any status other than 200 and
/// [`FeedError::Decode`] if the body is not JSON.
pub(crate) async fn read_json(response: Response) -> Result<Value> {
    let status = response.status();

    if status != StatusCode::OK {
        let body = response.text().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), "provider returned non-200 status");
        return Err(FeedError::provider(status.as_u16(), body));
    }

    let text = response.text().await.map_err(network_error)?;
    Ok(serde_json::from_str(&text)?)
}

/// Returns true for values a loose truthiness check treats as "nothing".
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Extracts the non-empty array found at `path`.
///
/// # Errors
/// Returns [`FeedError::EmptyResult`] if the path is absent or its value is
/// empty, and [`FeedError::Decode`] if it holds something other than an array.
pub fn extract_array(body: Value, path: &[&str]) -> Result<Vec<Value>> {
    let key = path.join(".");
    match take_at(body, path) {
        Some(Value::Array(items)) if !items.is_empty() => Ok(items),
        Some(value) if !is_blank(&value) => Err(FeedError::Decode(format!(
            "expected an array under `{key}`"
        ))),
        _ => {
            tracing::warn!("No {} returned by provider", key);
            Err(FeedError::empty_result(key))
        }
    }
}

/// Extracts the non-empty array at `path` as raw records.
///
/// # Errors
/// As [`extract_array`], plus a schema error for non-object items.
pub fn extract_records(body: Value, path: &[&str]) -> Result<Vec<RawRecord>> {
    into_raw_records(extract_array(body, path)?)
}

/// Extracts the non-empty object found at `path`.
///
/// # Errors
/// Returns [`FeedError::EmptyResult`] if the path is absent or its value is
/// empty, and [`FeedError::Decode`] if it holds something other than an object.
pub fn extract_object(body: Value, path: &[&str]) -> Result<Map<String, Value>> {
    let key = path.join(".");
    match take_at(body, path) {
        Some(Value::Object(map)) if !map.is_empty() => Ok(map),
        Some(value) if !is_blank(&value) => Err(FeedError::Decode(format!(
            "expected an object under `{key}`"
        ))),
        _ => {
            tracing::warn!("No {} returned by provider", key);
            Err(FeedError::empty_result(key))
        }
    }
}

/// Removes and returns the value at `path`, if every parent is an object.
fn take_at(mut body: Value, path: &[&str]) -> Option<Value> {
    let (last, parents) = path.split_last()?;
    let parent = parents
        .iter()
        .try_fold(&mut body, |value, key| value.get_mut(*key))?;
    parent.as_object_mut()?.remove(*last)
}
