//! Utility functions for the HTTP client.
//!
//! - Status code classification
//! - Retry backoff calculation
//! - Response body decoding

use crate::error::{Result, TraversonError};
use crate::protocol::MediaType;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Check if status code indicates a transient server or proxy condition
pub fn is_retryable_status(status: u16) -> bool {
    matches!(status, 408 | 425 | 429 | 502 | 503 | 504)
}

/// Exponential backoff delay calculation
pub fn exponential_backoff(attempt: u32, base_ms: u64) -> Duration {
    let delay_ms = base_ms.saturating_mul(2_u64.pow(attempt.min(10)));
    Duration::from_millis(delay_ms)
}

/// Decode a response body into `T`.
///
/// Bodies are decoded as JSON. A declared content type that is not JSON
/// compatible (`application/json` or any `+json` type) is rejected up front;
/// a missing content type is attempted as JSON.
///
/// # Examples
///
/// ```
/// use traverson::client::decode_body;
/// use traverson::MediaType;
///
/// let value: serde_json::Value =
///     decode_body(br#"{"name":"Keanu"}"#, Some(&MediaType::hal_json())).unwrap();
/// assert_eq!(value["name"], "Keanu");
///
/// let err = decode_body::<serde_json::Value>(b"<p>", Some(&"text/html".parse().unwrap()));
/// assert!(err.is_err());
/// ```
pub fn decode_body<T: DeserializeOwned>(body: &[u8], content_type: Option<&MediaType>) -> Result<T> {
    if let Some(media_type) = content_type {
        if !media_type.is_json() {
            return Err(TraversonError::Decode(format!(
                "Cannot decode a '{}' body as JSON",
                media_type
            )));
        }
    }
    Ok(serde_json::from_slice(body)?)
}
