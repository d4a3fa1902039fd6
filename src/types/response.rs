//! HTTP responses as seen by the traversal engine.

use crate::error::{Result, TraversonError};
use crate::protocol::{self, MediaType};
use bytes::Bytes;
use std::collections::BTreeMap;

/// A response returned by a transport.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers (last value wins for repeated names)
    pub headers: BTreeMap<String, String>,
    /// Raw response body
    pub body: Bytes,
}

impl HttpResponse {
    /// Create a response without headers.
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        HttpResponse {
            status,
            headers: BTreeMap::new(),
            body: body.into(),
        }
    }

    /// Add or replace a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Look up a header, ignoring name case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Declared `Content-Type`, if present and parsable.
    pub fn content_type(&self) -> Option<MediaType> {
        protocol::content_type(&self.headers)
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body decoded as UTF-8.
    pub fn text(&self) -> Result<String> {
        String::from_utf8(self.body.to_vec())
            .map_err(|e| TraversonError::Decode(format!("Response body is not UTF-8: {}", e)))
    }
}

/// A decoded response body together with the response metadata.
#[derive(Clone, Debug)]
pub struct Entity<T> {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: BTreeMap<String, String>,
    /// Decoded body
    pub body: T,
}

impl<T> Entity<T> {
    /// Look up a header, ignoring name case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Drop the metadata and keep the body.
    pub fn into_body(self) -> T {
        self.body
    }
}
