//! Outgoing HTTP request handed to a transport.

use bytes::Bytes;
use http::{HeaderMap, HeaderValue, Method};

/// A request for the [`Transport`](crate::client::Transport) to execute.
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute request URI
    pub uri: String,
    /// Request headers
    pub headers: HeaderMap,
    /// Optional request body
    pub body: Option<Bytes>,
}

impl HttpRequest {
    /// Create a GET request for `uri`.
    pub fn get(uri: impl Into<String>) -> Self {
        HttpRequest {
            method: Method::GET,
            uri: uri.into(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Merge the given headers into the request, replacing same-named ones.
    ///
    /// Every value of a repeated header is kept.
    pub fn with_headers(mut self, headers: &HeaderMap) -> Self {
        for name in headers.keys() {
            self.headers.remove(name);
            for value in headers.get_all(name) {
                self.headers.append(name.clone(), value.clone());
            }
        }
        self
    }

    /// Set a single header.
    pub fn with_header(mut self, name: http::header::HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Look up a header value as a string.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::ACCEPT;

    #[test]
    fn test_get_request() {
        let request = HttpRequest::get("http://localhost/");
        assert_eq!(request.method, Method::GET);
        assert!(request.headers.is_empty());
        assert!(request.body.is_none());
    }

    #[test]
    fn test_with_headers_replaces() {
        let mut extra = HeaderMap::new();
        extra.insert(ACCEPT, HeaderValue::from_static("text/plain"));
        let request = HttpRequest::get("/")
            .with_header(ACCEPT, HeaderValue::from_static("application/json"))
            .with_headers(&extra);
        assert_eq!(request.header("accept"), Some("text/plain"));
        assert_eq!(request.headers.get_all(ACCEPT).iter().count(), 1);
    }

    #[test]
    fn test_with_headers_keeps_repeated_values() {
        let mut extra = HeaderMap::new();
        extra.append(ACCEPT, HeaderValue::from_static("application/hal+json"));
        extra.append(ACCEPT, HeaderValue::from_static("application/json"));
        let request = HttpRequest::get("/")
            .with_header(ACCEPT, HeaderValue::from_static("text/plain"))
            .with_headers(&extra);

        let accept: Vec<_> = request
            .headers
            .get_all(ACCEPT)
            .iter()
            .map(|v| v.to_str().unwrap())
            .collect();
        assert_eq!(accept, ["application/hal+json", "application/json"]);
    }
}
