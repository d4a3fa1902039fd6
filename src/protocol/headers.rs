//! Header parsing and formatting for content negotiation.
//!
//! # Header Formats
//!
//! | Header | Format | Example |
//! |--------|--------|---------|
//! | Accept | Comma-separated media types | `application/hal+json, application/json` |
//! | Content-Type | Single media type with parameters | `application/hal+json;charset=UTF-8` |
//!
//! # Examples
//!
//! ```
//! use traverson::protocol::{format_accept_header, parse_accept_header};
//! use traverson::MediaType;
//!
//! let types = vec![MediaType::hal_json(), MediaType::application_json()];
//! let header = format_accept_header(&types);
//! assert_eq!(header, "application/hal+json, application/json");
//! assert_eq!(parse_accept_header(&header).unwrap(), types);
//! ```

use super::media_type::MediaType;
use crate::error::Result;
use std::collections::BTreeMap;

/// Parse an `Accept` header value into its media types, in order.
///
/// Quality parameters are kept as ordinary parameters and do not reorder the
/// list.
///
/// # Examples
///
/// ```
/// use traverson::protocol::parse_accept_header;
///
/// let types = parse_accept_header("application/hal+json, */*;q=0.8").unwrap();
/// assert_eq!(types.len(), 2);
///
/// assert!(parse_accept_header("").unwrap().is_empty());
/// ```
pub fn parse_accept_header(value: &str) -> Result<Vec<MediaType>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(MediaType::parse)
        .collect()
}

/// Format media types as an `Accept` header value.
pub fn format_accept_header(media_types: &[MediaType]) -> String {
    media_types
        .iter()
        .map(|mt| mt.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Extract the media type from response headers.
///
/// Header names are matched case-insensitively. Returns `None` when the header
/// is missing or unparsable.
pub fn content_type(headers: &BTreeMap<String, String>) -> Option<MediaType> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(http::header::CONTENT_TYPE.as_str()))
        .and_then(|(_, v)| MediaType::parse(v).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accept_header() {
        let result = parse_accept_header("application/hal+json, application/json").unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result[0], MediaType::hal_json());
    }

    #[test]
    fn test_parse_accept_header_skips_empty_parts() {
        let result = parse_accept_header("application/json, ,").unwrap();
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_parse_accept_header_invalid() {
        assert!(parse_accept_header("application/json, nonsense").is_err());
    }

    #[test]
    fn test_format_accept_header_single() {
        assert_eq!(
            format_accept_header(&[MediaType::hal_json()]),
            "application/hal+json"
        );
    }

    #[test]
    fn test_content_type_case_insensitive() {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/hal+json;charset=UTF-8".to_string());
        let mt = content_type(&headers).unwrap();
        assert_eq!(mt.essence(), "application/hal+json");
    }

    #[test]
    fn test_content_type_missing() {
        assert!(content_type(&BTreeMap::new()).is_none());
    }
}
