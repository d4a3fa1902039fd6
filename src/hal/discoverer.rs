//! Link discovery for HAL documents.

use super::links_from_value;
use crate::discovery::LinkDiscoverer;
use crate::error::{Result, TraversonError};
use crate::protocol::constants::hal;
use crate::types::Link;
use serde_json::Value;

/// Finds links in the `_links` object of a HAL document.
///
/// A relation maps either to a single link object or to an array of them;
/// both forms are supported.
#[derive(Debug, Clone, Copy, Default)]
pub struct HalLinkDiscoverer;

impl HalLinkDiscoverer {
    /// Create the discoverer.
    pub fn new() -> Self {
        HalLinkDiscoverer
    }
}

impl LinkDiscoverer for HalLinkDiscoverer {
    fn find_links_with_rel(&self, rel: &str, body: &str) -> Result<Vec<Link>> {
        let document: Value = serde_json::from_str(body)
            .map_err(|e| TraversonError::Decode(format!("Invalid HAL document: {}", e)))?;

        let entry = match document.get(hal::LINKS).and_then(|links| links.get(rel)) {
            Some(entry) => entry,
            None => return Ok(Vec::new()),
        };

        links_from_value(rel, entry).map_err(TraversonError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "name": "root",
        "_links": {
            "self": {"href": "http://localhost/"},
            "movies": {"href": "http://localhost/movies{?page}", "templated": true},
            "actor": [
                {"href": "http://localhost/actors/1"},
                {"href": "http://localhost/actors/2"}
            ]
        }
    }"#;

    #[test]
    fn test_finds_single_link() {
        let link = HalLinkDiscoverer::new()
            .find_link_with_rel("self", SAMPLE)
            .unwrap()
            .unwrap();
        assert_eq!(link, Link::new("http://localhost/", "self"));
    }

    #[test]
    fn test_finds_templated_link() {
        let link = HalLinkDiscoverer::new()
            .find_link_with_rel("movies", SAMPLE)
            .unwrap()
            .unwrap();
        assert!(link.is_templated());
    }

    #[test]
    fn test_finds_first_of_array() {
        let discoverer = HalLinkDiscoverer::new();
        let link = discoverer.find_link_with_rel("actor", SAMPLE).unwrap().unwrap();
        assert_eq!(link.href, "http://localhost/actors/1");
        assert_eq!(discoverer.find_links_with_rel("actor", SAMPLE).unwrap().len(), 2);
    }

    #[test]
    fn test_absent_rel_is_none() {
        let discoverer = HalLinkDiscoverer::new();
        assert!(discoverer.find_link_with_rel("director", SAMPLE).unwrap().is_none());
        assert!(discoverer.find_link_with_rel("self", "{}").unwrap().is_none());
        assert!(discoverer.find_link_with_rel("self", "[1, 2]").unwrap().is_none());
    }

    #[test]
    fn test_malformed_body_is_decode_error() {
        let err = HalLinkDiscoverer::new()
            .find_link_with_rel("self", "<html>")
            .unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn test_link_without_href_is_decode_error() {
        let body = r#"{"_links":{"self":{"title":"no target"}}}"#;
        assert!(HalLinkDiscoverer::new()
            .find_link_with_rel("self", body)
            .unwrap_err()
            .is_decode());
    }
}
