//! HAL (`application/hal+json`) support.
//!
//! HAL keeps a representation's links in a `_links` object keyed by relation:
//!
//! ```text
//! {
//!   "title": "The Matrix",
//!   "_links": {
//!     "self":  { "href": "http://localhost/movies/1" },
//!     "actor": [ { "href": "http://localhost/actors/1" } ]
//!   }
//! }
//! ```
//!
//! - [`HalLinkDiscoverer`] finds links in raw HAL bodies during traversal.
//! - [`Resource`] decodes a HAL body into typed content plus links.

mod discoverer;
mod resource;

pub use discoverer::HalLinkDiscoverer;
pub use resource::Resource;

use crate::protocol::constants::hal;
use crate::types::Link;
use serde_json::{Map, Value};

/// Read the link object(s) stored under one relation.
fn links_from_value(rel: &str, entry: &Value) -> std::result::Result<Vec<Link>, String> {
    let link_from_object = |object: &Value| {
        object
            .get(hal::HREF)
            .and_then(Value::as_str)
            .map(|href| Link::new(href, rel))
            .ok_or_else(|| format!("Link for rel '{}' has no string href", rel))
    };

    match entry {
        Value::Array(items) => items.iter().map(link_from_object).collect(),
        Value::Object(_) => Ok(vec![link_from_object(entry)?]),
        other => Err(format!("Link for rel '{}' must be an object or array, got {}", rel, other)),
    }
}

/// Build a `_links` object, using an array for relations with several links.
fn links_to_value(links: &[Link]) -> Value {
    let mut by_rel: Map<String, Value> = Map::new();

    for link in links {
        let mut object = Map::new();
        object.insert(hal::HREF.to_string(), Value::String(link.href.clone()));
        if link.is_templated() {
            object.insert(hal::TEMPLATED.to_string(), Value::Bool(true));
        }
        let object = Value::Object(object);

        match by_rel.get_mut(&link.rel) {
            None => {
                by_rel.insert(link.rel.clone(), object);
            }
            Some(Value::Array(items)) => items.push(object),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, object]);
            }
        }
    }

    Value::Object(by_rel)
}
