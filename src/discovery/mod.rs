//! Link discovery: finding a relation's link inside a response body.
//!
//! A [`LinkDiscoverer`] understands one representation format. The
//! [`LinkDiscoverers`] registry maps media types to discoverers as an explicit,
//! ordered list: lookups walk the list in registration order and the first
//! entry whose media type includes the response's type wins.
//!
//! # Examples
//!
//! ```
//! use traverson::discovery::LinkDiscoverers;
//! use traverson::MediaType;
//!
//! let discoverers = LinkDiscoverers::with_defaults();
//! let hal = discoverers.discoverer_for(&MediaType::hal_json()).unwrap();
//!
//! let body = r#"{"_links":{"movies":{"href":"/movies"}}}"#;
//! let link = hal.find_link_with_rel("movies", body).unwrap().unwrap();
//! assert_eq!(link.href, "/movies");
//! ```

use crate::error::Result;
use crate::hal::HalLinkDiscoverer;
use crate::protocol::MediaType;
use crate::types::Link;
use std::fmt;
use std::sync::Arc;

/// Finds links by relation name in a raw body of one representation format.
pub trait LinkDiscoverer: Send + Sync {
    /// All links with the given relation, in document order.
    ///
    /// Returns an empty list when the relation is absent from a well-formed
    /// body, and a decode error when the body is malformed.
    fn find_links_with_rel(&self, rel: &str, body: &str) -> Result<Vec<Link>>;

    /// The first link with the given relation, if any.
    fn find_link_with_rel(&self, rel: &str, body: &str) -> Result<Option<Link>> {
        Ok(self.find_links_with_rel(rel, body)?.into_iter().next())
    }
}

/// Ordered registry of discoverers keyed by media type.
#[derive(Clone, Default)]
pub struct LinkDiscoverers {
    entries: Vec<(MediaType, Arc<dyn LinkDiscoverer>)>,
}

impl LinkDiscoverers {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the HAL discoverer for `application/hal+json`.
    pub fn with_defaults() -> Self {
        Self::new().with(MediaType::hal_json(), HalLinkDiscoverer::new())
    }

    /// Append a discoverer for every media type `media_type` includes.
    ///
    /// Entries registered earlier take precedence.
    pub fn register<D>(&mut self, media_type: MediaType, discoverer: D)
    where
        D: LinkDiscoverer + 'static,
    {
        self.register_shared(media_type, Arc::new(discoverer));
    }

    /// Append an already shared discoverer.
    pub fn register_shared(&mut self, media_type: MediaType, discoverer: Arc<dyn LinkDiscoverer>) {
        tracing::debug!(media_type = %media_type, "registering link discoverer");
        self.entries.push((media_type, discoverer));
    }

    /// Builder-style [`register`](Self::register).
    pub fn with<D>(mut self, media_type: MediaType, discoverer: D) -> Self
    where
        D: LinkDiscoverer + 'static,
    {
        self.register(media_type, discoverer);
        self
    }

    /// The first registered discoverer supporting `media_type`.
    pub fn discoverer_for(&self, media_type: &MediaType) -> Option<&dyn LinkDiscoverer> {
        self.entries
            .iter()
            .find(|(supported, _)| supported.includes(media_type))
            .map(|(_, discoverer)| discoverer.as_ref())
    }

    /// Registered media types in precedence order.
    pub fn media_types(&self) -> impl Iterator<Item = &MediaType> {
        self.entries.iter().map(|(media_type, _)| media_type)
    }

    /// Number of registered discoverers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no discoverer is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for LinkDiscoverers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.media_types()).finish()
    }
}
