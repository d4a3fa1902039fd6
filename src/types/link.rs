//! Links between hypermedia resources.

use crate::error::Result;
use crate::uri_template::{TemplateParams, UriTemplate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A link: a target `href` (a URI or URI template) and its relation name.
///
/// Two links are equal when both `href` and `rel` match.
///
/// # Examples
///
/// ```
/// use traverson::Link;
/// use traverson::uri_template::TemplateParams;
///
/// let link = Link::new("/movies{?page}", "movies");
/// assert!(link.is_templated());
///
/// let mut params = TemplateParams::new();
/// params.insert("page".into(), 2u32.into());
/// assert_eq!(link.expand(&params).unwrap(), "/movies?page=2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    /// Target URI or URI template
    pub href: String,
    /// Relation name
    pub rel: String,
}

impl Link {
    /// Create a link.
    pub fn new(href: impl Into<String>, rel: impl Into<String>) -> Self {
        Link {
            href: href.into(),
            rel: rel.into(),
        }
    }

    /// Target URI or URI template.
    pub fn href(&self) -> &str {
        &self.href
    }

    /// Relation name.
    pub fn rel(&self) -> &str {
        &self.rel
    }

    /// Whether the href contains template variables.
    pub fn is_templated(&self) -> bool {
        UriTemplate::is_template(&self.href)
    }

    /// Parse the href as a URI template.
    pub fn template(&self) -> Result<UriTemplate> {
        UriTemplate::parse(self.href.as_str())
    }

    /// Expand the href with the given parameters.
    pub fn expand(&self, params: &TemplateParams) -> Result<String> {
        self.template()?.expand(params)
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>;rel=\"{}\"", self.href, self.rel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_by_href_and_rel() {
        assert_eq!(Link::new("/a", "self"), Link::new("/a", "self"));
        assert_ne!(Link::new("/a", "self"), Link::new("/a", "next"));
        assert_ne!(Link::new("/a", "self"), Link::new("/b", "self"));
    }

    #[test]
    fn test_plain_href_is_not_templated() {
        let link = Link::new("http://localhost/movies/1", "movie");
        assert!(!link.is_templated());
        assert_eq!(link.expand(&TemplateParams::new()).unwrap(), link.href);
    }

    #[test]
    fn test_display() {
        assert_eq!(Link::new("/a", "self").to_string(), "</a>;rel=\"self\"");
    }
}
