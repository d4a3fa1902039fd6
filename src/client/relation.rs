//! Turning a relation name into the next link to follow.

use crate::discovery::LinkDiscoverers;
use crate::error::{Result, TraversonError};
use crate::json_path;
use crate::protocol::MediaType;
use crate::types::Link;

/// Relations starting with this character are JSON path expressions.
pub const PATH_EXPRESSION_PREFIX: char = '$';

/// How one hop finds its link in a response body.
///
/// # Examples
///
/// ```
/// use traverson::client::RelationResolver;
/// use traverson::discovery::LinkDiscoverers;
/// use traverson::MediaType;
///
/// let body = r#"{"_links":{"movies":{"href":"/movies"}},"next":"/page/2"}"#;
/// let registry = LinkDiscoverers::with_defaults();
///
/// let named = RelationResolver::for_rel("movies");
/// let link = named.resolve(body, &MediaType::hal_json(), &registry).unwrap().unwrap();
/// assert_eq!(link.href, "/movies");
///
/// let path = RelationResolver::for_rel("$.next");
/// let link = path.resolve(body, &MediaType::hal_json(), &registry).unwrap().unwrap();
/// assert_eq!(link.href, "/page/2");
/// assert_eq!(link.rel, "next");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationResolver {
    /// Looked up by the discoverer registered for the response media type.
    Named {
        /// Relation name
        rel: String,
    },
    /// Evaluated directly against the body; the discoverer registry is not consulted.
    PathExpression {
        /// Full expression, including the leading `$`
        expression: String,
        /// Relation name given to the resulting link
        rel: String,
    },
}

impl RelationResolver {
    /// Pick the resolver for a relation as written by the caller.
    pub fn for_rel(rel: &str) -> Self {
        match rel.starts_with(PATH_EXPRESSION_PREFIX) {
            true => RelationResolver::PathExpression {
                expression: rel.to_string(),
                rel: synthetic_rel(rel),
            },
            false => RelationResolver::Named {
                rel: rel.to_string(),
            },
        }
    }

    /// The relation name carried by links this resolver produces.
    pub fn rel(&self) -> &str {
        match self {
            RelationResolver::Named { rel } => rel,
            RelationResolver::PathExpression { rel, .. } => rel,
        }
    }

    /// Whether the discoverer registry takes part in resolution.
    pub fn uses_discoverers(&self) -> bool {
        matches!(self, RelationResolver::Named { .. })
    }

    /// Find the link in `body`.
    ///
    /// `Ok(None)` means the discoverer ran but the relation is absent. A path
    /// expression that matches nothing is a decode error instead.
    ///
    /// # Errors
    ///
    /// - [`TraversonError::UnsupportedMediaType`] if no discoverer handles `media_type`
    /// - [`TraversonError::Decode`] for malformed bodies or unmatched expressions
    pub fn resolve(
        &self,
        body: &str,
        media_type: &MediaType,
        discoverers: &LinkDiscoverers,
    ) -> Result<Option<Link>> {
        match self {
            RelationResolver::Named { rel } => {
                let discoverer = discoverers
                    .discoverer_for(media_type)
                    .ok_or_else(|| TraversonError::UnsupportedMediaType(media_type.to_string()))?;
                discoverer.find_link_with_rel(rel, body)
            }
            RelationResolver::PathExpression { expression, rel } => {
                let href = json_path::read(body, expression)?;
                Ok(Some(Link::new(href, rel.as_str())))
            }
        }
    }
}

/// Relation name for a path expression: its last member name.
///
/// `$._links.movies.href` becomes `href`, `$.items[0]` becomes `items`.
fn synthetic_rel(expression: &str) -> String {
    let trimmed = expression.trim_start_matches(PATH_EXPRESSION_PREFIX);
    let last = trimmed.rsplit('.').find(|s| !s.is_empty()).unwrap_or(trimmed);
    let name = last.split('[').next().unwrap_or(last);
    match name.is_empty() {
        true => expression.to_string(),
        false => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::LinkDiscoverer;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingDiscoverer(Arc<AtomicUsize>);

    impl LinkDiscoverer for CountingDiscoverer {
        fn find_links_with_rel(&self, rel: &str, _body: &str) -> Result<Vec<Link>> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(vec![Link::new("/counted", rel)])
        }
    }

    #[test]
    fn test_for_rel_selects_variant() {
        assert_eq!(
            RelationResolver::for_rel("movies"),
            RelationResolver::Named { rel: "movies".into() }
        );
        let resolver = RelationResolver::for_rel("$._links.movies.href");
        assert!(!resolver.uses_discoverers());
        assert_eq!(resolver.rel(), "href");
    }

    #[test]
    fn test_synthetic_rel() {
        assert_eq!(synthetic_rel("$.next"), "next");
        assert_eq!(synthetic_rel("$.items[0]"), "items");
        assert_eq!(synthetic_rel("$..href"), "href");
        assert_eq!(synthetic_rel("$"), "$");
    }

    #[test]
    fn test_path_expression_never_consults_registry() {
        let calls = Arc::new(AtomicUsize::new(0));
        let registry =
            LinkDiscoverers::new().with(MediaType::all(), CountingDiscoverer(calls.clone()));

        let link = RelationResolver::for_rel("$.next")
            .resolve(r#"{"next":"/page/2"}"#, &MediaType::hal_json(), &registry)
            .unwrap()
            .unwrap();
        assert_eq!(link.href, "/page/2");
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        RelationResolver::for_rel("next")
            .resolve("{}", &MediaType::hal_json(), &registry)
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unmatched_path_expression_is_decode_error() {
        let err = RelationResolver::for_rel("$.missing")
            .resolve("{}", &MediaType::hal_json(), &LinkDiscoverers::new())
            .unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn test_named_without_discoverer() {
        let err = RelationResolver::for_rel("movies")
            .resolve("{}", &"text/html".parse().unwrap(), &LinkDiscoverers::with_defaults())
            .unwrap_err();
        assert!(matches!(err, TraversonError::UnsupportedMediaType(ref t) if t == "text/html"));
    }

    #[test]
    fn test_named_absent_is_none() {
        let found = RelationResolver::for_rel("movies")
            .resolve(r#"{"_links":{}}"#, &MediaType::hal_json(), &LinkDiscoverers::with_defaults())
            .unwrap();
        assert!(found.is_none());
    }
}
