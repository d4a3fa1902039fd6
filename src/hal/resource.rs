//! HAL representations with typed content.

use super::{links_from_value, links_to_value};
use crate::protocol::constants::hal;
use crate::types::Link;
use serde::de::{DeserializeOwned, Error as _};
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// A HAL resource: typed content plus its links.
///
/// Deserializes from a HAL document by pulling `_links` apart from the
/// remaining properties, which become the content. `_embedded` is dropped.
///
/// # Examples
///
/// ```
/// use serde::Deserialize;
/// use traverson::hal::Resource;
///
/// #[derive(Deserialize)]
/// struct Actor {
///     name: String,
/// }
///
/// let body = r#"{"name":"Keanu Reeves","_links":{"self":{"href":"/actors/1"}}}"#;
/// let actor: Resource<Actor> = serde_json::from_str(body).unwrap();
/// assert_eq!(actor.content.name, "Keanu Reeves");
/// assert_eq!(actor.link("self").unwrap().href, "/actors/1");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Resource<T> {
    /// Resource state
    pub content: T,
    /// Links in document order
    pub links: Vec<Link>,
}

impl<T> Resource<T> {
    /// Wrap content without links.
    pub fn new(content: T) -> Self {
        Resource {
            content,
            links: Vec::new(),
        }
    }

    /// Append a link.
    pub fn with_link(mut self, link: Link) -> Self {
        self.links.push(link);
        self
    }

    /// The first link with the given relation.
    pub fn link(&self, rel: &str) -> Option<&Link> {
        self.links.iter().find(|link| link.rel == rel)
    }

    /// All links with the given relation.
    pub fn links_with_rel<'a>(&'a self, rel: &'a str) -> impl Iterator<Item = &'a Link> + 'a {
        self.links.iter().filter(move |link| link.rel == rel)
    }

    /// Drop the links and keep the content.
    pub fn into_content(self) -> T {
        self.content
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Resource<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut properties = Map::deserialize(deserializer)?;

        let mut links = Vec::new();
        if let Some(Value::Object(by_rel)) = properties.remove(hal::LINKS) {
            for (rel, entry) in &by_rel {
                links.extend(links_from_value(rel, entry).map_err(D::Error::custom)?);
            }
        }
        properties.remove(hal::EMBEDDED);

        let content = T::deserialize(Value::Object(properties)).map_err(D::Error::custom)?;
        Ok(Resource { content, links })
    }
}

impl<T: Serialize> Serialize for Resource<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut value = serde_json::to_value(&self.content).map_err(S::Error::custom)?;
        let properties = value
            .as_object_mut()
            .ok_or_else(|| S::Error::custom("HAL resource content must serialize to an object"))?;
        if !self.links.is_empty() {
            properties.insert(hal::LINKS.to_string(), links_to_value(&self.links));
        }
        value.serialize(serializer)
    }
}
