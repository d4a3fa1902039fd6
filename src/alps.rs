//! ALPS (Application-Level Profile Semantics) documents.
//!
//! Profiles describe the semantics of the relations and properties a
//! hypermedia API exposes, and are served as `application/alps+json`. The
//! model serializes to the JSON form with a top-level `alps` key:
//!
//! ```text
//! {
//!   "alps": {
//!     "version": "1.0",
//!     "doc": { "format": "text", "value": "Movie catalog" },
//!     "descriptor": [
//!       { "id": "movie", "type": "semantic", "descriptor": [ { "name": "title" } ] }
//!     ]
//!   }
//! }
//! ```
//!
//! # Examples
//!
//! ```
//! use traverson::alps::{Alps, Descriptor, DescriptorType, Doc};
//!
//! let profile = Alps::new()
//!     .with_doc(Doc::text("Movie catalog"))
//!     .with_descriptor(
//!         Descriptor::new()
//!             .with_id("movie")
//!             .with_type(DescriptorType::Semantic)
//!             .with_descriptor(Descriptor::named("title")),
//!     );
//!
//! let json = serde_json::to_value(&profile).unwrap();
//! assert_eq!(json["alps"]["version"], "1.0");
//! assert_eq!(json["alps"]["descriptor"][0]["type"], "semantic");
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Media type of ALPS profile documents.
pub use crate::protocol::constants::media_types::ALPS_JSON as MEDIA_TYPE;

/// ALPS version written by default.
pub const ALPS_VERSION: &str = "1.0";

/// Kind of state transition or data element a descriptor stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DescriptorType {
    /// Data element or state
    Semantic,
    /// Safe transition, such as GET
    Safe,
    /// Idempotent unsafe transition, such as PUT or DELETE
    Idempotent,
    /// Non-idempotent unsafe transition, such as POST
    Unsafe,
}

/// Markup of a [`Doc`] value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Plain text
    Text,
    /// HTML markup
    Html,
    /// AsciiDoc markup
    Asciidoc,
}

/// Human-readable documentation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doc {
    /// Link to external documentation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Inline documentation text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Markup of `value`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
}

impl Doc {
    /// Plain text documentation.
    pub fn text(value: impl Into<String>) -> Self {
        Doc {
            href: None,
            value: Some(value.into()),
            format: Some(Format::Text),
        }
    }

    /// Set the markup of the value.
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    /// Point to external documentation.
    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }
}

/// Extension element for information outside the ALPS vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ext {
    /// Extension identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Link to the extension definition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Extension value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Ext {
    /// An extension with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Ext {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    /// Point to the extension definition.
    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    /// Set the extension value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

/// A semantic element of the profile, possibly nesting further descriptors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Descriptor {
    /// Identifier, unique within the profile
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Reference to a descriptor defined elsewhere
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Name used in representations, defaults to `id`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Descriptor kind
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub descriptor_type: Option<DescriptorType>,
    /// Return type of a transition, usually a descriptor reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rt: Option<String>,
    /// Documentation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<Doc>,
    /// Extension
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ext: Option<Ext>,
    /// Nested descriptors
    #[serde(rename = "descriptor", default, skip_serializing_if = "Vec::is_empty")]
    pub descriptors: Vec<Descriptor>,
}

impl Descriptor {
    /// An empty descriptor.
    pub fn new() -> Self {
        Self::default()
    }

    /// A descriptor carrying only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Descriptor {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Set the identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Reference a descriptor defined elsewhere.
    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    /// Set the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the descriptor kind.
    pub fn with_type(mut self, descriptor_type: DescriptorType) -> Self {
        self.descriptor_type = Some(descriptor_type);
        self
    }

    /// Set the return type.
    pub fn with_rt(mut self, rt: impl Into<String>) -> Self {
        self.rt = Some(rt.into());
        self
    }

    /// Attach documentation.
    pub fn with_doc(mut self, doc: Doc) -> Self {
        self.doc = Some(doc);
        self
    }

    /// Attach an extension.
    pub fn with_ext(mut self, ext: Ext) -> Self {
        self.ext = Some(ext);
        self
    }

    /// Nest a descriptor.
    pub fn with_descriptor(mut self, descriptor: Descriptor) -> Self {
        self.descriptors.push(descriptor);
        self
    }
}

#[derive(Serialize, Deserialize)]
struct AlpsBody {
    #[serde(default = "default_version")]
    version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    doc: Option<Doc>,
    #[serde(rename = "descriptor", default, skip_serializing_if = "Vec::is_empty")]
    descriptors: Vec<Descriptor>,
}

#[derive(Serialize, Deserialize)]
struct AlpsDocument {
    alps: AlpsBody,
}

fn default_version() -> String {
    ALPS_VERSION.to_string()
}

/// An ALPS profile document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alps {
    /// ALPS version, `1.0` by default
    pub version: String,
    /// Profile documentation
    pub doc: Option<Doc>,
    /// Top-level descriptors
    pub descriptors: Vec<Descriptor>,
}

impl Default for Alps {
    fn default() -> Self {
        Alps {
            version: default_version(),
            doc: None,
            descriptors: Vec::new(),
        }
    }
}

impl Alps {
    /// An empty profile with the default version.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach profile documentation.
    pub fn with_doc(mut self, doc: Doc) -> Self {
        self.doc = Some(doc);
        self
    }

    /// Append a top-level descriptor.
    pub fn with_descriptor(mut self, descriptor: Descriptor) -> Self {
        self.descriptors.push(descriptor);
        self
    }

    /// Top-level descriptor with the given id.
    pub fn descriptor(&self, id: &str) -> Option<&Descriptor> {
        self.descriptors
            .iter()
            .find(|descriptor| descriptor.id.as_deref() == Some(id))
    }
}

impl Serialize for Alps {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        AlpsDocument {
            alps: AlpsBody {
                version: self.version.clone(),
                doc: self.doc.clone(),
                descriptors: self.descriptors.clone(),
            },
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Alps {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let AlpsDocument { alps } = AlpsDocument::deserialize(deserializer)?;
        Ok(Alps {
            version: alps.version,
            doc: alps.doc,
            descriptors: alps.descriptors,
        })
    }
}
