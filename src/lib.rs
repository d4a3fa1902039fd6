#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! ## Overview
//!
//! A hypermedia API exposes links between resources. Instead of hard-coding
//! URIs, a client names the relations it wants to follow and lets the
//! responses tell it where to go:
//!
//! 1. **Traversal** - Follow relation names hop by hop from a base URI
//! 2. **Link Discovery** - Find a relation's link in a response body, per media type
//! 3. **Path Expressions** - Relations starting with `$` are read from the body directly
//! 4. **URI Templates** - Expand `{x}`, `{/x}`, `{#x}`, `{?x,y}` and `{&x}` on every hop
//!
//! ## Client Usage
//!
//! ```no_run
//! use serde::Deserialize;
//! use traverson::hal::Resource;
//! use traverson::{MediaType, Traverson};
//!
//! #[derive(Deserialize)]
//! struct Actor {
//!     name: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let traverson = Traverson::new("http://localhost:8080/api", vec![MediaType::hal_json()])?;
//!
//!     let actor: Resource<Actor> = traverson
//!         .follow(["movies", "movie", "actor"])
//!         .to_object()
//!         .await?;
//!     println!("{}", actor.content.name);
//!
//!     let next = traverson
//!         .follow(["movies", "$._links.next.href"])
//!         .with_template_parameter("page", 2)
//!         .final_uri()
//!         .await?;
//!     println!("{}", next);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## URI Templates
//!
//! ```
//! use traverson::UriTemplate;
//!
//! let template = UriTemplate::parse("/foo{/bar}{?firstname,lastname}{#anchor}").unwrap();
//! let uri = template
//!     .expand_positional(["path", "Dave", "Matthews", "discography"])
//!     .unwrap();
//! assert_eq!(uri, "/foo/path?firstname=Dave&lastname=Matthews#discography");
//! ```
//!
//! ## Module Structure
//!
//! - **[client]** - Traversal engine, relation resolution and HTTP transport
//! - **[uri_template]** - URI template parsing and expansion
//! - **[discovery]** - Link discoverer trait and media type registry
//! - **[hal]** - HAL link discovery and typed resources
//! - **[json_path]** - Path expressions over JSON bodies
//! - **[alps]** - ALPS profile documents
//! - **[types]** - Links, requests and responses
//! - **[error]** - Error types and result handling
//! - **[protocol]** - Media types, header helpers and constants

pub mod alps;
pub mod client;
pub mod discovery;
pub mod error;
pub mod hal;
pub mod json_path;
pub mod protocol;
pub mod types;
pub mod uri_template;

pub use client::{ClientConfig, ReqwestTransport, TraversalBuilder, Traverson, TraversonBuilder};
pub use discovery::{LinkDiscoverer, LinkDiscoverers};
pub use error::{Result, TraversonError};
pub use protocol::MediaType;
pub use types::{Entity, HttpRequest, HttpResponse, Link};
pub use uri_template::{TemplateParams, TemplateValue, UriTemplate};
