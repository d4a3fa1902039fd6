//! Hypermedia traversal client.
//!
//! Starting from a base URI, the client fetches a resource, finds the link for
//! the next relation in its body, and repeats until the relation list is
//! exhausted. Terminal operations then fetch and decode the final resource.
//!
//! # Module Organization
//!
//! ```text
//! client/
//! ├── traverson  - Traverson engine and traversal builder
//! ├── relation   - Named and path-expression relation resolution
//! ├── transport  - Transport trait and reqwest implementation
//! ├── config     - Transport configuration
//! └── utils      - Utility functions
//! ```
//!
//! # Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Traverson`] | Engine holding base URI, media types, discoverers and transport |
//! | [`TraversalBuilder`] | One traversal with its relations, parameters and headers |
//! | [`RelationResolver`] | Finds the next link for one relation |
//! | [`Transport`] | Executes HTTP requests |
//! | [`ClientConfig`] | Timeouts, proxy and retry settings for [`ReqwestTransport`] |
//!
//! # Examples
//!
//! ## Creating an engine
//!
//! ```
//! use traverson::client::{ClientConfig, Traverson};
//! use traverson::MediaType;
//!
//! let traverson = Traverson::builder("http://localhost:8080/api")
//!     .media_type(MediaType::hal_json())
//!     .client_config(ClientConfig {
//!         max_retries: 2,
//!         ..Default::default()
//!     })
//!     .build()
//!     .unwrap();
//! assert_eq!(traverson.base_uri(), "http://localhost:8080/api");
//! ```
//!
//! ## Utility Functions
//!
//! ```
//! use traverson::client::{exponential_backoff, is_retryable_status};
//! use std::time::Duration;
//!
//! assert!(is_retryable_status(503));
//! assert_eq!(exponential_backoff(1, 100), Duration::from_millis(200));
//! ```

mod config;
mod relation;
mod transport;
mod traverson;
mod utils;

pub use config::ClientConfig;
pub use relation::{RelationResolver, PATH_EXPRESSION_PREFIX};
pub use transport::{ReqwestTransport, Transport};
pub use traverson::{TraversalBuilder, Traverson, TraversonBuilder};
pub use utils::{decode_body, exponential_backoff, is_retryable_status};
