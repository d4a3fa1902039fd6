//! Error types for hypermedia traversal and URI template handling.
//!
//! Every failure surfaces as a [`TraversonError`] so callers can tell a missing
//! link from a network failure from a malformed document.
//!
//! # Error Categories
//!
//! | Category | Variants | Retryable |
//! |----------|----------|-----------|
//! | Configuration | `Config`, `UnsupportedMediaType` | No |
//! | Template | `MalformedTemplate`, `MissingVariable`, `UnsupportedValue`, `InvalidUri` | No |
//! | Traversal | `LinkNotFound` | No |
//! | Document | `Decode`, `Json` | No |
//! | Transport | `Transport`, `Status` | Depends |
//!
//! # Examples
//!
//! ```
//! use traverson::TraversonError;
//!
//! let err = TraversonError::MissingVariable("id".into());
//! assert!(err.to_string().contains("id"));
//! assert!(!err.is_transport());
//! ```

use thiserror::Error;

/// Result type for traversal operations.
pub type Result<T> = std::result::Result<T, TraversonError>;

/// Errors that can occur while expanding templates or traversing links.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TraversonError {
    /// Invalid engine or transport configuration, detected at construction.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A `{...}` block in a URI template could not be parsed.
    #[error("Malformed URI template '{template}' at position {position}: {reason}")]
    MalformedTemplate {
        /// The template string being parsed
        template: String,
        /// Byte offset where parsing failed
        position: usize,
        /// What went wrong
        reason: String,
    },

    /// A required path variable had no value at expansion time.
    #[error("Missing value for required template variable '{0}'")]
    MissingVariable(String),

    /// A value shape the variable's marker cannot express.
    #[error("Unsupported value for template variable '{variable}': {reason}")]
    UnsupportedValue {
        /// Name of the offending variable
        variable: String,
        /// Why the value was rejected
        reason: String,
    },

    /// The relation could not be found in the response.
    ///
    /// Carries the response body to help diagnose the API's actual shape.
    #[error("Expected to find link with rel '{rel}' in response {body}")]
    LinkNotFound {
        /// Relation that was looked up
        rel: String,
        /// Body of the response that lacked the relation
        body: String,
    },

    /// The body could not be parsed, or a path expression did not match.
    #[error("Decode error: {0}")]
    Decode(String),

    /// JSON deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No link discoverer is registered for the response media type.
    #[error("No link discoverer registered for media type '{0}'")]
    UnsupportedMediaType(String),

    /// An expanded URI could not be parsed or resolved.
    #[error("Invalid URI '{uri}': {reason}")]
    InvalidUri {
        /// The offending URI
        uri: String,
        /// Parser message
        reason: String,
    },

    /// The transport failed before a response was received.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("Request to {uri} failed with status {status}")]
    Status {
        /// URI that was requested
        uri: String,
        /// HTTP status code
        status: u16,
    },
}

impl TraversonError {
    /// Whether this error came from the transport layer.
    pub fn is_transport(&self) -> bool {
        matches!(self, TraversonError::Transport(_) | TraversonError::Status { .. })
    }

    /// Whether this error means the document was not what was expected.
    pub fn is_decode(&self) -> bool {
        matches!(self, TraversonError::Decode(_) | TraversonError::Json(_))
    }

    /// Whether a transport may reasonably retry the request.
    ///
    /// The traversal loop itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            TraversonError::Transport(_) => true,
            TraversonError::Status { status, .. } => {
                crate::client::is_retryable_status(*status)
            }
            _ => false,
        }
    }
}

impl From<reqwest::Error> for TraversonError {
    fn from(err: reqwest::Error) -> Self {
        TraversonError::Transport(err.to_string())
    }
}
