//! Content negotiation primitives: media types, header helpers and constants.

mod headers;
mod media_type;

pub use headers::{content_type, format_accept_header, parse_accept_header};
pub use media_type::{is_hal, MediaType};

/// Well-known protocol constants.
pub mod constants {
    /// Media type strings.
    pub mod media_types {
        /// HAL with JSON encoding
        pub const HAL_JSON: &str = "application/hal+json";
        /// Plain JSON
        pub const APPLICATION_JSON: &str = "application/json";
        /// Any media type
        pub const ALL: &str = "*/*";
        /// ALPS profile documents with JSON encoding
        pub const ALPS_JSON: &str = "application/alps+json";
    }

    /// Property names of the HAL format.
    pub mod hal {
        /// Object holding a representation's links, keyed by relation
        pub const LINKS: &str = "_links";
        /// Object holding embedded representations
        pub const EMBEDDED: &str = "_embedded";
        /// Link target property
        pub const HREF: &str = "href";
        /// Flag marking a link target as a URI template
        pub const TEMPLATED: &str = "templated";
    }
}
