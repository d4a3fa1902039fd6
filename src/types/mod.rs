//! Core value types shared by the client and the link discoverers.

mod link;
mod request;
mod response;

pub use link::Link;
pub use request::HttpRequest;
pub use response::{Entity, HttpResponse};
