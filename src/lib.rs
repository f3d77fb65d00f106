//! Fluent client for the Yandex XML search API.
//!
//! Options are validated as they are set, rendered into a request URL, and
//! sent with a single GET. The raw XML body is returned as-is; API errors
//! reported in an XML payload are surfaced as [`error::XmlSearchError::RemoteApi`].

pub mod api;
pub mod config;
pub mod error;

pub use api::XmlClient;
pub use error::{Result, XmlSearchError};
