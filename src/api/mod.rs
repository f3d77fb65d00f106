pub mod client;
pub mod http_client;
pub mod types;
pub mod xml;

pub use client::XmlClient;
pub use http_client::TransportConfig;
