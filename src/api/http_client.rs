use reqwest::{Client, ClientBuilder};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::Result;

/// Settings for the default HTTP transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Request timeout in seconds
    pub timeout: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: 30,
            user_agent: format!("yandex-xml/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Create an HTTP client from transport settings
pub fn build_client(config: &TransportConfig) -> Result<Client> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout))
        .user_agent(config.user_agent.as_str())
        .build()?;
    Ok(client)
}
