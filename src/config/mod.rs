use serde::{Deserialize, Serialize};

use crate::api::client::XmlClient;
use crate::api::http_client::{build_client, TransportConfig};
use crate::api::types::Domain;
use crate::error::{Result, XmlSearchError};

/// Client settings, loadable from a YAML document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSettings {
    /// API user
    pub user: String,

    /// API key
    pub key: String,

    /// Search domain
    #[serde(default)]
    pub domain: Domain,

    /// Full endpoint URL, replaces the domain-based one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// HTTP transport settings
    #[serde(default)]
    pub transport: TransportConfig,
}

impl ClientSettings {
    pub fn new(user: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            key: key.into(),
            domain: Domain::default(),
            endpoint: None,
            transport: TransportConfig::default(),
        }
    }

    /// Parse settings from YAML
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        let settings: Self = serde_yaml::from_str(contents)
            .map_err(|e| XmlSearchError::Config(format!("Failed to parse settings: {}", e)))?;

        if settings.user.is_empty() || settings.key.is_empty() {
            return Err(XmlSearchError::Config(
                "Both 'user' and 'key' must be non-empty".to_string(),
            ));
        }

        Ok(settings)
    }

    /// Serialize settings to YAML
    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| XmlSearchError::Config(format!("Failed to serialize settings: {}", e)))
    }

    /// Build a client with a transport created from these settings
    pub fn into_client(self) -> Result<XmlClient> {
        let http_client = build_client(&self.transport)?;
        let mut client =
            XmlClient::with_domain(self.user, self.key, self.domain).with_http_client(http_client);
        if let Some(endpoint) = self.endpoint {
            client = client.with_endpoint(endpoint);
        }
        Ok(client)
    }
}
