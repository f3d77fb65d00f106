use thiserror::Error;

#[derive(Debug, Error)]
pub enum XmlSearchError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Search query is not set")]
    MissingQuery,

    #[error("Request has no parameters")]
    EmptyRequest,

    /// Error reported by the search API in its XML payload
    #[error("Yandex API error ({code}): {message}")]
    RemoteApi { message: String, code: u32 },

    /// Transport failure, passed through untouched
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl XmlSearchError {
    /// Create a remote API error
    pub fn remote(message: impl Into<String>, code: u32) -> Self {
        Self::RemoteApi {
            message: message.into(),
            code,
        }
    }

    /// Get user-friendly hint for the error
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::MissingQuery => Some(
                "Call set_query() with a non-empty query, or set_action() for limits info."
                    .to_string(),
            ),
            Self::RemoteApi { code: 42, .. } => {
                Some("Check the API user and key, and that your IP address is registered.".to_string())
            }
            Self::RemoteApi { code: 15, .. } => Some("Nothing was found, try a broader query.".to_string()),
            Self::Http(e) if e.is_timeout() => Some("The request timed out, try again later.".to_string()),
            Self::Http(e) if e.is_connect() => {
                Some("Check your internet connection and try again.".to_string())
            }
            _ => None,
        }
    }

    /// Whether repeating the same request may succeed.
    ///
    /// The client never retries on its own; this is for callers that do.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => {
                e.is_timeout()
                    || e.is_connect()
                    || e.status().map(|s| s.is_server_error()).unwrap_or(false)
            }
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, XmlSearchError>;
