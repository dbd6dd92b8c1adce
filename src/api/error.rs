//! API client errors

use thiserror::Error;

/// Errors surfaced by the API client
#[derive(Error, Debug)]
pub enum ApiError {
    /// Non-2xx response; the message is the server's `detail` field when
    /// one was sent, otherwise a fallback carrying the status code
    #[error("{detail}")]
    Api { status: u16, detail: String },

    /// Connection or protocol failure before a response was read
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// An operation that addresses an existing document was attempted
    /// without an id; rejected before any network call
    #[error("an id is required to {action} content")]
    MissingId { action: &'static str },

    /// The local token slot could not be read or written
    #[error("token store: {0}")]
    TokenStore(#[from] std::io::Error),
}

impl ApiError {
    /// Build the error for a non-2xx response.
    pub fn from_status(status: u16, detail: Option<String>) -> Self {
        let detail = detail
            .filter(|detail| !detail.is_empty())
            .unwrap_or_else(|| format!("Request failed ({})", status));
        ApiError::Api { status, detail }
    }
}
