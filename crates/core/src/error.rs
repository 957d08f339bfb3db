//! Error types for the gridmix system.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the gridmix system.
#[derive(Error, Debug)]
pub enum Error {
    /// Non-success HTTP status from an upstream endpoint. Fatal to the
    /// current fetch; retries are the transport collaborator's concern.
    #[error("transport error: {url} returned status {status}")]
    Transport {
        /// Endpoint that was called.
        url: String,
        /// HTTP status code returned.
        status: u16,
    },

    /// An upstream value uses a category or identifier not present in the
    /// fixed translation tables (unknown fuel code, unknown partner zone,
    /// attribute id with no series name). Never coerced into a default.
    #[error("unknown vocabulary: {0}")]
    Vocabulary(String),

    /// Operation the upstream providers do not support (price queries,
    /// historical queries).
    #[error("not implemented: {0}")]
    Unsupported(&'static str),

    /// Malformed document content (missing field, bad number, bad timestamp).
    #[error("data error: {0}")]
    Data(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// XML parsing error.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
}

impl Error {
    /// Create a transport error for an endpoint and status.
    pub fn transport(url: impl Into<String>, status: u16) -> Self {
        Error::Transport {
            url: url.into(),
            status,
        }
    }

    /// Create a vocabulary error.
    pub fn vocabulary(msg: impl Into<String>) -> Self {
        Error::Vocabulary(msg.into())
    }

    /// Create a data error.
    pub fn data(msg: impl Into<String>) -> Self {
        Error::Data(msg.into())
    }
}
