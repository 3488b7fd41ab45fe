//! Error types shared by the Subsonic client, the offline cache and storage.

use thiserror::Error;

/// Errors that can occur when talking to a Subsonic server.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced a response (DNS, refused connection, CORS, offline).
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success HTTP status.
    #[error("HTTP {0}")]
    Http(u16),

    /// The body was not a valid Subsonic JSON envelope.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// The envelope reported `status != "ok"`.
    #[error("{message}")]
    Subsonic { code: i32, message: String },

    /// The configured server URL cannot be used.
    #[error("Invalid server URL: {0}")]
    InvalidServer(String),

    /// A login field was left empty.
    #[error("Please fill in all fields")]
    MissingFields,

    /// An album or queue request came back without songs.
    #[error("No songs in album")]
    EmptyAlbum,
}

impl ApiError {
    /// Whether the failure happened before any response arrived.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Result type for Subsonic client operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors raised by credential and settings persistence.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to encode stored value: {0}")]
    Encode(#[from] serde_json::Error),

    #[cfg(not(target_arch = "wasm32"))]
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}
