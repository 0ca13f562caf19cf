//! Animanga error types

/// Animanga error types
#[derive(Debug, thiserror::Error)]
pub enum AnimangaError {
    // Upstream/network errors
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("upstream error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The upstream kept answering 429 until the retry policy gave up.
    #[error("rate limited by upstream after {attempts} attempts")]
    RateLimited { attempts: u32 },

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AnimangaError {
    /// Whether the failure may go away if the same request is issued later.
    ///
    /// The response cache swallows every populate failure regardless; this
    /// classification only drives log levels and metrics labels.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(_) | Self::RateLimited { .. } => true,
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for AnimangaError {
    fn from(err: reqwest::Error) -> Self {
        AnimangaError::Http(err.to_string())
    }
}

/// Result type alias for Animanga operations
pub type Result<T> = std::result::Result<T, AnimangaError>;
