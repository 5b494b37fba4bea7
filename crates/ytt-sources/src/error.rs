//! Error types for duration sources.

use thiserror::Error;

/// Result type for source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Errors that can occur while fetching video metadata.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("yt-dlp not found in PATH")]
    YtDlpNotFound,

    #[error("yt-dlp failed: {stderr}")]
    YtDlpFailed { stderr: String },

    #[error("YOUTUBE_API_KEY environment variable not set")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}
