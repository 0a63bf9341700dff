//! Error types for Tubetalk.

use thiserror::Error;

/// Library-level error type for Tubetalk operations.
#[derive(Error, Debug)]
pub enum TubetalkError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Error fetching transcript: {0}")]
    FetchFailed(String),

    #[error("Video type detection failed: {0}")]
    ClassificationUnavailable(String),

    #[error("Failed to generate response: {0}")]
    CompletionFailed(String),

    #[error("No video analyzed yet. Analyze a video before asking questions.")]
    NoVideo,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Tubetalk operations.
pub type Result<T> = std::result::Result<T, TubetalkError>;
