use thiserror::Error;

/// Custom error types for sharecrush
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory walk error: {0}")]
    Walkdir(#[from] walkdir::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("External dependency '{0}' not found in PATH")]
    DependencyNotFound(String),

    #[error("Failed to start command '{0}': {1}")]
    CommandStart(String, #[source] std::io::Error),

    #[error("Command '{0}' failed: {1}")]
    CommandFailed(String, String),

    #[error("Metadata probe failed for '{0}': {1}")]
    Probe(String, String),

    #[error("Invalid resolution string '{0}', expected '<width>x<height>'")]
    InvalidResolution(String),

    #[error("Model file error: {0}")]
    Model(String),

    #[error("No samples recorded for platform '{platform}' and codec '{codec}'")]
    EmptyBucket { platform: String, codec: String },

    #[error("No compression rule matches: {0}")]
    NoMatchingRule(String),

    #[error("Target bitrate is zero for '{0}', nothing to search against")]
    ZeroTargetBitrate(String),
}

/// Result type for sharecrush operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;
