//! Error types for ruledist.

use thiserror::Error;

/// Error type for ruledist operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Upstream returned a non-2xx status
    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    /// Transport-level download failure
    #[error("download error: {0}")]
    Download(#[from] reqwest::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for ruledist operations.
pub type Result<T> = std::result::Result<T, Error>;
