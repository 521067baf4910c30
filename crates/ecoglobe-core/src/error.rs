// crates/ecoglobe-core/src/error.rs

use thiserror::Error;

/// Every failure the core can report.
///
/// Malformed cells and unresolved country names are *not* errors: they
/// degrade to `None` and render with the fallback color.
#[derive(Debug, Error)]
pub enum GlobeError {
    /// The server answered, but not with a 2xx status. Fatal at startup.
    #[error("HTTP {status} while reading {source_name}")]
    Fetch { source_name: String, status: u16 },

    #[cfg(feature = "fetch")]
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GlobeError>;
