/// Error types for the piston-loadtest crate.
use thiserror::Error;

/// Application-level errors.
///
/// Only failures that end the run travel as `AppError` all the way to `main`.
/// Execute-request failures are folded into a `RequestResult` instead.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
