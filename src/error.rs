//! Error types for the graph view engine
//!
//! The pipeline stages themselves are infallible; errors only come from
//! fetching payloads, parsing configuration and running background work.

use thiserror::Error;

/// Result type for graph view operations
pub type GraphViewResult<T> = Result<T, GraphViewError>;

#[derive(Debug, Error)]
pub enum GraphViewError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Graph source error: {0}")]
    Source(String),

    #[error("Invalid setting: {0}")]
    InvalidSetting(String),

    #[error("Layout task failed: {0}")]
    Layout(String),
}
