//! REST API module for HTTP endpoints
//!
//! - `GET /api/graph` - Current render-ready snapshot
//! - `GET /api/graph/stats` - Node and link counts per type
//! - `GET /api/graph/nodes/:id` - One node with its links
//! - `GET|PATCH /api/view` - Read or update view toggles
//! - `PUT /api/view/focus/:id`, `DELETE /api/view/focus` - Focus mode
//! - `POST /api/refresh` - Re-pull the payload from the source

pub mod graph;
pub mod view;

use serde::Serialize;

/// Standard API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Sequence ID of the snapshot the data belongs to
    pub sequence_id: u64,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T, sequence_id: u64) -> Self {
        Self { data, sequence_id }
    }
}

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "NOT_FOUND".to_string(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "BAD_REQUEST".to_string(),
        }
    }

    pub fn source(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "SOURCE_ERROR".to_string(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "INTERNAL_ERROR".to_string(),
        }
    }
}
