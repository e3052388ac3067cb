//! API module for HTTP and WebSocket endpoints
//!
//! REST endpoints expose the current graph snapshot and the view toggles;
//! the WebSocket endpoint streams every newly published snapshot.

pub mod http;
pub mod rest;
pub mod websocket;

pub use http::create_router;
pub use websocket::state::AppState;
