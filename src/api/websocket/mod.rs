//! WebSocket module for real-time UI updates
//!
//! Provides WebSocket endpoint at `/ws` that streams every snapshot the
//! view controller publishes.
//!
//! ## Features
//! - Welcome message carrying the current sequence ID
//! - Sequence ID tracking for gap detection
//! - Lag notification so slow clients re-read `/api/graph`

pub mod events;
pub mod handler;
pub mod state;
