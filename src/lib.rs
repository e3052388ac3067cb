//! Memory Graph View
//!
//! The graph engine behind the memory graph visualization: it turns a raw
//! list of entities and relationships into a deduplicated, filtered,
//! laid-out graph ready for rendering.
//!
//! # Modules
//!
//! - `types`: Core data structures (Entity, Relationship, GraphNode, GraphLink)
//! - `validation`: Shape checks on incoming JSON records
//! - `normalize`: Entity normalizer and visual policy (colors, sizes)
//! - `pipeline`: Deduplication, orphan/inferred filtering and focus
//! - `layout`: Force, hierarchical and circular layouts
//! - `view`: View state controller and graph sources
//! - `api`: HTTP and WebSocket control surface
//! - `config`: Environment configuration
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use memory_graph_view::view::{FileSource, ViewController};
//!
//! #[tokio::main]
//! async fn main() {
//!     let source = Arc::new(FileSource::new("memory.jsonl"));
//!     let controller = ViewController::new(source);
//!     controller.refresh().await.unwrap();
//!     controller.set_focus(Some("alice".to_string())).await.unwrap();
//!     println!("{} nodes", controller.graph().nodes.len());
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod layout;
pub mod normalize;
pub mod pipeline;
pub mod types;
pub mod validation;
pub mod view;

// Re-export commonly used items at crate root
pub use error::{GraphViewError, GraphViewResult};
pub use layout::{LayoutParams, LayoutType, Position};
pub use normalize::{normalize, VisualPolicy};
pub use pipeline::run_pipeline;
pub use types::{Entity, GraphData, GraphLink, GraphNode, GraphPayload, Relationship, Scalar};
pub use view::{ViewController, ViewSettings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
