//! Data types for the graph view engine
//!
//! Input records (`Entity`, `Relationship`) arrive from the memory index,
//! derived records (`GraphNode`, `GraphLink`) are what the render layer reads.

mod entity;
mod graph;
mod link;
mod node;
mod relationship;
mod scalar;

pub use entity::Entity;
pub use graph::{GraphData, GraphPayload, GraphStats, TypeCount};
pub use link::GraphLink;
pub use node::GraphNode;
pub use relationship::{Relationship, DEFAULT_STRENGTH};
pub use scalar::{Attributes, Scalar};

/// Type tag used when an entity arrives without one
pub const UNKNOWN_TYPE: &str = "unknown";

/// Attribute key marking a node as derived rather than extracted
pub const INFERRED_ATTRIBUTE: &str = "inferred";
