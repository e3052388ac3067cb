//! Events published by the controller

use std::sync::Arc;

use serde::Serialize;

use crate::types::GraphData;

use super::ViewSettings;

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewEvent {
    /// A freshly computed render-ready graph
    Snapshot {
        graph: Arc<GraphData>,
        settings: ViewSettings,
    },
}

/// Event wrapper with publication metadata
#[derive(Clone, Debug, Serialize)]
pub struct ViewMessage {
    #[serde(flatten)]
    pub event: ViewEvent,

    /// Monotonically increasing, one per published snapshot
    pub sequence_id: u64,

    /// Unix timestamp when the snapshot was published
    pub timestamp: i64,
}
