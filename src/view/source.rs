//! Graph sources: where payloads come from

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::error::GraphViewResult;
use crate::types::GraphPayload;
use crate::validation::parse_payload_str;

/// Fetch layer feeding the controller
#[async_trait]
pub trait GraphSource: Send + Sync {
    /// Pull the current `{entities, relationships}` payload
    async fn fetch(&self) -> GraphViewResult<GraphPayload>;
}

/// Snapshot file on disk: one JSON document or JSONL records
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl GraphSource for FileSource {
    async fn fetch(&self) -> GraphViewResult<GraphPayload> {
        if !tokio::fs::try_exists(&self.path).await? {
            warn!(path = %self.path.display(), "Graph file not found, serving empty graph");
            return Ok(GraphPayload::default());
        }

        let content = tokio::fs::read_to_string(&self.path).await?;
        let payload = parse_payload_str(&content)?;
        debug!(
            path = %self.path.display(),
            entities = payload.entity_count(),
            relationships = payload.relationship_count(),
            "Loaded graph file"
        );
        Ok(payload)
    }
}

/// In-memory source, replaceable at runtime
#[derive(Default)]
pub struct StaticSource {
    payload: RwLock<GraphPayload>,
}

impl StaticSource {
    pub fn new(payload: GraphPayload) -> Self {
        Self {
            payload: RwLock::new(payload),
        }
    }

    /// Replace the payload served by the next fetch
    pub fn set(&self, payload: GraphPayload) {
        *self.payload.write() = payload;
    }
}

#[async_trait]
impl GraphSource for StaticSource {
    async fn fetch(&self) -> GraphViewResult<GraphPayload> {
        Ok(self.payload.read().clone())
    }
}
