//! WebSocket application state

use std::sync::Arc;
use tokio::sync::broadcast;

use crate::view::{ViewController, ViewMessage};

/// Shared application state for HTTP and WebSocket handlers
pub struct AppState {
    /// Owner of toggles, payload and the published snapshot
    pub controller: Arc<ViewController>,
}

impl AppState {
    pub fn new(controller: Arc<ViewController>) -> Self {
        Self { controller }
    }

    /// Get the current sequence ID
    pub fn current_sequence_id(&self) -> u64 {
        self.controller.current_sequence_id()
    }

    /// Subscribe to receive published snapshots
    pub fn subscribe(&self) -> broadcast::Receiver<ViewMessage> {
        self.controller.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Entity, GraphPayload, Relationship};
    use crate::view::{StaticSource, ViewEvent};

    fn state() -> AppState {
        let payload = GraphPayload::with_data(
            vec![Entity::new("a", "A", "t"), Entity::new("b", "B", "t")],
            vec![Relationship::new("a", "b", "r")],
        );
        AppState::new(Arc::new(ViewController::new(Arc::new(StaticSource::new(payload)))))
    }

    #[tokio::test]
    async fn test_refresh_increments_sequence() {
        let state = state();
        assert_eq!(state.current_sequence_id(), 0);

        state.controller.refresh().await.unwrap();

        assert_eq!(state.current_sequence_id(), 1);
    }

    #[tokio::test]
    async fn test_subscribe_receives_snapshots() {
        let state = state();
        let mut rx = state.subscribe();

        state.controller.set_show_orphans(true).await.unwrap();

        let msg = rx.recv().await.unwrap();
        assert_eq!(msg.sequence_id, 1);
        assert!(matches!(msg.event, ViewEvent::Snapshot { .. }));
    }
}
