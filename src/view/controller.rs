//! Controller orchestrating fetch, pipeline and publication

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::error::{GraphViewError, GraphViewResult};
use crate::layout::{LayoutParams, LayoutType, Position, SeedPositions};
use crate::normalize::VisualPolicy;
use crate::pipeline::run_pipeline;
use crate::types::{GraphData, GraphPayload};

use super::events::{ViewEvent, ViewMessage};
use super::settings::{ViewSettings, ViewSettingsPatch};
use super::source::GraphSource;

/// Outcome of a recompute request
#[derive(Debug, Clone)]
pub enum Publication {
    /// The result became the current snapshot
    Published {
        sequence_id: u64,
        graph: Arc<GraphData>,
    },
    /// A newer request started before this one finished; its result was
    /// discarded
    Superseded,
}

impl Publication {
    pub fn is_published(&self) -> bool {
        matches!(self, Publication::Published { .. })
    }

    pub fn graph(&self) -> Option<&Arc<GraphData>> {
        match self {
            Publication::Published { graph, .. } => Some(graph),
            Publication::Superseded => None,
        }
    }
}

struct ViewState {
    payload: Arc<GraphPayload>,
    settings: ViewSettings,
    graph: Arc<GraphData>,
    /// Last known position of every node ever published
    seeds: Arc<SeedPositions>,
}

/// Owns toggles, payload and the published snapshot.
///
/// Settings are only mutated under the write lock, and each pipeline run
/// works on its own clone of them, so a running layout never observes a
/// half-applied change. Every run carries a generation number; only the
/// newest generation may publish.
pub struct ViewController {
    source: Arc<dyn GraphSource>,
    policy: Arc<VisualPolicy>,
    state: RwLock<ViewState>,
    generation: AtomicU64,
    fetch_generation: AtomicU64,
    sequence_counter: AtomicU64,
    event_tx: broadcast::Sender<ViewMessage>,
}

impl ViewController {
    /// Create a controller with default settings and an empty payload
    pub fn new(source: Arc<dyn GraphSource>) -> Self {
        Self::with_settings(source, ViewSettings::default())
    }

    pub fn with_settings(source: Arc<dyn GraphSource>, settings: ViewSettings) -> Self {
        // Slow subscribers that fall 64 snapshots behind get a lag error and
        // should re-read the current graph
        let (event_tx, _) = broadcast::channel(64);

        Self {
            source,
            policy: Arc::new(VisualPolicy::default()),
            state: RwLock::new(ViewState {
                payload: Arc::new(GraphPayload::default()),
                settings,
                graph: Arc::new(GraphData::default()),
                seeds: Arc::new(SeedPositions::new()),
            }),
            generation: AtomicU64::new(0),
            fetch_generation: AtomicU64::new(0),
            sequence_counter: AtomicU64::new(0),
            event_tx,
        }
    }

    /// Replace the visual policy (colors, sizes)
    pub fn with_policy(mut self, policy: VisualPolicy) -> Self {
        self.policy = Arc::new(policy);
        self
    }

    pub fn settings(&self) -> ViewSettings {
        self.state.read().settings.clone()
    }

    /// The last published graph
    pub fn graph(&self) -> Arc<GraphData> {
        self.state.read().graph.clone()
    }

    pub fn payload(&self) -> Arc<GraphPayload> {
        self.state.read().payload.clone()
    }

    /// Number of snapshots published so far
    pub fn current_sequence_id(&self) -> u64 {
        self.sequence_counter.load(Ordering::SeqCst)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ViewMessage> {
        self.event_tx.subscribe()
    }

    /// Re-pull the payload from the source and recompute.
    ///
    /// A fetch that completes after a newer fetch was started is dropped.
    /// On error the previous payload and snapshot stay in place.
    pub async fn refresh(&self) -> GraphViewResult<Publication> {
        let ticket = self.fetch_generation.fetch_add(1, Ordering::SeqCst) + 1;

        let payload = match self.source.fetch().await {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "Graph fetch failed");
                return Err(e);
            }
        };

        {
            let mut state = self.state.write();
            if self.fetch_generation.load(Ordering::SeqCst) != ticket {
                debug!(ticket, "Discarding stale fetch result");
                return Ok(Publication::Superseded);
            }
            info!(
                entities = payload.entity_count(),
                relationships = payload.relationship_count(),
                "Graph payload refreshed"
            );
            state.payload = Arc::new(payload);
        }

        self.recompute().await
    }

    /// Replace the payload directly, bypassing the source
    pub async fn load(&self, payload: GraphPayload) -> GraphViewResult<Publication> {
        self.fetch_generation.fetch_add(1, Ordering::SeqCst);
        self.state.write().payload = Arc::new(payload);
        self.recompute().await
    }

    /// Run the pipeline for the current payload and settings
    pub async fn recompute(&self) -> GraphViewResult<Publication> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let (payload, settings, seeds) = {
            let state = self.state.read();
            (
                state.payload.clone(),
                state.settings.clone(),
                state.seeds.clone(),
            )
        };
        let policy = self.policy.clone();
        let task_settings = settings.clone();

        let graph = tokio::task::spawn_blocking(move || {
            run_pipeline(&payload, &task_settings, &policy, &seeds)
        })
        .await
        .map_err(|e| GraphViewError::Layout(e.to_string()))?;
        let graph = Arc::new(graph);

        let mut state = self.state.write();
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "Discarding superseded recompute");
            return Ok(Publication::Superseded);
        }

        state.seeds = Arc::new(next_seeds(&state.seeds, &state.payload, &graph));
        state.graph = graph.clone();

        // Published while still holding the lock so sequence ids follow
        // generation order
        let sequence_id = self.publish(ViewEvent::Snapshot {
            graph: graph.clone(),
            settings,
        });
        drop(state);

        info!(
            sequence_id,
            nodes = graph.nodes.len(),
            links = graph.links.len(),
            "Published graph snapshot"
        );
        Ok(Publication::Published { sequence_id, graph })
    }

    fn publish(&self, event: ViewEvent) -> u64 {
        let seq = self.sequence_counter.fetch_add(1, Ordering::SeqCst) + 1;
        let msg = ViewMessage {
            event,
            sequence_id: seq,
            timestamp: chrono::Utc::now().timestamp(),
        };
        // No receivers is fine
        let _ = self.event_tx.send(msg);
        seq
    }

    /// Apply a partial settings update and recompute
    pub async fn update(&self, patch: ViewSettingsPatch) -> GraphViewResult<Publication> {
        self.modify(|settings| patch.apply(settings)).await
    }

    pub async fn set_deduplicate(&self, enabled: bool) -> GraphViewResult<Publication> {
        self.modify(|s| s.deduplicate = enabled).await
    }

    pub async fn set_show_orphans(&self, show: bool) -> GraphViewResult<Publication> {
        self.modify(|s| s.show_orphans = show).await
    }

    pub async fn set_show_inferred(&self, show: bool) -> GraphViewResult<Publication> {
        self.modify(|s| s.show_inferred = show).await
    }

    /// Focus on one node; `None` returns to the full view
    pub async fn set_focus(&self, focus_id: Option<String>) -> GraphViewResult<Publication> {
        self.modify(|s| s.focus_id = focus_id).await
    }

    pub async fn set_layout_type(&self, layout_type: LayoutType) -> GraphViewResult<Publication> {
        self.modify(|s| s.layout_type = layout_type).await
    }

    pub async fn set_layout_params(&self, params: LayoutParams) -> GraphViewResult<Publication> {
        self.modify(|s| s.params = params).await
    }

    /// Number of node positions currently remembered for the force layout
    pub fn remembered_positions(&self) -> usize {
        self.state.read().seeds.len()
    }

    /// Forget remembered positions so the next force layout starts fresh
    pub async fn reset_positions(&self) -> GraphViewResult<Publication> {
        self.state.write().seeds = Arc::new(SeedPositions::new());
        self.recompute().await
    }

    async fn modify(&self, f: impl FnOnce(&mut ViewSettings)) -> GraphViewResult<Publication> {
        {
            let mut state = self.state.write();
            f(&mut state.settings);
        }
        self.recompute().await
    }
}

/// Published positions layered over the previous seeds, restricted to ids
/// still present in the payload. Nodes hidden by a toggle keep their last
/// position; nodes gone from the payload are forgotten.
fn next_seeds(previous: &SeedPositions, payload: &GraphPayload, graph: &GraphData) -> SeedPositions {
    let live: HashSet<&str> = payload.entities.iter().map(|e| e.id.as_str()).collect();

    let mut seeds: SeedPositions = previous
        .iter()
        .filter(|(id, _)| live.contains(id.as_str()))
        .map(|(id, pos)| (id.clone(), *pos))
        .collect();
    for node in &graph.nodes {
        if let Some((x, y)) = node.position() {
            seeds.insert(node.id.clone(), Position::new(x, y));
        }
    }
    seeds
}
