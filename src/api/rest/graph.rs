//! Graph endpoints - snapshot, stats and node detail

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use super::{ApiError, ApiResponse};
use crate::api::websocket::state::AppState;
use crate::types::{GraphLink, GraphNode};

/// GET /api/graph - Current snapshot
///
/// Clients recovering from a WebSocket gap read this and continue from
/// the returned sequence_id.
pub async fn get_graph(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let graph = state.controller.graph();
    Json(ApiResponse::new(graph, state.current_sequence_id()))
}

/// GET /api/graph/stats
pub async fn get_stats(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let stats = state.controller.graph().stats();
    Json(ApiResponse::new(stats, state.current_sequence_id()))
}

/// Node with the links touching it
#[derive(Debug, Serialize)]
pub struct NodeDetail {
    #[serde(flatten)]
    pub node: GraphNode,
    pub outgoing_links: Vec<GraphLink>,
    pub incoming_links: Vec<GraphLink>,
}

/// GET /api/graph/nodes/:id
pub async fn get_node(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let graph = state.controller.graph();

    // URL decode the id (handles spaces and special chars)
    let decoded_id = urlencoding::decode(&id)
        .unwrap_or_else(|_| id.clone().into())
        .into_owned();

    match graph.node(&decoded_id) {
        Some(node) => {
            let outgoing_links = graph
                .links
                .iter()
                .filter(|l| l.source == decoded_id)
                .cloned()
                .collect();
            let incoming_links = graph
                .links
                .iter()
                .filter(|l| l.target == decoded_id)
                .cloned()
                .collect();

            let detail = NodeDetail {
                node: node.clone(),
                outgoing_links,
                incoming_links,
            };
            (
                StatusCode::OK,
                Json(ApiResponse::new(detail, state.current_sequence_id())),
            )
                .into_response()
        }
        None => {
            let error = ApiError::not_found(format!("Node '{}' not in current view", decoded_id));
            (StatusCode::NOT_FOUND, Json(error)).into_response()
        }
    }
}
