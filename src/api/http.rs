//! HTTP server setup with Axum

use std::sync::Arc;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use super::rest::{graph, view};
use super::websocket::{handler::ws_handler, state::AppState};

/// Create the Axum router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS configuration - allow all origins for development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // WebSocket endpoint
        .route("/ws", get(ws_handler))
        // Health check
        .route("/health", get(health_check))
        // Graph snapshot
        .route("/api/graph", get(graph::get_graph))
        .route("/api/graph/stats", get(graph::get_stats))
        .route("/api/graph/nodes/:id", get(graph::get_node))
        // View toggles
        .route("/api/view", get(view::get_view).patch(view::patch_view))
        .route("/api/view/focus", delete(view::clear_focus))
        .route("/api/view/focus/:id", put(view::set_focus))
        .route("/api/refresh", post(view::refresh))
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Entity, GraphPayload, Relationship};
    use crate::view::{StaticSource, ViewController};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::util::ServiceExt;

    async fn app() -> Router {
        let payload = GraphPayload::with_data(
            vec![
                Entity::new("a", "Alice", "person"),
                Entity::new("b", "Acme Corp", "org"),
                Entity::new("c", "Carol", "person"),
            ],
            vec![
                Relationship::new("a", "b", "works_at"),
                Relationship::new("c", "b", "works_at"),
            ],
        );
        let controller = Arc::new(ViewController::new(Arc::new(StaticSource::new(payload))));
        controller.refresh().await.unwrap();
        create_router(Arc::new(AppState::new(controller)))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = app()
            .await
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn test_get_graph() {
        let response = app()
            .await
            .oneshot(Request::builder().uri("/api/graph").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["data"]["nodes"].as_array().unwrap().len(), 3);
        assert_eq!(json["data"]["links"].as_array().unwrap().len(), 2);
        assert_eq!(json["sequence_id"], 1);
        assert!(json["data"]["nodes"][0]["x"].is_number());
    }

    #[tokio::test]
    async fn test_focus_route_decodes_id() {
        let app = app().await;
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/api/view/focus/a")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["settings"]["focus_id"], "a");

        let response = app
            .oneshot(Request::builder().uri("/api/graph").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["data"]["nodes"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_patch_view() {
        let response = app()
            .await
            .oneshot(
                Request::builder()
                    .method("PATCH")
                    .uri("/api/view")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"layout_type":"circular","spacing":50}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["settings"]["layout_type"], "circular");
        assert_eq!(json["data"]["published"], true);
    }

    #[tokio::test]
    async fn test_empty_patch_rejected() {
        let response = app()
            .await
            .oneshot(
                Request::builder()
                    .method("PATCH")
                    .uri("/api/view")
                    .header("content-type", "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_node_404() {
        let response = app()
            .await
            .oneshot(
                Request::builder()
                    .uri("/api/graph/nodes/ghost")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_clear_focus() {
        let app = app().await;
        app.clone()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/api/view/focus/a")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/view/focus")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert!(json["data"]["settings"]["focus_id"].is_null());
    }
}
