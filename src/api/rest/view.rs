//! View endpoints - toggles, focus and refresh

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::{ApiError, ApiResponse};
use crate::api::websocket::state::AppState;
use crate::error::GraphViewResult;
use crate::view::{Publication, ViewSettings, ViewSettingsPatch};

/// Settings after an update, and whether the recompute was published
#[derive(Debug, Serialize)]
pub struct ViewUpdate {
    pub settings: ViewSettings,
    pub published: bool,
}

/// GET /api/view
pub async fn get_view(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::new(
        state.controller.settings(),
        state.current_sequence_id(),
    ))
}

/// PATCH /api/view - partial toggle update
pub async fn patch_view(
    State(state): State<Arc<AppState>>,
    Json(patch): Json<ViewSettingsPatch>,
) -> Response {
    if patch.is_empty() {
        let error = ApiError::bad_request("Patch contains no settings");
        return (StatusCode::BAD_REQUEST, Json(error)).into_response();
    }
    let result = state.controller.update(patch).await;
    respond(&state, result)
}

/// PUT /api/view/focus/:id
pub async fn set_focus(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    let decoded_id = urlencoding::decode(&id)
        .unwrap_or_else(|_| id.clone().into())
        .into_owned();
    let result = state.controller.set_focus(Some(decoded_id)).await;
    respond(&state, result)
}

/// DELETE /api/view/focus
pub async fn clear_focus(State(state): State<Arc<AppState>>) -> Response {
    let result = state.controller.set_focus(None).await;
    respond(&state, result)
}

/// POST /api/refresh - re-pull from the graph source
pub async fn refresh(State(state): State<Arc<AppState>>) -> Response {
    match state.controller.refresh().await {
        Ok(publication) => respond(&state, Ok(publication)),
        Err(e) => {
            let error = ApiError::source(e.to_string());
            (StatusCode::BAD_GATEWAY, Json(error)).into_response()
        }
    }
}

fn respond(state: &AppState, result: GraphViewResult<Publication>) -> Response {
    match result {
        Ok(publication) => {
            let update = ViewUpdate {
                settings: state.controller.settings(),
                published: publication.is_published(),
            };
            Json(ApiResponse::new(update, state.current_sequence_id())).into_response()
        }
        Err(e) => {
            let error = ApiError::internal(e.to_string());
            (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
        }
    }
}
