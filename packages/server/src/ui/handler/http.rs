//! HTTP read API: health check and room inspection.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::RoomName,
    infrastructure::dto::{RoomDetailDto, RoomSummaryDto},
    ui::state::AppState,
};

/// Health check endpoint.
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// List all active rooms with their member names and log sizes.
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let mut summaries = Vec::new();
    for name in state.registry.room_names().await {
        // A room may be deleted between the listing and the lookup.
        if let Some(handle) = state.registry.get(&name).await {
            summaries.push(RoomSummaryDto::from_room(&*handle.lock().await));
        }
    }
    Json(summaries)
}

/// Inspect one room by name.
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    let name = RoomName::new(room).map_err(|_| StatusCode::NOT_FOUND)?;
    match state.registry.get(&name).await {
        Some(handle) => Ok(Json(RoomDetailDto::from_room(&*handle.lock().await))),
        None => Err(StatusCode::NOT_FOUND),
    }
}
