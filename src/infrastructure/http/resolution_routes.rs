//! Resolution API routes - running the distribution resolver

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::application::dto::ResolutionResponseDto;
use crate::infrastructure::state::AppState;

/// Resolve the current rule set against the loaded NPC universe
pub async fn resolve_distribution(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ResolutionResponseDto>, (StatusCode, String)> {
    let rule_set = state.rule_set.read().await;
    let resolution = state
        .resolution_service
        .resolve_entries(rule_set.entries())
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(ResolutionResponseDto::from(&resolution)))
}
