//! Game record API routes - the loaded NPC/outfit universe

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::application::dto::{LoadOrderResponseDto, NpcResponseDto, OutfitResponseDto};
use crate::application::ports::outbound::GameDataPort;
use crate::infrastructure::state::AppState;

/// List every NPC in the loaded universe
pub async fn list_npcs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<NpcResponseDto>>, (StatusCode, String)> {
    let npcs = state
        .game_data
        .npc_universe()
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(npcs.iter().map(NpcResponseDto::from).collect()))
}

/// List outfits available to the authoring picker
pub async fn list_outfits(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<OutfitResponseDto>>, (StatusCode, String)> {
    let outfits = state
        .game_data
        .outfits()
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(outfits.iter().map(OutfitResponseDto::from).collect()))
}

/// The load order of every contributing source file
pub async fn get_load_order(
    State(state): State<Arc<AppState>>,
) -> Result<Json<LoadOrderResponseDto>, (StatusCode, String)> {
    let load_order = state
        .game_data
        .load_order()
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(LoadOrderResponseDto::from(&load_order)))
}
