//! Rule set API routes - authoring the distribution entries

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::dto::{
    parse_entry_request, CreateEntryRequestDto, EntryResponseDto, RuleSetResponseDto,
};
use crate::application::services::RuleSetError;
use crate::domain::value_objects::EntryId;
use crate::infrastructure::state::AppState;

/// The current rule set
pub async fn list_rules(State(state): State<Arc<AppState>>) -> Json<RuleSetResponseDto> {
    let rule_set = state.rule_set.read().await;
    Json(RuleSetResponseDto::from(&*rule_set))
}

/// Create a distribution entry
pub async fn create_rule(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateEntryRequestDto>,
) -> Result<(StatusCode, Json<EntryResponseDto>), (StatusCode, String)> {
    let request = parse_entry_request(req).map_err(|e| (StatusCode::BAD_REQUEST, e))?;

    let mut rule_set = state.rule_set.write().await;
    let entry = rule_set
        .add_entry(request)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    Ok((StatusCode::CREATED, Json(EntryResponseDto::from(&entry))))
}

/// Remove a distribution entry
pub async fn delete_rule(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    let uuid = Uuid::parse_str(&id)
        .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid entry ID".to_string()))?;

    let mut rule_set = state.rule_set.write().await;
    rule_set
        .remove_entry(EntryId::from_uuid(uuid))
        .map_err(|e| match e {
            RuleSetError::EntryNotFound(_) => (StatusCode::NOT_FOUND, e.to_string()),
            _ => (StatusCode::BAD_REQUEST, e.to_string()),
        })?;

    Ok(StatusCode::NO_CONTENT)
}

/// Clear the rule set
pub async fn clear_rules(State(state): State<Arc<AppState>>) -> StatusCode {
    let mut rule_set = state.rule_set.write().await;
    rule_set.clear();
    StatusCode::NO_CONTENT
}
