//! HTTP REST API routes

mod record_routes;
mod resolution_routes;
mod rule_routes;

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::infrastructure::state::AppState;

pub use record_routes::*;
pub use resolution_routes::*;
pub use rule_routes::*;

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Game record routes
        .route("/api/npcs", get(record_routes::list_npcs))
        .route("/api/outfits", get(record_routes::list_outfits))
        .route("/api/load-order", get(record_routes::get_load_order))
        // Rule set routes
        .route("/api/rules", get(rule_routes::list_rules))
        .route("/api/rules", post(rule_routes::create_rule))
        .route("/api/rules", delete(rule_routes::clear_rules))
        .route("/api/rules/{id}", delete(rule_routes::delete_rule))
        // Resolution routes
        .route(
            "/api/resolution",
            post(resolution_routes::resolve_distribution),
        )
}
