//! Shared application state

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::RwLock;

use crate::application::ports::outbound::GameDataPort;
use crate::application::services::{ResolutionService, RuleSetService};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::persistence::SnapshotStore;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    pub game_data: Arc<SnapshotStore>,
    /// The authoring session's rule set
    pub rule_set: RwLock<RuleSetService>,
    pub resolution_service: ResolutionService<SnapshotStore>,
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self> {
        // Materialize the game data snapshot before serving anything
        let game_data = Arc::new(SnapshotStore::load(&config.snapshot_path).await?);
        let load_order = game_data.load_order().await?;

        let rule_set = RwLock::new(RuleSetService::new(load_order));
        let resolution_service = ResolutionService::new(Arc::clone(&game_data));

        Ok(Self {
            config,
            game_data,
            rule_set,
            resolution_service,
        })
    }
}
