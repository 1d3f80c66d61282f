//! Game data port - Interface to the loaded snapshot of game records
//!
//! The engine consumes game data as fully-materialized, immutable snapshots.
//! Reading plugin files and resolving record cross-references belongs to the
//! data-access collaborator behind this port; resolution never reaches back
//! into it mid-pass.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::entities::{NpcRecord, OutfitRecord};
use crate::domain::value_objects::{KeywordTable, LoadOrder};

/// Port for the plugin-data-access collaborator
#[async_trait]
pub trait GameDataPort: Send + Sync {
    /// Every NPC record in the loaded universe
    async fn npc_universe(&self) -> Result<Vec<NpcRecord>>;

    /// Outfit records available to the authoring picker
    async fn outfits(&self) -> Result<Vec<OutfitRecord>>;

    /// The keyword identifier-to-name table for the loaded universe
    async fn keyword_table(&self) -> Result<KeywordTable>;

    /// The load order of every contributing source file
    async fn load_order(&self) -> Result<LoadOrder>;
}
