//! Snapshot store - JSON snapshot adapter for the game data port
//!
//! The engine never parses plugin binaries itself. An external dumper walks
//! the load order and exports the filterable slice of every record to one
//! JSON document; this adapter materializes that document once at startup
//! and serves immutable copies through [`GameDataPort`].

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use crate::application::ports::outbound::GameDataPort;
use crate::domain::entities::{NpcRecord, OutfitRecord};
use crate::domain::value_objects::{FormKey, KeywordTable, LoadOrder};

#[derive(Debug, Deserialize)]
struct SnapshotDocument {
    load_order: Vec<String>,
    #[serde(default)]
    npcs: Vec<NpcRow>,
    #[serde(default)]
    outfits: Vec<OutfitRow>,
    #[serde(default)]
    keywords: HashMap<FormKey, String>,
}

#[derive(Debug, Deserialize)]
struct NpcRow {
    form_key: FormKey,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    editor_id: Option<String>,
    #[serde(default)]
    is_female: bool,
    #[serde(default)]
    is_unique: bool,
    #[serde(default)]
    template: Option<FormKey>,
    #[serde(default)]
    is_child: bool,
    #[serde(default)]
    is_summonable: bool,
    #[serde(default)]
    is_leveled: bool,
    #[serde(default = "default_level")]
    level: u16,
    #[serde(default)]
    factions: Vec<FormKey>,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    race: Option<FormKey>,
}

fn default_level() -> u16 {
    1
}

impl From<NpcRow> for NpcRecord {
    fn from(row: NpcRow) -> Self {
        NpcRecord {
            form_key: row.form_key,
            name: row.name,
            editor_id: row.editor_id,
            is_female: row.is_female,
            is_unique: row.is_unique,
            template: row.template,
            is_child: row.is_child,
            is_summonable: row.is_summonable,
            is_leveled: row.is_leveled,
            level: row.level,
            factions: row.factions.into_iter().collect(),
            keywords: row.keywords.into_iter().collect(),
            race: row.race,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OutfitRow {
    form_key: FormKey,
    #[serde(default)]
    editor_id: Option<String>,
}

impl From<OutfitRow> for OutfitRecord {
    fn from(row: OutfitRow) -> Self {
        OutfitRecord {
            form_key: row.form_key,
            editor_id: row.editor_id,
        }
    }
}

/// In-memory snapshot of the loaded game data
pub struct SnapshotStore {
    npcs: Vec<NpcRecord>,
    outfits: Vec<OutfitRecord>,
    keywords: KeywordTable,
    load_order: LoadOrder,
}

impl SnapshotStore {
    /// Load and materialize a snapshot document from disk.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read snapshot file {}", path.display()))?;

        let store = Self::from_json(&raw)?;
        info!(
            npcs = store.npcs.len(),
            outfits = store.outfits.len(),
            keywords = store.keywords.len(),
            files = store.load_order.len(),
            "Loaded game data snapshot from {}",
            path.display()
        );
        Ok(store)
    }

    /// Materialize a snapshot from its JSON text.
    pub fn from_json(raw: &str) -> Result<Self> {
        let document: SnapshotDocument =
            serde_json::from_str(raw).context("Malformed snapshot document")?;

        Ok(Self {
            npcs: document.npcs.into_iter().map(NpcRecord::from).collect(),
            outfits: document.outfits.into_iter().map(OutfitRecord::from).collect(),
            keywords: document.keywords.into_iter().collect(),
            load_order: LoadOrder::new(document.load_order),
        })
    }
}

#[async_trait]
impl GameDataPort for SnapshotStore {
    async fn npc_universe(&self) -> Result<Vec<NpcRecord>> {
        Ok(self.npcs.clone())
    }

    async fn outfits(&self) -> Result<Vec<OutfitRecord>> {
        Ok(self.outfits.clone())
    }

    async fn keyword_table(&self) -> Result<KeywordTable> {
        Ok(self.keywords.clone())
    }

    async fn load_order(&self) -> Result<LoadOrder> {
        Ok(self.load_order.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "load_order": ["Skyrim.esm", "Outfits.esp"],
        "npcs": [
            {
                "form_key": "0001A696:Skyrim.esm",
                "name": "Whiterun Guard",
                "editor_id": "WhiterunGuard",
                "level": 10,
                "factions": ["00002BF9:Skyrim.esm"],
                "keywords": ["ActorTypeNPC"],
                "race": "000131E7:Skyrim.esm"
            },
            {
                "form_key": "000001:Outfits.esp",
                "is_female": true,
                "is_unique": true,
                "template": "0001A696:Skyrim.esm"
            }
        ],
        "outfits": [
            { "form_key": "000500:Outfits.esp", "editor_id": "GuardArmorOutfit" }
        ],
        "keywords": {
            "0006BBE8:Skyrim.esm": "ActorTypeNPC"
        }
    }"#;

    #[test]
    fn test_snapshot_rows_map_to_domain_records() {
        let store = SnapshotStore::from_json(SAMPLE).unwrap();

        assert_eq!(store.npcs.len(), 2);
        let guard = &store.npcs[0];
        assert_eq!(guard.display_name(), "Whiterun Guard");
        assert_eq!(guard.level, 10);
        assert!(guard.keywords.contains("ActorTypeNPC"));
        assert!(guard.race.is_some());
        assert!(!guard.is_templated());

        let templated = &store.npcs[1];
        assert!(templated.is_female);
        assert!(templated.is_unique);
        assert!(templated.is_templated());
        assert_eq!(templated.level, 1);

        assert_eq!(store.outfits[0].display_name(), "GuardArmorOutfit");
        assert_eq!(
            store
                .keywords
                .name_of(&FormKey::new(0x0006BBE8, "Skyrim.esm")),
            Some("ActorTypeNPC")
        );
        assert_eq!(store.load_order.position("outfits.esp"), Some(1));
    }

    #[test]
    fn test_malformed_document_is_rejected() {
        assert!(SnapshotStore::from_json("{").is_err());
        assert!(SnapshotStore::from_json(r#"{"npcs": []}"#).is_err());
    }
}
