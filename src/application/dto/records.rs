use serde::{Deserialize, Serialize};

use crate::domain::entities::{NpcRecord, OutfitRecord};
use crate::domain::value_objects::LoadOrder;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NpcResponseDto {
    pub form_key: String,
    pub display_name: String,
    pub name: Option<String>,
    pub editor_id: Option<String>,
    pub source_file: String,
    pub is_female: bool,
    pub is_unique: bool,
    pub is_templated: bool,
    pub is_child: bool,
    pub is_summonable: bool,
    pub is_leveled: bool,
    pub level: u16,
    pub factions: Vec<String>,
    pub keywords: Vec<String>,
    pub race: Option<String>,
}

impl From<&NpcRecord> for NpcResponseDto {
    fn from(npc: &NpcRecord) -> Self {
        let mut factions: Vec<String> = npc.factions.iter().map(|f| f.to_string()).collect();
        factions.sort();
        let mut keywords: Vec<String> = npc.keywords.iter().cloned().collect();
        keywords.sort();

        Self {
            form_key: npc.form_key.to_string(),
            display_name: npc.display_name(),
            name: npc.name.clone(),
            editor_id: npc.editor_id.clone(),
            source_file: npc.source_file().to_string(),
            is_female: npc.is_female,
            is_unique: npc.is_unique,
            is_templated: npc.is_templated(),
            is_child: npc.is_child,
            is_summonable: npc.is_summonable,
            is_leveled: npc.is_leveled,
            level: npc.level,
            factions,
            keywords,
            race: npc.race.as_ref().map(|r| r.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutfitResponseDto {
    pub form_key: String,
    pub editor_id: Option<String>,
    pub display_name: String,
}

impl From<&OutfitRecord> for OutfitResponseDto {
    fn from(outfit: &OutfitRecord) -> Self {
        Self {
            form_key: outfit.form_key.to_string(),
            editor_id: outfit.editor_id.clone(),
            display_name: outfit.display_name(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadOrderResponseDto {
    /// Source files in load order; later position wins conflicts
    pub files: Vec<String>,
}

impl From<&LoadOrder> for LoadOrderResponseDto {
    fn from(order: &LoadOrder) -> Self {
        Self {
            files: order.files().to_vec(),
        }
    }
}
