//! Distribution entries - one authored or imported outfit rule

use std::collections::BTreeSet;

use crate::domain::entities::NpcRecord;
use crate::domain::value_objects::{EntryId, FilterCriteria, FormKey};

/// How an entry selects the NPCs it applies to.
///
/// The two modes are mutually exclusive: an entry either filters by criteria
/// or enumerates its targets outright.
#[derive(Debug, Clone, PartialEq)]
pub enum Targeting {
    /// Predicate targeting: every NPC satisfying the criteria
    Criteria(FilterCriteria),
    /// Override targeting: exactly the enumerated NPCs, criteria ignored
    Npcs(BTreeSet<FormKey>),
}

impl Targeting {
    /// True for criteria targeting with no active filter, which selects the
    /// whole universe.
    pub fn is_universal(&self) -> bool {
        matches!(self, Targeting::Criteria(criteria) if criteria.is_empty())
    }

    /// Short provenance summary for conflict display.
    pub fn summary(&self) -> String {
        match self {
            Targeting::Npcs(keys) => format!("{} specific NPC(s)", keys.len()),
            Targeting::Criteria(criteria) if criteria.is_empty() => "All NPCs".to_string(),
            Targeting::Criteria(criteria) => {
                let mut kinds = Vec::new();
                if !criteria.keywords.is_empty() {
                    kinds.push("Keyword");
                }
                if !criteria.factions.is_empty() {
                    kinds.push("Faction");
                }
                if !criteria.races.is_empty() {
                    kinds.push("Race");
                }
                if criteria.has_trait_filters() {
                    kinds.push("Trait");
                }
                if kinds.is_empty() {
                    "Specific".to_string()
                } else {
                    kinds.join(", ")
                }
            }
        }
    }
}

/// One outfit-distribution rule.
///
/// Binds a targeting mode to an outfit, and carries the provenance the
/// resolver ranks by: the originating source file and its load-order
/// priority. Chance is carried as data for display and export; the engine
/// never rolls it.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionEntry {
    pub id: EntryId,
    /// Target outfit; `None` removes any distributed outfit
    pub outfit: Option<FormKey>,
    pub targeting: Targeting,
    /// Source file the rule originates from
    pub source_file: String,
    /// Load-order position of the source file; higher wins conflicts
    pub priority: u32,
    /// Distribution chance in percent, 0..=100
    pub chance: u8,
}

impl DistributionEntry {
    pub fn new(
        outfit: Option<FormKey>,
        targeting: Targeting,
        source_file: impl Into<String>,
        priority: u32,
    ) -> Self {
        Self {
            id: EntryId::new(),
            outfit,
            targeting,
            source_file: source_file.into(),
            priority,
            chance: 100,
        }
    }

    pub fn with_chance(mut self, chance: u8) -> Self {
        self.chance = chance;
        self
    }

    /// Tests whether this entry applies to the NPC.
    ///
    /// `keyword_names` carries the criteria's keyword identifiers translated
    /// into the snapshot namespace (empty for override targeting or
    /// keyword-free criteria); see [`FilterCriteria::matches`].
    pub fn targets(&self, npc: &NpcRecord, keyword_names: &[&str]) -> bool {
        match &self.targeting {
            Targeting::Npcs(keys) => keys.contains(&npc.form_key),
            Targeting::Criteria(criteria) => criteria.matches(npc, keyword_names),
        }
    }
}
