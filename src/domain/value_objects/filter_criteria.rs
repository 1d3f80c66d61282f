//! Filter criteria - the predicate bundle describing which NPCs a rule targets

use super::FormKey;
use crate::domain::entities::NpcRecord;

/// A tri-state filter over one boolean NPC attribute.
///
/// `Unset` imposes no constraint; `Require` demands the attribute, `Exclude`
/// demands its absence. Modeled as an explicit enumeration so the
/// "no constraint" state is matched exhaustively instead of hiding behind a
/// nullable boolean.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TraitFilter {
    #[default]
    Unset,
    Require,
    Exclude,
}

impl TraitFilter {
    /// Whether an NPC with the given attribute value passes this filter.
    pub fn admits(self, actual: bool) -> bool {
        match self {
            TraitFilter::Unset => true,
            TraitFilter::Require => actual,
            TraitFilter::Exclude => !actual,
        }
    }

    pub fn is_set(self) -> bool {
        !matches!(self, TraitFilter::Unset)
    }

    /// Optional-flag rendering used at serialization boundaries.
    pub fn as_flag(self) -> Option<bool> {
        match self {
            TraitFilter::Unset => None,
            TraitFilter::Require => Some(true),
            TraitFilter::Exclude => Some(false),
        }
    }
}

impl From<Option<bool>> for TraitFilter {
    fn from(flag: Option<bool>) -> Self {
        match flag {
            None => TraitFilter::Unset,
            Some(true) => TraitFilter::Require,
            Some(false) => TraitFilter::Exclude,
        }
    }
}

/// An inclusive level range; either bound may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelRange {
    pub min: Option<u16>,
    pub max: Option<u16>,
}

impl LevelRange {
    pub fn new(min: Option<u16>, max: Option<u16>) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, level: u16) -> bool {
        if let Some(min) = self.min {
            if level < min {
                return false;
            }
        }
        match self.max {
            Some(max) => level <= max,
            None => true,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Filter criteria for targeting NPCs.
///
/// Trait filters, set-membership filters and the level range combine by
/// conjunction: an NPC matches when every active check passes. An all-unset
/// criteria is the universal matcher and is used deliberately to express
/// "no filter".
///
/// Faction and keyword lists use AND semantics (the NPC must carry all of
/// them); the race list uses OR semantics (the NPC's race must be one of
/// them).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Gender filter; `Require` selects female NPCs
    pub gender: TraitFilter,
    pub unique: TraitFilter,
    /// Templated filter; an NPC with a template reference is templated
    pub templated: TraitFilter,
    pub child: TraitFilter,
    pub summonable: TraitFilter,
    pub leveled: TraitFilter,
    /// Faction identifiers the NPC must belong to (all of them)
    pub factions: Vec<FormKey>,
    /// Race identifiers, any of which the NPC's race may match
    pub races: Vec<FormKey>,
    /// Keyword identifiers the NPC must carry (all of them)
    pub keywords: Vec<FormKey>,
    pub levels: LevelRange,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gender(mut self, filter: TraitFilter) -> Self {
        self.gender = filter;
        self
    }

    pub fn with_unique(mut self, filter: TraitFilter) -> Self {
        self.unique = filter;
        self
    }

    pub fn with_templated(mut self, filter: TraitFilter) -> Self {
        self.templated = filter;
        self
    }

    pub fn with_child(mut self, filter: TraitFilter) -> Self {
        self.child = filter;
        self
    }

    pub fn with_summonable(mut self, filter: TraitFilter) -> Self {
        self.summonable = filter;
        self
    }

    pub fn with_leveled(mut self, filter: TraitFilter) -> Self {
        self.leveled = filter;
        self
    }

    pub fn with_faction(mut self, faction: FormKey) -> Self {
        self.factions.push(faction);
        self
    }

    pub fn with_race(mut self, race: FormKey) -> Self {
        self.races.push(race);
        self
    }

    pub fn with_keyword(mut self, keyword: FormKey) -> Self {
        self.keywords.push(keyword);
        self
    }

    pub fn with_min_level(mut self, min: u16) -> Self {
        self.levels.min = Some(min);
        self
    }

    pub fn with_max_level(mut self, max: u16) -> Self {
        self.levels.max = Some(max);
        self
    }

    /// Returns true if no filters are active.
    pub fn is_empty(&self) -> bool {
        !self.has_trait_filters()
            && self.factions.is_empty()
            && self.races.is_empty()
            && self.keywords.is_empty()
            && self.levels.is_unbounded()
    }

    /// Returns true if any trait filter is active.
    pub fn has_trait_filters(&self) -> bool {
        self.gender.is_set()
            || self.unique.is_set()
            || self.templated.is_set()
            || self.child.is_set()
            || self.summonable.is_set()
            || self.leveled.is_set()
    }

    /// Tests whether the NPC satisfies every active check.
    ///
    /// `keyword_names` must hold this criteria's keyword identifiers already
    /// translated into the snapshot's keyword-name namespace. That translation
    /// happens once per resolution pass, not per NPC; an entry whose keyword
    /// identifiers cannot all be translated must be treated as non-matching
    /// by the caller instead of being evaluated with a shortened list.
    ///
    /// Pure and total: absent NPC data fails the corresponding sub-check, it
    /// never raises an error.
    pub fn matches(&self, npc: &NpcRecord, keyword_names: &[&str]) -> bool {
        if !self.gender.admits(npc.is_female) {
            return false;
        }
        if !self.unique.admits(npc.is_unique) {
            return false;
        }
        if !self.templated.admits(npc.is_templated()) {
            return false;
        }
        if !self.child.admits(npc.is_child) {
            return false;
        }
        if !self.summonable.admits(npc.is_summonable) {
            return false;
        }
        if !self.leveled.admits(npc.is_leveled) {
            return false;
        }

        // Factions: the NPC's memberships must be a superset of the list
        if !self.factions.is_empty()
            && !self.factions.iter().all(|f| npc.factions.contains(f))
        {
            return false;
        }

        // Races: a raceless NPC fails any non-empty race filter
        if !self.races.is_empty() {
            match &npc.race {
                Some(race) if self.races.contains(race) => {}
                _ => return false,
            }
        }

        // Keywords: the NPC must carry every translated keyword name
        if !keyword_names.iter().all(|name| npc.keywords.contains(*name)) {
            return false;
        }

        self.levels.contains(npc.level)
    }
}
