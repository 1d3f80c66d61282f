use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::services::{NewEntryRequest, RuleSetService};
use crate::domain::entities::{DistributionEntry, Targeting};
use crate::domain::value_objects::{
    FilterCriteria, FormKey, FormKeyParseError, LevelRange,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterCriteriaDto {
    pub is_female: Option<bool>,
    pub is_unique: Option<bool>,
    pub is_templated: Option<bool>,
    pub is_child: Option<bool>,
    pub is_summonable: Option<bool>,
    pub is_leveled: Option<bool>,
    #[serde(default)]
    pub factions: Vec<String>,
    #[serde(default)]
    pub races: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub min_level: Option<u16>,
    pub max_level: Option<u16>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEntryRequestDto {
    /// Target outfit form key; omit to author an outfit removal
    pub outfit: Option<String>,
    pub source_file: String,
    #[serde(default = "default_chance")]
    pub chance: u8,
    /// Explicit NPC targeting; mutually exclusive with `criteria`
    pub npcs: Option<Vec<String>>,
    /// Criteria targeting; mutually exclusive with `npcs`
    pub criteria: Option<FilterCriteriaDto>,
}

fn default_chance() -> u8 {
    100
}

impl From<&FilterCriteria> for FilterCriteriaDto {
    fn from(criteria: &FilterCriteria) -> Self {
        Self {
            is_female: criteria.gender.as_flag(),
            is_unique: criteria.unique.as_flag(),
            is_templated: criteria.templated.as_flag(),
            is_child: criteria.child.as_flag(),
            is_summonable: criteria.summonable.as_flag(),
            is_leveled: criteria.leveled.as_flag(),
            factions: criteria.factions.iter().map(|k| k.to_string()).collect(),
            races: criteria.races.iter().map(|k| k.to_string()).collect(),
            keywords: criteria.keywords.iter().map(|k| k.to_string()).collect(),
            min_level: criteria.levels.min,
            max_level: criteria.levels.max,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryResponseDto {
    pub id: String,
    pub outfit: Option<String>,
    pub source_file: String,
    pub priority: u32,
    pub chance: u8,
    /// Targeting-mode summary for list display
    pub targeting: String,
    /// Full criteria for editing; absent for override targeting
    pub criteria: Option<FilterCriteriaDto>,
    /// Explicit NPC list for editing; absent for criteria targeting
    pub npcs: Option<Vec<String>>,
}

impl From<&DistributionEntry> for EntryResponseDto {
    fn from(entry: &DistributionEntry) -> Self {
        let (criteria, npcs) = match &entry.targeting {
            Targeting::Criteria(criteria) => (Some(FilterCriteriaDto::from(criteria)), None),
            Targeting::Npcs(keys) => (
                None,
                Some(keys.iter().map(|k| k.to_string()).collect()),
            ),
        };

        Self {
            id: entry.id.to_string(),
            outfit: entry.outfit.as_ref().map(|o| o.to_string()),
            source_file: entry.source_file.clone(),
            priority: entry.priority,
            chance: entry.chance,
            targeting: entry.targeting.summary(),
            criteria,
            npcs,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSetResponseDto {
    pub modified_at: DateTime<Utc>,
    pub entries: Vec<EntryResponseDto>,
}

impl From<&RuleSetService> for RuleSetResponseDto {
    fn from(rule_set: &RuleSetService) -> Self {
        Self {
            modified_at: rule_set.modified_at(),
            entries: rule_set.entries().iter().map(EntryResponseDto::from).collect(),
        }
    }
}

pub fn parse_form_key(raw: &str) -> Result<FormKey, String> {
    raw.parse()
        .map_err(|e: FormKeyParseError| e.to_string())
}

fn parse_form_keys(raw: &[String]) -> Result<Vec<FormKey>, String> {
    raw.iter().map(|key| parse_form_key(key)).collect()
}

fn parse_criteria(dto: FilterCriteriaDto) -> Result<FilterCriteria, String> {
    Ok(FilterCriteria {
        gender: dto.is_female.into(),
        unique: dto.is_unique.into(),
        templated: dto.is_templated.into(),
        child: dto.is_child.into(),
        summonable: dto.is_summonable.into(),
        leveled: dto.is_leveled.into(),
        factions: parse_form_keys(&dto.factions)?,
        races: parse_form_keys(&dto.races)?,
        keywords: parse_form_keys(&dto.keywords)?,
        levels: LevelRange::new(dto.min_level, dto.max_level),
    })
}

/// Convert an entry-creation request into the service request, enforcing the
/// targeting-mode exclusivity the domain model expresses as an enum.
pub fn parse_entry_request(dto: CreateEntryRequestDto) -> Result<NewEntryRequest, String> {
    let outfit = dto.outfit.as_deref().map(parse_form_key).transpose()?;

    let targeting = match (dto.npcs, dto.criteria) {
        (Some(_), Some(_)) => {
            return Err("Give either 'npcs' or 'criteria', not both".to_string());
        }
        (None, None) => {
            return Err("An entry needs a targeting mode: 'npcs' or 'criteria'".to_string());
        }
        (Some(npcs), None) => {
            let keys: BTreeSet<FormKey> = npcs
                .iter()
                .map(|key| parse_form_key(key))
                .collect::<Result<_, _>>()?;
            Targeting::Npcs(keys)
        }
        (None, Some(criteria)) => Targeting::Criteria(parse_criteria(criteria)?),
    };

    Ok(NewEntryRequest {
        outfit,
        targeting,
        source_file: dto.source_file,
        chance: dto.chance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::TraitFilter;

    fn base_dto() -> CreateEntryRequestDto {
        CreateEntryRequestDto {
            outfit: Some("000500:Outfits.esp".to_string()),
            source_file: "Outfits.esp".to_string(),
            chance: 100,
            npcs: None,
            criteria: None,
        }
    }

    fn empty_criteria_dto() -> FilterCriteriaDto {
        FilterCriteriaDto {
            is_female: None,
            is_unique: None,
            is_templated: None,
            is_child: None,
            is_summonable: None,
            is_leveled: None,
            factions: vec![],
            races: vec![],
            keywords: vec![],
            min_level: None,
            max_level: None,
        }
    }

    #[test]
    fn test_targeting_modes_are_mutually_exclusive() {
        let mut dto = base_dto();
        dto.npcs = Some(vec!["000001:Skyrim.esm".to_string()]);
        dto.criteria = Some(empty_criteria_dto());
        assert!(parse_entry_request(dto).is_err());

        assert!(parse_entry_request(base_dto()).is_err());
    }

    #[test]
    fn test_criteria_flags_map_to_tri_state_filters() {
        let mut dto = base_dto();
        dto.criteria = Some(FilterCriteriaDto {
            is_female: Some(true),
            is_unique: Some(false),
            factions: vec!["0000F1:Skyrim.esm".to_string()],
            min_level: Some(5),
            ..empty_criteria_dto()
        });

        let request = parse_entry_request(dto).unwrap();
        match request.targeting {
            Targeting::Criteria(criteria) => {
                assert_eq!(criteria.gender, TraitFilter::Require);
                assert_eq!(criteria.unique, TraitFilter::Exclude);
                assert_eq!(criteria.templated, TraitFilter::Unset);
                assert_eq!(criteria.factions.len(), 1);
                assert_eq!(criteria.levels.min, Some(5));
            }
            Targeting::Npcs(_) => panic!("expected criteria targeting"),
        }
    }

    #[test]
    fn test_entry_response_carries_criteria_back_for_editing() {
        let mut dto = base_dto();
        dto.criteria = Some(FilterCriteriaDto {
            is_female: Some(true),
            min_level: Some(5),
            ..empty_criteria_dto()
        });

        let request = parse_entry_request(dto).unwrap();
        let entry = DistributionEntry::new(
            request.outfit,
            request.targeting,
            request.source_file,
            1,
        )
        .with_chance(request.chance);

        let response = EntryResponseDto::from(&entry);
        assert!(response.npcs.is_none());
        let criteria = response.criteria.expect("criteria targeting");
        assert_eq!(criteria.is_female, Some(true));
        assert_eq!(criteria.is_unique, None);
        assert_eq!(criteria.min_level, Some(5));
    }

    #[test]
    fn test_malformed_form_keys_are_reported() {
        let mut dto = base_dto();
        dto.npcs = Some(vec!["not-a-form-key".to_string()]);
        assert!(parse_entry_request(dto).is_err());
    }
}
