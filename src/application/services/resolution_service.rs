//! Resolution service - computes which outfit every NPC ultimately receives
//!
//! For each NPC in the universe the resolver collects every entry that
//! targets it, ranks the candidates the way the downstream distribution
//! engine would (later-loaded files override earlier ones, later rules in a
//! file override earlier rules in the same file), flags exactly one winner,
//! and marks cross-file disagreement as a conflict. The core is a pure
//! computation over immutable snapshots; the service wraps it with data
//! loading and warning logging.

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, instrument, warn};

use crate::application::ports::outbound::GameDataPort;
use crate::domain::aggregates::{AssignmentError, NpcOutfitAssignment, OutfitCandidate};
use crate::domain::entities::{DistributionEntry, NpcRecord, Targeting};
use crate::domain::value_objects::{EntryId, FormKey, KeywordTable};

/// Errors that abort a resolution pass
#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    /// Two universe records share a form key; the data-access layer owns
    /// uniqueness, so this indicates an upstream defect.
    #[error("Duplicate NPC record {0} in the loaded universe")]
    DuplicateNpcRecord(FormKey),

    #[error("Assignment invariant violated: {0}")]
    Assignment(#[from] AssignmentError),
}

/// A recoverable condition absorbed during resolution.
///
/// Warnings never fail the pass; the affected sub-check evaluates to
/// non-match and the rest of the universe resolves normally.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionWarning {
    /// A criteria keyword identifier has no name in the loaded universe, so
    /// its entry can never match.
    UnresolvedKeyword { entry_id: EntryId, keyword: FormKey },
}

impl std::fmt::Display for ResolutionWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolutionWarning::UnresolvedKeyword { entry_id, keyword } => write!(
                f,
                "Entry {} filters on keyword {} which is not in the loaded universe; the entry matches no NPC",
                entry_id, keyword
            ),
        }
    }
}

/// Outcome of one resolution pass
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// One assignment per NPC that matched at least one entry, ordered by
    /// NPC form key
    pub assignments: Vec<NpcOutfitAssignment>,
    pub warnings: Vec<ResolutionWarning>,
}

impl Resolution {
    pub fn conflict_count(&self) -> usize {
        self.assignments.iter().filter(|a| a.has_conflict()).count()
    }
}

/// Service wrapping the pure resolver with snapshot access and logging
pub struct ResolutionService<G: GameDataPort> {
    game_data: Arc<G>,
}

impl<G: GameDataPort> ResolutionService<G> {
    pub fn new(game_data: Arc<G>) -> Self {
        Self { game_data }
    }

    /// Load the universe and keyword table, then resolve the given entries.
    #[instrument(skip(self, entries), fields(entry_count = entries.len()))]
    pub async fn resolve_entries(&self, entries: &[DistributionEntry]) -> Result<Resolution> {
        let universe = self
            .game_data
            .npc_universe()
            .await
            .context("Failed to load the NPC universe")?;
        let keywords = self
            .game_data
            .keyword_table()
            .await
            .context("Failed to load the keyword table")?;

        let resolution = resolve(&universe, entries, &keywords)?;

        for warning in &resolution.warnings {
            warn!("{}", warning);
        }
        info!(
            npcs = universe.len(),
            assignments = resolution.assignments.len(),
            conflicts = resolution.conflict_count(),
            "Resolved outfit distribution"
        );

        Ok(resolution)
    }
}

/// An entry with its keyword identifiers translated for this pass.
///
/// Translation happens here, once per pass; the per-NPC loop only compares
/// names. `keyword_names` is `None` when any identifier failed to translate,
/// which makes the entry unmatchable rather than silently passing the check.
struct CompiledTarget<'a> {
    entry: &'a DistributionEntry,
    authored_index: usize,
    keyword_names: Option<Vec<&'a str>>,
}

impl CompiledTarget<'_> {
    fn targets(&self, npc: &NpcRecord) -> bool {
        match &self.keyword_names {
            Some(names) => self.entry.targets(npc, names),
            None => false,
        }
    }
}

fn compile_targets<'a>(
    entries: &'a [DistributionEntry],
    keywords: &'a KeywordTable,
    warnings: &mut Vec<ResolutionWarning>,
) -> Vec<CompiledTarget<'a>> {
    entries
        .iter()
        .enumerate()
        .map(|(authored_index, entry)| {
            let keyword_names = match &entry.targeting {
                Targeting::Npcs(_) => Some(Vec::new()),
                Targeting::Criteria(criteria) => {
                    let mut names = Vec::with_capacity(criteria.keywords.len());
                    let mut unresolved = false;
                    for keyword in &criteria.keywords {
                        match keywords.name_of(keyword) {
                            Some(name) => names.push(name),
                            None => {
                                warnings.push(ResolutionWarning::UnresolvedKeyword {
                                    entry_id: entry.id,
                                    keyword: keyword.clone(),
                                });
                                unresolved = true;
                            }
                        }
                    }
                    if unresolved {
                        None
                    } else {
                        Some(names)
                    }
                }
            };
            CompiledTarget {
                entry,
                authored_index,
                keyword_names,
            }
        })
        .collect()
}

/// Resolve the full NPC universe against an entry collection.
///
/// Pure: identical inputs always produce identical, deterministically
/// ordered output. NPCs matching no entry are omitted. The winner per NPC is
/// the candidate with the highest priority; candidates sharing a priority
/// (same source file) fall back to authored order, later wins. `entries`
/// must list same-file entries in their authored order.
pub fn resolve(
    universe: &[NpcRecord],
    entries: &[DistributionEntry],
    keywords: &KeywordTable,
) -> Result<Resolution, ResolutionError> {
    let mut seen = HashSet::with_capacity(universe.len());
    for npc in universe {
        if !seen.insert(&npc.form_key) {
            return Err(ResolutionError::DuplicateNpcRecord(npc.form_key.clone()));
        }
    }

    let mut warnings = Vec::new();
    let targets = compile_targets(entries, keywords, &mut warnings);

    let mut assignments = Vec::new();
    for npc in universe {
        let mut matching: Vec<&CompiledTarget<'_>> =
            targets.iter().filter(|target| target.targets(npc)).collect();
        if matching.is_empty() {
            continue;
        }

        // Application order: priority, then authored order within a file.
        // The last element is the one the distribution engine would keep.
        matching.sort_by_key(|target| (target.entry.priority, target.authored_index));

        let candidates: Vec<OutfitCandidate> = matching
            .iter()
            .map(|target| OutfitCandidate::from_entry(target.entry))
            .collect();
        let winner_index = candidates.len() - 1;

        assignments.push(NpcOutfitAssignment::new(npc, candidates, winner_index)?);
    }

    assignments.sort_by(|a, b| a.npc_form_key().cmp(b.npc_form_key()));

    Ok(Resolution {
        assignments,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::domain::value_objects::FilterCriteria;

    fn outfit(id: u32) -> FormKey {
        FormKey::new(id, "Outfits.esp")
    }

    fn guard() -> NpcRecord {
        NpcRecord::new(FormKey::new(0x01, "Skyrim.esm"))
            .with_name("Guard01")
            .with_level(10)
            .with_faction(FormKey::new(0x00F1, "Skyrim.esm"))
    }

    fn level_entry(file: &str, priority: u32, min_level: u16, outfit_id: u32) -> DistributionEntry {
        DistributionEntry::new(
            Some(outfit(outfit_id)),
            Targeting::Criteria(FilterCriteria::new().with_min_level(min_level)),
            file,
            priority,
        )
    }

    #[test]
    fn test_single_matching_entry_wins_without_conflict() {
        // Scenario: one file, one rule on level >= 5
        let universe = vec![guard()];
        let entries = vec![level_entry("FileA.esp", 1, 5, 0x0500)];

        let resolution = resolve(&universe, &entries, &KeywordTable::default()).unwrap();

        assert_eq!(resolution.assignments.len(), 1);
        let assignment = &resolution.assignments[0];
        assert_eq!(assignment.winning_outfit(), Some(&outfit(0x0500)));
        assert!(!assignment.has_conflict());
        assert_eq!(assignment.candidate_count(), 1);
    }

    #[test]
    fn test_higher_priority_file_wins_and_flags_conflict() {
        // Scenario: FileA (priority 1) and FileB (priority 2) both target the guard
        let universe = vec![guard()];
        let faction_entry = DistributionEntry::new(
            Some(outfit(0x0502)),
            Targeting::Criteria(
                FilterCriteria::new().with_faction(FormKey::new(0x00F1, "Skyrim.esm")),
            ),
            "FileB.esp",
            2,
        );
        let entries = vec![level_entry("FileA.esp", 1, 5, 0x0501), faction_entry];

        let resolution = resolve(&universe, &entries, &KeywordTable::default()).unwrap();

        let assignment = &resolution.assignments[0];
        assert_eq!(assignment.candidate_count(), 2);
        assert!(assignment.has_conflict());
        assert_eq!(assignment.winning_outfit(), Some(&outfit(0x0502)));
        assert_eq!(assignment.winning_file(), "FileB.esp");
    }

    #[test]
    fn test_winner_is_independent_of_entry_collection_order() {
        let universe = vec![guard()];
        let forward = vec![
            level_entry("FileA.esp", 1, 5, 0x0501),
            level_entry("FileB.esp", 2, 5, 0x0502),
        ];
        let reversed: Vec<DistributionEntry> = forward.iter().rev().cloned().collect();

        let a = resolve(&universe, &forward, &KeywordTable::default()).unwrap();
        let b = resolve(&universe, &reversed, &KeywordTable::default()).unwrap();

        assert_eq!(a.assignments[0].winning_outfit(), Some(&outfit(0x0502)));
        assert_eq!(b.assignments[0].winning_outfit(), Some(&outfit(0x0502)));
    }

    #[test]
    fn test_later_authored_entry_wins_within_one_file() {
        let universe = vec![guard()];
        let entries = vec![
            level_entry("FileA.esp", 1, 5, 0x0501),
            level_entry("FileA.esp", 1, 5, 0x0502),
        ];

        let resolution = resolve(&universe, &entries, &KeywordTable::default()).unwrap();

        let assignment = &resolution.assignments[0];
        assert_eq!(assignment.winning_outfit(), Some(&outfit(0x0502)));
        // Layering within one file is not a conflict
        assert!(!assignment.has_conflict());
    }

    #[test]
    fn test_override_targeting_matches_only_the_listed_npc() {
        // Scenario: explicit list containing only the guard; the other NPC
        // would satisfy any equivalent criteria but is not listed
        let other = NpcRecord::new(FormKey::new(0x02, "Skyrim.esm"))
            .with_name("Guard02")
            .with_level(10)
            .with_faction(FormKey::new(0x00F1, "Skyrim.esm"));
        let universe = vec![guard(), other];

        let entry = DistributionEntry::new(
            Some(outfit(0x0500)),
            Targeting::Npcs(BTreeSet::from([FormKey::new(0x01, "Skyrim.esm")])),
            "FileA.esp",
            1,
        );

        let resolution = resolve(&universe, &[entry], &KeywordTable::default()).unwrap();

        assert_eq!(resolution.assignments.len(), 1);
        assert_eq!(
            resolution.assignments[0].npc_form_key(),
            &FormKey::new(0x01, "Skyrim.esm")
        );
    }

    #[test]
    fn test_keyword_filter_requires_every_keyword() {
        // NPC carries K1 but not K2; the entry filters on both
        let k1 = FormKey::new(0x0801, "Skyrim.esm");
        let k2 = FormKey::new(0x0802, "Skyrim.esm");
        let keywords = KeywordTable::from_iter([
            (k1.clone(), "WardrobeKeyword1".to_string()),
            (k2.clone(), "WardrobeKeyword2".to_string()),
        ]);
        let universe = vec![guard().with_keyword("WardrobeKeyword1")];

        let entry = DistributionEntry::new(
            Some(outfit(0x0500)),
            Targeting::Criteria(FilterCriteria::new().with_keyword(k1).with_keyword(k2)),
            "FileA.esp",
            1,
        );

        let resolution = resolve(&universe, &[entry], &keywords).unwrap();
        assert!(resolution.assignments.is_empty());
        assert!(resolution.warnings.is_empty());
    }

    #[test]
    fn test_race_filter_matches_any_listed_race() {
        let r1 = FormKey::new(0x0131, "Skyrim.esm");
        let r2 = FormKey::new(0x0132, "Skyrim.esm");
        let universe = vec![guard().with_race(r2.clone())];

        let entry = DistributionEntry::new(
            Some(outfit(0x0500)),
            Targeting::Criteria(FilterCriteria::new().with_race(r1).with_race(r2)),
            "FileA.esp",
            1,
        );

        let resolution = resolve(&universe, &[entry], &KeywordTable::default()).unwrap();
        assert_eq!(resolution.assignments.len(), 1);
    }

    #[test]
    fn test_unmatched_npcs_are_omitted() {
        let universe = vec![guard().with_level(3)];
        let entries = vec![level_entry("FileA.esp", 1, 5, 0x0500)];

        let resolution = resolve(&universe, &entries, &KeywordTable::default()).unwrap();
        assert!(resolution.assignments.is_empty());
    }

    #[test]
    fn test_empty_inputs_resolve_to_empty_output() {
        let empty = resolve(&[], &[], &KeywordTable::default()).unwrap();
        assert!(empty.assignments.is_empty());
        assert!(empty.warnings.is_empty());

        let no_entries = resolve(&[guard()], &[], &KeywordTable::default()).unwrap();
        assert!(no_entries.assignments.is_empty());
    }

    #[test]
    fn test_duplicate_record_identifiers_fail_loudly() {
        let universe = vec![guard(), guard()];
        let result = resolve(&universe, &[], &KeywordTable::default());
        assert!(matches!(
            result,
            Err(ResolutionError::DuplicateNpcRecord(_))
        ));
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let universe = vec![
            guard(),
            NpcRecord::new(FormKey::new(0x02, "Skyrim.esm")).with_level(30),
        ];
        let entries = vec![
            level_entry("FileA.esp", 1, 5, 0x0501),
            level_entry("FileB.esp", 2, 20, 0x0502),
        ];

        let first = resolve(&universe, &entries, &KeywordTable::default()).unwrap();
        let second = resolve(&universe, &entries, &KeywordTable::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_output_order_is_independent_of_universe_order() {
        let a = guard();
        let b = NpcRecord::new(FormKey::new(0x02, "Skyrim.esm")).with_level(10);
        let entries = vec![level_entry("FileA.esp", 1, 5, 0x0500)];

        let forward = resolve(&[a.clone(), b.clone()], &entries, &KeywordTable::default()).unwrap();
        let reversed = resolve(&[b, a], &entries, &KeywordTable::default()).unwrap();
        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_unresolved_keyword_makes_entry_unmatchable_with_warning() {
        let known = FormKey::new(0x0800, "Skyrim.esm");
        let unknown = FormKey::new(0x0801, "Skyrim.esm");
        let keywords = KeywordTable::from_iter([(known.clone(), "ActorTypeNPC".to_string())]);

        let universe = vec![guard().with_keyword("ActorTypeNPC")];
        let broken = DistributionEntry::new(
            Some(outfit(0x0501)),
            Targeting::Criteria(FilterCriteria::new().with_keyword(unknown.clone())),
            "FileA.esp",
            1,
        );
        let healthy = DistributionEntry::new(
            Some(outfit(0x0502)),
            Targeting::Criteria(FilterCriteria::new().with_keyword(known)),
            "FileB.esp",
            2,
        );
        let broken_id = broken.id;

        let resolution =
            resolve(&universe, &[broken, healthy], &keywords).unwrap();

        // The broken entry matches nothing, the healthy one still resolves
        assert_eq!(resolution.assignments.len(), 1);
        assert_eq!(resolution.assignments[0].candidate_count(), 1);
        assert_eq!(
            resolution.assignments[0].winning_outfit(),
            Some(&outfit(0x0502))
        );
        assert_eq!(
            resolution.warnings,
            vec![ResolutionWarning::UnresolvedKeyword {
                entry_id: broken_id,
                keyword: unknown,
            }]
        );
    }
}
