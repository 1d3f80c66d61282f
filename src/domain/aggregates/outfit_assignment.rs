//! Outfit assignment aggregate - the resolved outcome for one NPC
//!
//! An assignment is built whole by the resolver on every pass: the NPC's
//! display identity, every entry that matched it, and a single winner. It is
//! never patched incrementally; re-resolving replaces the collection.

use crate::domain::entities::{DistributionEntry, NpcRecord};
use crate::domain::value_objects::{EntryId, FormKey};

/// One matching distribution entry, annotated for conflict display.
#[derive(Debug, Clone, PartialEq)]
pub struct OutfitCandidate {
    entry_id: EntryId,
    outfit: Option<FormKey>,
    source_file: String,
    priority: u32,
    chance: u8,
    targeting: String,
    is_winner: bool,
}

impl OutfitCandidate {
    pub fn from_entry(entry: &DistributionEntry) -> Self {
        Self {
            entry_id: entry.id,
            outfit: entry.outfit.clone(),
            source_file: entry.source_file.clone(),
            priority: entry.priority,
            chance: entry.chance,
            targeting: entry.targeting.summary(),
            is_winner: false,
        }
    }

    pub fn entry_id(&self) -> EntryId {
        self.entry_id
    }

    /// The outfit this candidate would distribute; `None` removes the outfit.
    pub fn outfit(&self) -> Option<&FormKey> {
        self.outfit.as_ref()
    }

    pub fn source_file(&self) -> &str {
        &self.source_file
    }

    pub fn priority(&self) -> u32 {
        self.priority
    }

    pub fn chance(&self) -> u8 {
        self.chance
    }

    /// Targeting-mode summary ("All NPCs", "Faction, Trait", ...).
    pub fn targeting(&self) -> &str {
        &self.targeting
    }

    pub fn is_winner(&self) -> bool {
        self.is_winner
    }
}

/// Errors raised when assembling an assignment
#[derive(Debug, Clone, thiserror::Error)]
pub enum AssignmentError {
    #[error("An assignment needs at least one candidate")]
    NoCandidates,

    #[error("Winner index {index} out of range for {count} candidate(s)")]
    WinnerOutOfRange { index: usize, count: usize },
}

/// The per-NPC resolution outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct NpcOutfitAssignment {
    npc_form_key: FormKey,
    name: Option<String>,
    editor_id: Option<String>,
    /// Candidates in application order; the winner is always the last one
    candidates: Vec<OutfitCandidate>,
    winner_index: usize,
    has_conflict: bool,
}

impl NpcOutfitAssignment {
    /// Assemble an assignment from the candidates that matched one NPC.
    ///
    /// `candidates` must already be in application order and `winner_index`
    /// names the prevailing one; exactly that candidate is flagged as winner.
    ///
    /// # Invariants
    /// - The candidate list is non-empty
    /// - Exactly one candidate carries the winner flag
    /// - The conflict flag is set iff candidates span two or more source files
    pub fn new(
        npc: &NpcRecord,
        mut candidates: Vec<OutfitCandidate>,
        winner_index: usize,
    ) -> Result<Self, AssignmentError> {
        if candidates.is_empty() {
            return Err(AssignmentError::NoCandidates);
        }
        if winner_index >= candidates.len() {
            return Err(AssignmentError::WinnerOutOfRange {
                index: winner_index,
                count: candidates.len(),
            });
        }

        for candidate in candidates.iter_mut() {
            candidate.is_winner = false;
        }
        candidates[winner_index].is_winner = true;

        let mut files: Vec<String> = candidates
            .iter()
            .map(|c| c.source_file.to_ascii_lowercase())
            .collect();
        files.sort();
        files.dedup();
        let has_conflict = files.len() >= 2;

        Ok(Self {
            npc_form_key: npc.form_key.clone(),
            name: npc.name.clone(),
            editor_id: npc.editor_id.clone(),
            candidates,
            winner_index,
            has_conflict,
        })
    }

    // ========================================================================
    // NPC identity
    // ========================================================================

    pub fn npc_form_key(&self) -> &FormKey {
        &self.npc_form_key
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn editor_id(&self) -> Option<&str> {
        self.editor_id.as_deref()
    }

    /// Name for display: in-game name, then editor id, then the form key.
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .or_else(|| self.editor_id.clone())
            .unwrap_or_else(|| self.npc_form_key.to_string())
    }

    /// The source file that owns the NPC record itself.
    pub fn npc_source_file(&self) -> &str {
        self.npc_form_key.plugin()
    }

    // ========================================================================
    // Resolution outcome
    // ========================================================================

    pub fn candidates(&self) -> &[OutfitCandidate] {
        &self.candidates
    }

    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    pub fn winner(&self) -> &OutfitCandidate {
        &self.candidates[self.winner_index]
    }

    /// The outfit the NPC ultimately receives; `None` when the winning entry
    /// removes the outfit.
    pub fn winning_outfit(&self) -> Option<&FormKey> {
        self.winner().outfit()
    }

    /// The source file the winning entry originates from.
    pub fn winning_file(&self) -> &str {
        self.winner().source_file()
    }

    /// True when matching entries come from two or more distinct source
    /// files. Several entries layered within one file are normal authoring
    /// and are not flagged.
    pub fn has_conflict(&self) -> bool {
        self.has_conflict
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Targeting;
    use crate::domain::value_objects::FilterCriteria;

    fn npc() -> NpcRecord {
        NpcRecord::new(FormKey::new(0x01, "Skyrim.esm")).with_name("Guard")
    }

    fn entry(file: &str, priority: u32) -> DistributionEntry {
        DistributionEntry::new(
            Some(FormKey::new(0x0500, file)),
            Targeting::Criteria(FilterCriteria::new()),
            file,
            priority,
        )
    }

    #[test]
    fn test_exactly_one_winner_is_flagged() {
        let candidates = vec![
            OutfitCandidate::from_entry(&entry("A.esp", 0)),
            OutfitCandidate::from_entry(&entry("B.esp", 1)),
        ];
        let assignment = NpcOutfitAssignment::new(&npc(), candidates, 1).unwrap();

        let winners: Vec<bool> = assignment.candidates().iter().map(|c| c.is_winner()).collect();
        assert_eq!(winners, vec![false, true]);
        assert_eq!(assignment.winning_file(), "B.esp");
    }

    #[test]
    fn test_conflict_requires_two_distinct_files() {
        let cross_file = vec![
            OutfitCandidate::from_entry(&entry("A.esp", 0)),
            OutfitCandidate::from_entry(&entry("B.esp", 1)),
        ];
        let assignment = NpcOutfitAssignment::new(&npc(), cross_file, 1).unwrap();
        assert!(assignment.has_conflict());

        let same_file = vec![
            OutfitCandidate::from_entry(&entry("A.esp", 0)),
            OutfitCandidate::from_entry(&entry("A.esp", 0)),
        ];
        let assignment = NpcOutfitAssignment::new(&npc(), same_file, 1).unwrap();
        assert!(!assignment.has_conflict());
    }

    #[test]
    fn test_rejects_empty_or_out_of_range_input() {
        assert!(matches!(
            NpcOutfitAssignment::new(&npc(), vec![], 0),
            Err(AssignmentError::NoCandidates)
        ));

        let candidates = vec![OutfitCandidate::from_entry(&entry("A.esp", 0))];
        assert!(matches!(
            NpcOutfitAssignment::new(&npc(), candidates, 3),
            Err(AssignmentError::WinnerOutOfRange { .. })
        ));
    }
}
