use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::services::{Resolution, ResolutionWarning};
use crate::domain::aggregates::{NpcOutfitAssignment, OutfitCandidate};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateDto {
    pub entry_id: String,
    pub outfit: Option<String>,
    pub source_file: String,
    pub priority: u32,
    pub chance: u8,
    pub targeting: String,
    pub is_winner: bool,
}

impl From<&OutfitCandidate> for CandidateDto {
    fn from(candidate: &OutfitCandidate) -> Self {
        Self {
            entry_id: candidate.entry_id().to_string(),
            outfit: candidate.outfit().map(|o| o.to_string()),
            source_file: candidate.source_file().to_string(),
            priority: candidate.priority(),
            chance: candidate.chance(),
            targeting: candidate.targeting().to_string(),
            is_winner: candidate.is_winner(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentResponseDto {
    pub npc_form_key: String,
    pub display_name: String,
    pub editor_id: Option<String>,
    pub npc_source_file: String,
    /// The outfit the NPC ultimately receives; null when the winning entry
    /// removes the outfit
    pub winning_outfit: Option<String>,
    pub winning_file: String,
    pub has_conflict: bool,
    pub candidate_count: usize,
    pub candidates: Vec<CandidateDto>,
}

impl From<&NpcOutfitAssignment> for AssignmentResponseDto {
    fn from(assignment: &NpcOutfitAssignment) -> Self {
        Self {
            npc_form_key: assignment.npc_form_key().to_string(),
            display_name: assignment.display_name(),
            editor_id: assignment.editor_id().map(str::to_string),
            npc_source_file: assignment.npc_source_file().to_string(),
            winning_outfit: assignment.winning_outfit().map(|o| o.to_string()),
            winning_file: assignment.winning_file().to_string(),
            has_conflict: assignment.has_conflict(),
            candidate_count: assignment.candidate_count(),
            candidates: assignment.candidates().iter().map(CandidateDto::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionWarningDto {
    pub entry_id: String,
    pub message: String,
}

impl From<&ResolutionWarning> for ResolutionWarningDto {
    fn from(warning: &ResolutionWarning) -> Self {
        match warning {
            ResolutionWarning::UnresolvedKeyword { entry_id, .. } => Self {
                entry_id: entry_id.to_string(),
                message: warning.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionResponseDto {
    pub resolved_at: DateTime<Utc>,
    pub assignment_count: usize,
    pub conflict_count: usize,
    pub assignments: Vec<AssignmentResponseDto>,
    pub warnings: Vec<ResolutionWarningDto>,
}

impl From<&Resolution> for ResolutionResponseDto {
    fn from(resolution: &Resolution) -> Self {
        Self {
            resolved_at: Utc::now(),
            assignment_count: resolution.assignments.len(),
            conflict_count: resolution.conflict_count(),
            assignments: resolution
                .assignments
                .iter()
                .map(AssignmentResponseDto::from)
                .collect(),
            warnings: resolution.warnings.iter().map(ResolutionWarningDto::from).collect(),
        }
    }
}
